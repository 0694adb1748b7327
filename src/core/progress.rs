//! Aggregate progress and graph checks for roadmaps
//!
//! Pure functions over a [`Roadmap`]; nothing here mutates state. The
//! roadmap's mutating operations call [`recompute_progress`] after every
//! change so the stored percentage never drifts from these results.

use crate::core::errors::RoadmapError;
use crate::core::models::{NodeStatus, Roadmap};
use std::collections::{HashMap, HashSet, VecDeque};

/// Node counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Nodes still locked
    pub locked: usize,
    /// Nodes recommended as next topics
    pub recommended: usize,
    /// Nodes currently being studied
    pub in_progress: usize,
    /// Nodes finished
    pub completed: usize,
}

impl StatusCounts {
    /// Total number of counted nodes
    #[must_use]
    pub const fn total(&self) -> usize {
        self.locked + self.recommended + self.in_progress + self.completed
    }
}

/// Compute the completion percentage of a roadmap
///
/// `round(100 * completed / nodes)`, or `0` for an empty roadmap.
#[must_use]
pub fn recompute_progress(roadmap: &Roadmap) -> u8 {
    let total = roadmap.len();
    if total == 0 {
        return 0;
    }

    let completed = roadmap
        .nodes_ordered()
        .filter(|node| node.status == NodeStatus::Completed)
        .count();

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ((100.0 * completed as f64) / total as f64).round() as u8
    }
}

/// Count nodes per status
#[must_use]
pub fn status_counts(roadmap: &Roadmap) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for node in roadmap.nodes_ordered() {
        match node.status {
            NodeStatus::Locked => counts.locked += 1,
            NodeStatus::Recommended => counts.recommended += 1,
            NodeStatus::InProgress => counts.in_progress += 1,
            NodeStatus::Completed => counts.completed += 1,
        }
    }
    counts
}

/// Order the nodes so every prerequisite precedes the topics it unlocks
///
/// Kahn's algorithm over the successor edges, seeded in insertion order so
/// the result is deterministic.
///
/// # Errors
/// Returns [`RoadmapError::Cycle`] naming one node on a cycle when the
/// graph is not acyclic.
pub fn topological_order(roadmap: &Roadmap) -> Result<Vec<String>, RoadmapError> {
    let mut indegree: HashMap<&str, usize> = roadmap
        .node_ids()
        .iter()
        .map(|id| (id.as_str(), roadmap.parents_of(id).len()))
        .collect();

    let mut queue: VecDeque<&str> = roadmap
        .node_ids()
        .iter()
        .filter(|id| roadmap.parents_of(id).is_empty())
        .map(String::as_str)
        .collect();

    let mut order = Vec::with_capacity(roadmap.len());
    while let Some(id) = queue.pop_front() {
        order.push(id.to_string());

        if let Some(node) = roadmap.node(id) {
            for child in &node.children {
                if let Some(remaining) = indegree.get_mut(child.as_str()) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        queue.push_back(child.as_str());
                    }
                }
            }
        }
    }

    if order.len() < roadmap.len() {
        // Every unemitted node sits on or behind a cycle; report the first
        let emitted: HashSet<&str> = order.iter().map(String::as_str).collect();
        let stuck = roadmap
            .node_ids()
            .iter()
            .find(|id| !emitted.contains(id.as_str()))
            .cloned()
            .unwrap_or_default();
        return Err(RoadmapError::Cycle(stuck));
    }

    Ok(order)
}

/// Whether `to` can be reached from `from` by following successor edges
///
/// A node is considered reachable from itself.
#[must_use]
pub fn is_reachable(roadmap: &Roadmap, from: &str, to: &str) -> bool {
    if from == to {
        return roadmap.contains(from);
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(from);
    visited.insert(from);

    while let Some(current) = queue.pop_front() {
        let Some(node) = roadmap.node(current) else {
            continue;
        };
        for child in &node.children {
            if child == to {
                return true;
            }
            if visited.insert(child.as_str()) {
                queue.push_back(child.as_str());
            }
        }
    }

    false
}
