//! Roadmap graph model
//!
//! A roadmap is a directed acyclic graph of topic nodes keyed by id. Edges
//! run from a prerequisite to the topics it unlocks (`children`). Alongside
//! the forward adjacency stored on each node, the roadmap maintains a
//! reverse-edge index so "who points at me" queries (deletion, in-degree)
//! stay O(edges of one node).
//!
//! The stored `progress` percentage is derived state: every mutating
//! operation recomputes it, so it always equals
//! [`progress::recompute_progress`].
//!
//! Single logical owner; concurrent edits are out of scope and would be
//! last-write-wins.

use crate::core::errors::RoadmapError;
use crate::core::models::{NodePatch, RoadmapNode};
use crate::core::progress;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A prerequisite-linked study roadmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roadmap {
    /// Roadmap id (e.g., "physics-101")
    pub id: String,

    /// Display title
    pub title: String,

    /// Short description
    pub description: String,

    /// Subject area (e.g., "Physics")
    pub subject: String,

    /// Nodes keyed by id
    pub(crate) nodes: HashMap<String, RoadmapNode>,

    /// Node ids in insertion order, for stable display
    pub(crate) order: Vec<String>,

    /// Reverse-edge index: node id -> ids of nodes listing it as a child
    pub(crate) parents: HashMap<String, Vec<String>>,

    /// Derived completion percentage
    progress: u8,

    /// Date of the last saved edit
    pub last_updated: NaiveDate,
}

impl Roadmap {
    /// Create an empty roadmap
    #[must_use]
    pub fn new(
        id: String,
        title: String,
        description: String,
        subject: String,
        last_updated: NaiveDate,
    ) -> Self {
        Self {
            id,
            title,
            description,
            subject,
            nodes: HashMap::new(),
            order: Vec::new(),
            parents: HashMap::new(),
            progress: 0,
            last_updated,
        }
    }

    /// Build a roadmap from already-linked nodes
    ///
    /// Used by loaders and tests to assemble a roadmap whose nodes carry
    /// their `children` edges. Builds the reverse index and checks the
    /// structural invariants; the supplied `progress` is stored as-is so
    /// that [`validate`](Self::validate) can flag divergence.
    ///
    /// # Errors
    /// - [`RoadmapError::DuplicateId`] when two nodes share an id
    /// - [`RoadmapError::DanglingChild`] when a `children` entry references
    ///   a missing node
    /// - [`RoadmapError::ScoreOutOfRange`] / [`RoadmapError::MisplacedScore`]
    ///   when a quiz score breaks the score invariants
    /// - [`RoadmapError::Cycle`] when the edges are not acyclic
    pub fn from_parts(
        id: String,
        title: String,
        description: String,
        subject: String,
        nodes: Vec<RoadmapNode>,
        progress: u8,
        last_updated: NaiveDate,
    ) -> Result<Self, RoadmapError> {
        let mut roadmap = Self::new(id, title, description, subject, last_updated);

        for node in nodes {
            if roadmap.nodes.contains_key(&node.id) {
                return Err(RoadmapError::DuplicateId(node.id));
            }
            roadmap.order.push(node.id.clone());
            roadmap.nodes.insert(node.id.clone(), node);
        }

        // Resolve edges now that every node is present
        for node_id in &roadmap.order {
            let node = &roadmap.nodes[node_id];
            check_score(node)?;
            for child in &node.children {
                if !roadmap.nodes.contains_key(child) {
                    return Err(RoadmapError::DanglingChild {
                        node: node_id.clone(),
                        child: child.clone(),
                    });
                }
                roadmap
                    .parents
                    .entry(child.clone())
                    .or_default()
                    .push(node_id.clone());
            }
        }

        // Acyclicity check
        let _ = progress::topological_order(&roadmap)?;

        roadmap.progress = progress;
        Ok(roadmap)
    }

    /// Derive a node id from a title
    ///
    /// Lowercases the title and joins whitespace-separated words with `-`
    /// (so "Quantum Physics" becomes "quantum-physics").
    #[must_use]
    pub fn slugify(title: &str) -> String {
        title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Add a new topic unlocked by an existing prerequisite
    ///
    /// The new node starts `locked` with no quiz score and no successors;
    /// its id is the slugified title. Appends the id to the prerequisite's
    /// `children` and recomputes progress (the denominator grew).
    ///
    /// # Errors
    /// - [`RoadmapError::NodeNotFound`] when the prerequisite is missing
    /// - [`RoadmapError::DuplicateId`] when the slugified title collides
    ///   with an existing node id
    ///
    /// # Returns
    /// The new node's id.
    pub fn add_node(
        &mut self,
        title: &str,
        description: &str,
        prerequisite_id: &str,
    ) -> Result<String, RoadmapError> {
        if !self.nodes.contains_key(prerequisite_id) {
            return Err(RoadmapError::NodeNotFound(prerequisite_id.to_string()));
        }

        let node_id = Self::slugify(title);
        if self.nodes.contains_key(&node_id) {
            return Err(RoadmapError::DuplicateId(node_id));
        }

        let node = RoadmapNode::new(node_id.clone(), title.to_string(), description.to_string());
        self.order.push(node_id.clone());
        self.nodes.insert(node_id.clone(), node);

        if let Some(prerequisite) = self.nodes.get_mut(prerequisite_id) {
            prerequisite.add_child(node_id.clone());
        }
        self.parents
            .entry(node_id.clone())
            .or_default()
            .push(prerequisite_id.to_string());

        self.refresh_progress();
        Ok(node_id)
    }

    /// Apply field changes to an existing node
    ///
    /// The quiz-score invariant is enforced here: whenever the resulting
    /// status is `locked` or `recommended`, the score is cleared.
    ///
    /// # Errors
    /// - [`RoadmapError::NodeNotFound`] when `id` is missing
    /// - [`RoadmapError::ScoreOutOfRange`] when the patch carries a score
    ///   above 100 (nothing is applied in that case)
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<(), RoadmapError> {
        if let Some(Some(score)) = patch.quiz_score {
            if score > 100 {
                return Err(RoadmapError::ScoreOutOfRange(u32::from(score)));
            }
        }

        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| RoadmapError::NodeNotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            node.title = title;
        }
        if let Some(description) = patch.description {
            node.description = description;
        }
        if let Some(status) = patch.status {
            node.status = status;
        }
        if let Some(score) = patch.quiz_score {
            node.quiz_score = score;
        }
        if !node.status.allows_score() {
            node.quiz_score = None;
        }

        self.refresh_progress();
        Ok(())
    }

    /// Remove a node and every reference to it
    ///
    /// Strips the id from the `children` of all remaining nodes via the
    /// reverse index. Descendants are not cascade-deleted. Recomputes
    /// progress.
    ///
    /// # Errors
    /// [`RoadmapError::NodeNotFound`] when `id` is missing.
    ///
    /// # Returns
    /// The removed node.
    pub fn delete_node(&mut self, id: &str) -> Result<RoadmapNode, RoadmapError> {
        let removed = self
            .nodes
            .remove(id)
            .ok_or_else(|| RoadmapError::NodeNotFound(id.to_string()))?;
        self.order.retain(|n| n != id);

        // Drop forward edges pointing at the removed node
        for parent_id in self.parents.remove(id).unwrap_or_default() {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.remove_child(id);
            }
        }

        // Drop reverse entries for the removed node's successors
        for child_id in &removed.children {
            if let Some(parent_list) = self.parents.get_mut(child_id) {
                parent_list.retain(|p| p != id);
            }
        }

        self.refresh_progress();
        Ok(removed)
    }

    /// Add a prerequisite edge between two existing nodes
    ///
    /// Duplicate edges are ignored. Rejects edges that would make the
    /// prerequisite reachable from the child, which is the only way a cycle
    /// could form.
    ///
    /// # Errors
    /// - [`RoadmapError::NodeNotFound`] when either endpoint is missing
    /// - [`RoadmapError::Cycle`] when the edge would close a cycle
    ///   (including a self-edge)
    pub fn link(&mut self, prerequisite_id: &str, child_id: &str) -> Result<(), RoadmapError> {
        if !self.nodes.contains_key(prerequisite_id) {
            return Err(RoadmapError::NodeNotFound(prerequisite_id.to_string()));
        }
        if !self.nodes.contains_key(child_id) {
            return Err(RoadmapError::NodeNotFound(child_id.to_string()));
        }
        if prerequisite_id == child_id
            || progress::is_reachable(self, child_id, prerequisite_id)
        {
            return Err(RoadmapError::Cycle(child_id.to_string()));
        }

        let Some(prerequisite) = self.nodes.get_mut(prerequisite_id) else {
            return Err(RoadmapError::NodeNotFound(prerequisite_id.to_string()));
        };
        if prerequisite.children.iter().any(|c| c == child_id) {
            return Ok(());
        }
        prerequisite.add_child(child_id.to_string());
        self.parents
            .entry(child_id.to_string())
            .or_default()
            .push(prerequisite_id.to_string());
        Ok(())
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RoadmapNode> {
        self.nodes.get(id)
    }

    /// Check if a node exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node ids in insertion order
    #[must_use]
    pub fn node_ids(&self) -> &[String] {
        &self.order
    }

    /// Nodes in insertion order
    pub fn nodes_ordered(&self) -> impl Iterator<Item = &RoadmapNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Ids of the nodes listing `id` as a child
    #[must_use]
    pub fn parents_of(&self, id: &str) -> &[String] {
        self.parents.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the roadmap has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored completion percentage
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Record the date of an edit
    pub fn touch(&mut self, date: NaiveDate) {
        self.last_updated = date;
    }

    /// Check every roadmap invariant
    ///
    /// # Errors
    /// The first violation found: dangling children, score range/placement,
    /// a cycle, or stored progress diverging from the recomputed value.
    pub fn validate(&self) -> Result<(), RoadmapError> {
        for node in self.nodes_ordered() {
            check_score(node)?;
            for child in &node.children {
                if !self.nodes.contains_key(child) {
                    return Err(RoadmapError::DanglingChild {
                        node: node.id.clone(),
                        child: child.clone(),
                    });
                }
            }
        }

        let _ = progress::topological_order(self)?;

        let computed = progress::recompute_progress(self);
        if computed != self.progress {
            return Err(RoadmapError::ProgressMismatch {
                stored: self.progress,
                computed,
            });
        }
        Ok(())
    }

    /// Overwrite the stored progress with the recomputed value
    pub(crate) fn refresh_progress(&mut self) {
        self.progress = progress::recompute_progress(self);
    }
}

fn check_score(node: &RoadmapNode) -> Result<(), RoadmapError> {
    if let Some(score) = node.quiz_score {
        if score > 100 {
            return Err(RoadmapError::ScoreOutOfRange(u32::from(score)));
        }
        if !node.status.allows_score() {
            return Err(RoadmapError::MisplacedScore(node.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::NodeStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 15).unwrap()
    }

    fn node(id: &str, children: &[&str]) -> RoadmapNode {
        let mut n = RoadmapNode::new(id.to_string(), id.to_uppercase(), String::new());
        for child in children {
            n.add_child((*child).to_string());
        }
        n
    }

    /// Two-root physics roadmap used across tests:
    /// mechanics -> thermo -> {waves, optics} -> em -> quantum
    fn physics() -> Roadmap {
        Roadmap::from_parts(
            "physics-101".to_string(),
            "Physics Mastery".to_string(),
            "Fundamentals".to_string(),
            "Physics".to_string(),
            vec![
                node("mechanics", &["thermo"]),
                node("thermo", &["waves", "optics"]),
                node("waves", &["em"]),
                node("optics", &["em"]),
                node("em", &["quantum"]),
                node("quantum", &[]),
            ],
            0,
            date(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_builds_reverse_index() {
        let roadmap = physics();

        assert_eq!(roadmap.len(), 6);
        let mut em_parents = roadmap.parents_of("em").to_vec();
        em_parents.sort();
        assert_eq!(em_parents, vec!["optics".to_string(), "waves".to_string()]);
        assert!(roadmap.parents_of("mechanics").is_empty());
    }

    #[test]
    fn test_from_parts_rejects_duplicate_ids() {
        let err = Roadmap::from_parts(
            "r".to_string(),
            "R".to_string(),
            String::new(),
            String::new(),
            vec![node("a", &[]), node("a", &[])],
            0,
            date(),
        )
        .unwrap_err();

        assert_eq!(err, RoadmapError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_from_parts_rejects_dangling_child() {
        let err = Roadmap::from_parts(
            "r".to_string(),
            "R".to_string(),
            String::new(),
            String::new(),
            vec![node("a", &["ghost"])],
            0,
            date(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RoadmapError::DanglingChild {
                node: "a".to_string(),
                child: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_cycle() {
        let err = Roadmap::from_parts(
            "r".to_string(),
            "R".to_string(),
            String::new(),
            String::new(),
            vec![node("a", &["b"]), node("b", &["c"]), node("c", &["a"])],
            0,
            date(),
        )
        .unwrap_err();

        assert!(matches!(err, RoadmapError::Cycle(_)));
    }

    #[test]
    fn test_add_node_creates_locked_child() {
        // addNode("Quantum Physics", ..., prerequisite "em") with "quantum"
        // renamed away so the slug is free
        let mut roadmap = physics();
        roadmap.delete_node("quantum").unwrap();

        let new_id = roadmap
            .add_node("Quantum Physics", "Subatomic particles", "em")
            .unwrap();

        assert_eq!(new_id, "quantum-physics");
        let added = roadmap.node("quantum-physics").unwrap();
        assert_eq!(added.status, NodeStatus::Locked);
        assert!(added.quiz_score.is_none());
        assert!(roadmap
            .node("em")
            .unwrap()
            .children
            .contains(&"quantum-physics".to_string()));
    }

    #[test]
    fn test_add_node_missing_prerequisite() {
        let mut roadmap = physics();
        let err = roadmap.add_node("New Topic", "", "nope").unwrap_err();
        assert_eq!(err, RoadmapError::NodeNotFound("nope".to_string()));
    }

    #[test]
    fn test_add_node_duplicate_slug() {
        let mut roadmap = physics();
        let err = roadmap.add_node("Thermo", "", "mechanics").unwrap_err();
        assert_eq!(err, RoadmapError::DuplicateId("thermo".to_string()));
        // Failed add must not have touched the graph
        assert_eq!(roadmap.len(), 6);
        assert_eq!(roadmap.node("mechanics").unwrap().children, vec!["thermo"]);
    }

    #[test]
    fn test_update_node_clears_score_on_lock() {
        let mut roadmap = physics();
        roadmap
            .update_node(
                "mechanics",
                NodePatch::new().status(NodeStatus::Completed).quiz_score(92),
            )
            .unwrap();
        assert_eq!(roadmap.node("mechanics").unwrap().quiz_score, Some(92));

        roadmap
            .update_node("mechanics", NodePatch::new().status(NodeStatus::Locked))
            .unwrap();
        assert!(roadmap.node("mechanics").unwrap().quiz_score.is_none());
    }

    #[test]
    fn test_update_node_rejects_out_of_range_score() {
        let mut roadmap = physics();
        roadmap
            .update_node("thermo", NodePatch::new().status(NodeStatus::InProgress))
            .unwrap();

        let err = roadmap
            .update_node("thermo", NodePatch::new().quiz_score(101))
            .unwrap_err();
        assert_eq!(err, RoadmapError::ScoreOutOfRange(101));
        // No partial mutation
        assert!(roadmap.node("thermo").unwrap().quiz_score.is_none());
    }

    #[test]
    fn test_delete_node_strips_references() {
        let mut roadmap = physics();
        roadmap.delete_node("em").unwrap();

        assert!(!roadmap.contains("em"));
        // quantum survives (no cascade), em gone from every children list
        assert!(roadmap.contains("quantum"));
        for node in roadmap.nodes_ordered() {
            assert!(!node.children.contains(&"em".to_string()));
        }
        assert!(roadmap.parents_of("quantum").is_empty());
    }

    #[test]
    fn test_link_rejects_cycle() {
        let mut roadmap = physics();
        // em is reachable from mechanics, so em -> mechanics must close a cycle
        let err = roadmap.link("em", "mechanics").unwrap_err();
        assert_eq!(err, RoadmapError::Cycle("mechanics".to_string()));

        let err = roadmap.link("waves", "waves").unwrap_err();
        assert_eq!(err, RoadmapError::Cycle("waves".to_string()));
    }

    #[test]
    fn test_link_is_idempotent() {
        let mut roadmap = physics();
        roadmap.link("mechanics", "waves").unwrap();
        roadmap.link("mechanics", "waves").unwrap();

        let children = &roadmap.node("mechanics").unwrap().children;
        assert_eq!(
            children.iter().filter(|c| c.as_str() == "waves").count(),
            1
        );
        assert_eq!(
            roadmap
                .parents_of("waves")
                .iter()
                .filter(|p| p.as_str() == "mechanics")
                .count(),
            1
        );
    }

    #[test]
    fn test_progress_tracks_mutations() {
        let mut roadmap = physics();
        assert_eq!(roadmap.progress(), 0);

        roadmap
            .update_node("mechanics", NodePatch::new().status(NodeStatus::Completed))
            .unwrap();
        // 1 of 6 completed
        assert_eq!(roadmap.progress(), 17);
        roadmap.validate().unwrap();

        roadmap.delete_node("quantum").unwrap();
        // 1 of 5 completed
        assert_eq!(roadmap.progress(), 20);
        roadmap.validate().unwrap();
    }

    #[test]
    fn test_validate_flags_progress_mismatch() {
        let roadmap = Roadmap::from_parts(
            "r".to_string(),
            "R".to_string(),
            String::new(),
            String::new(),
            vec![node("a", &[])],
            55,
            date(),
        )
        .unwrap();

        let err = roadmap.validate().unwrap_err();
        assert_eq!(
            err,
            RoadmapError::ProgressMismatch {
                stored: 55,
                computed: 0
            }
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(Roadmap::slugify("Quantum Physics"), "quantum-physics");
        assert_eq!(Roadmap::slugify("  Linear   Algebra "), "linear-algebra");
        assert_eq!(Roadmap::slugify("Optics"), "optics");
    }

    #[test]
    fn test_touch() {
        let mut roadmap = physics();
        let newer = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        roadmap.touch(newer);
        assert_eq!(roadmap.last_updated, newer);
    }
}
