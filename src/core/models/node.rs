//! Roadmap node model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Study status of a roadmap topic
///
/// Transitions are manual and unrestricted (any-to-any); the only enforced
/// rule is that a quiz score may exist only on `InProgress` or `Completed`
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    /// Prerequisites not met yet
    Locked,
    /// Suggested as a next topic
    Recommended,
    /// Currently being studied
    InProgress,
    /// Finished
    Completed,
}

impl NodeStatus {
    /// Whether this status permits a stored quiz score
    #[must_use]
    pub const fn allows_score(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Locked => "locked",
            Self::Recommended => "recommended",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        };
        write!(f, "{as_str}")
    }
}

/// A topic within a roadmap
///
/// `children` lists the topics unlocked after this one (successors, not
/// graph-theoretic children of a tree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    /// Node id, unique within its roadmap (slugified title)
    pub id: String,

    /// Topic title (e.g., "Thermodynamics")
    pub title: String,

    /// Short topic description
    pub description: String,

    /// Current study status
    pub status: NodeStatus,

    /// Latest quiz score in percent, only while in-progress or completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u8>,

    /// Ids of the topics this one leads to
    #[serde(default)]
    pub children: Vec<String>,
}

impl RoadmapNode {
    /// Create a new locked node with no score and no successors
    #[must_use]
    pub const fn new(id: String, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            status: NodeStatus::Locked,
            quiz_score: None,
            children: Vec::new(),
        }
    }

    /// Add a successor edge by node id
    pub fn add_child(&mut self, child_id: String) {
        if !self.children.contains(&child_id) {
            self.children.push(child_id);
        }
    }

    /// Remove a successor edge by node id
    pub fn remove_child(&mut self, child_id: &str) {
        self.children.retain(|c| c != child_id);
    }
}

/// Field changes to apply to a node via [`Roadmap::update_node`]
///
/// Built with the chained setters; `None` fields are left untouched.
/// `quiz_score` is doubly optional so a patch can distinguish "leave the
/// score alone" from "clear the score".
///
/// [`Roadmap::update_node`]: crate::core::models::Roadmap::update_node
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    /// New title, if changing
    pub title: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// New status, if changing
    pub status: Option<NodeStatus>,
    /// New quiz score (`Some(None)` clears it), if changing
    pub quiz_score: Option<Option<u8>>,
}

impl NodePatch {
    /// Empty patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a new status
    #[must_use]
    pub const fn status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a new quiz score
    #[must_use]
    pub const fn quiz_score(mut self, score: u8) -> Self {
        self.quiz_score = Some(Some(score));
        self
    }

    /// Clear the quiz score
    #[must_use]
    pub const fn clear_quiz_score(mut self) -> Self {
        self.quiz_score = Some(None);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.quiz_score.is_none()
    }
}
