//! Mermaid diagram generator for roadmap graphs
//!
//! Generates Mermaid flowchart syntax that can be embedded in Markdown files
//! and rendered by GitHub, GitLab, and other Markdown viewers.

use crate::core::models::{NodeStatus, Roadmap, RoadmapNode};
use std::fmt::Write;

/// Generator for Mermaid diagram syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a fenced Mermaid flowchart from a roadmap
    ///
    /// Wraps [`generate_roadmap_body`](Self::generate_roadmap_body) in a
    /// ` ```mermaid ` code fence for embedding in Markdown.
    #[must_use]
    pub fn generate_roadmap(roadmap: &Roadmap) -> String {
        format!(
            "```mermaid\n{}```\n",
            Self::generate_roadmap_body(roadmap)
        )
    }

    /// Generate raw Mermaid flowchart syntax from a roadmap
    ///
    /// Creates a top-down flowchart showing which topics each topic unlocks.
    /// Nodes are styled by status using the same green/blue/yellow/gray
    /// scheme the list views use.
    #[must_use]
    pub fn generate_roadmap_body(roadmap: &Roadmap) -> String {
        let mut output = String::from("flowchart TD\n");

        // Define nodes with their status class
        for node in roadmap.nodes_ordered() {
            let safe_id = Self::sanitize_id(&node.id);
            let label = Self::node_label(node);
            let class = Self::status_class(node.status);
            let _ = writeln!(output, "    {safe_id}[\"{label}\"]:::{class}");
        }

        output.push('\n');

        // Add unlock edges
        for node in roadmap.nodes_ordered() {
            let from_id = Self::sanitize_id(&node.id);
            for child in &node.children {
                let to_id = Self::sanitize_id(child);
                let _ = writeln!(output, "    {from_id} --> {to_id}");
            }
        }

        output.push('\n');
        output.push_str(
            "    classDef completed fill:#dcfce7,stroke:#22c55e,color:#166534\n\
             \x20   classDef inProgress fill:#dbeafe,stroke:#3b82f6,color:#1e40af\n\
             \x20   classDef recommended fill:#fef9c3,stroke:#eab308,color:#854d0e\n\
             \x20   classDef locked fill:#f3f4f6,stroke:#9ca3af,color:#6b7280\n",
        );

        output
    }

    /// Get a display label for a roadmap node
    fn node_label(node: &RoadmapNode) -> String {
        // Truncate long titles
        let title: String = if node.title.chars().count() > 20 {
            let head: String = node.title.chars().take(17).collect();
            format!("{head}...")
        } else {
            node.title.clone()
        };

        node.quiz_score.map_or_else(
            || title.clone(),
            |score| format!("{title}<br/>{score}%"),
        )
    }

    /// Mermaid class name for a node status
    const fn status_class(status: NodeStatus) -> &'static str {
        match status {
            NodeStatus::Completed => "completed",
            NodeStatus::InProgress => "inProgress",
            NodeStatus::Recommended => "recommended",
            NodeStatus::Locked => "locked",
        }
    }

    /// Sanitize a node id for use as a Mermaid node ID
    fn sanitize_id(id: &str) -> String {
        id.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}
