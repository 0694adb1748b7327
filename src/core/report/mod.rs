//! Report generation module for roadmaps
//!
//! Provides functionality to generate roadmap reports in Markdown and HTML
//! with a visualization of the prerequisite graph and a per-topic table.

pub mod formats;
pub mod visualization;

use crate::core::models::Roadmap;
use crate::core::progress::{self, StatusCounts};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};
pub use visualization::MermaidGenerator;

/// Data context for report generation
///
/// Aggregates everything needed to render a roadmap report, providing a
/// single source of truth for templates.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Roadmap being reported
    pub roadmap: &'a Roadmap,
    /// Node counts per status
    pub counts: StatusCounts,
    /// Progress recomputed from node statuses (authoritative for display)
    pub computed_progress: u8,
}

impl<'a> ReportContext<'a> {
    /// Create a report context for a roadmap
    #[must_use]
    pub fn new(roadmap: &'a Roadmap) -> Self {
        Self {
            roadmap,
            counts: progress::status_counts(roadmap),
            computed_progress: progress::recompute_progress(roadmap),
        }
    }

    /// Get the number of topics
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roadmap.len()
    }

    /// Look up the display title of a node id, falling back to the id
    #[must_use]
    pub fn node_title(&self, id: &str) -> String {
        self.roadmap
            .node(id)
            .map_or_else(|| id.to_string(), |node| node.title.clone())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
