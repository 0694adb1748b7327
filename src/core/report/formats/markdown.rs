//! Markdown report generator
//!
//! Generates roadmap reports in Markdown format with an embedded Mermaid
//! diagram for visualization. These reports render well in GitHub, GitLab,
//! and VS Code.

use crate::core::report::visualization::MermaidGenerator;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{roadmap_title}}", &ctx.roadmap.title);
        output = output.replace("{{roadmap_description}}", &ctx.roadmap.description);
        output = output.replace("{{subject}}", &ctx.roadmap.subject);
        output = output.replace("{{progress}}", &ctx.computed_progress.to_string());
        output = output.replace("{{node_count}}", &ctx.node_count().to_string());
        output = output.replace(
            "{{last_updated}}",
            &ctx.roadmap.last_updated.format("%Y-%m-%d").to_string(),
        );

        // Substitute status counts
        output = output.replace("{{completed_count}}", &ctx.counts.completed.to_string());
        output = output.replace(
            "{{in_progress_count}}",
            &ctx.counts.in_progress.to_string(),
        );
        output = output.replace(
            "{{recommended_count}}",
            &ctx.counts.recommended.to_string(),
        );
        output = output.replace("{{locked_count}}", &ctx.counts.locked.to_string());

        // Generate topic table
        let topic_table = Self::generate_topic_table(ctx);
        output = output.replace("{{topic_table}}", &topic_table);

        // Generate Mermaid diagram
        let mermaid_diagram = MermaidGenerator::generate_roadmap(ctx.roadmap);
        output = output.replace("{{mermaid_diagram}}", &mermaid_diagram);

        output
    }

    /// Generate the per-topic table
    fn generate_topic_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Topic | Status | Quiz Score | Leads to |\n");
        table.push_str("|---|---|---|---|\n");

        for node in ctx.roadmap.nodes_ordered() {
            let score = node
                .quiz_score
                .map_or_else(|| "-".to_string(), |s| format!("{s}%"));

            let leads_to = if node.children.is_empty() {
                "-".to_string()
            } else {
                node.children
                    .iter()
                    .map(|child| ctx.node_title(child))
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            let _ = writeln!(
                table,
                "| {} | {} | {score} | {leads_to} |",
                node.title, node.status
            );
        }

        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
