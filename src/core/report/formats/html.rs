//! HTML report generator
//!
//! Generates roadmap reports as a single self-contained HTML page with
//! embedded CSS, a per-topic table, and a Mermaid rendering of the graph.

use crate::core::report::visualization::MermaidGenerator;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        // Substitute header metadata
        output = output.replace("{{roadmap_title}}", &escape(&ctx.roadmap.title));
        output = output.replace(
            "{{roadmap_description}}",
            &escape(&ctx.roadmap.description),
        );
        output = output.replace("{{subject}}", &escape(&ctx.roadmap.subject));
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

        // Generate topic rows
        let topic_rows = Self::generate_topic_rows(ctx);
        output = output.replace("{{topic_rows}}", &topic_rows);

        // Generate Mermaid diagram (unfenced; the template wraps it)
        let mermaid_body = MermaidGenerator::generate_roadmap_body(ctx.roadmap);
        output = output.replace("{{mermaid_body}}", &mermaid_body);

        output
    }

    /// Generate the `<tr>` rows of the topic table
    fn generate_topic_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();

        for node in ctx.roadmap.nodes_ordered() {
            let score = node
                .quiz_score
                .map_or_else(|| "-".to_string(), |s| format!("{s}%"));

            let leads_to = if node.children.is_empty() {
                "-".to_string()
            } else {
                node.children
                    .iter()
                    .map(|child| escape(&ctx.node_title(child)))
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            let _ = writeln!(
                rows,
                "      <tr><td>{}</td><td>{}</td><td><span class=\"status {status}\">{status}</span></td><td>{score}</td><td>{leads_to}</td></tr>",
                escape(&node.title),
                escape(&node.description),
                status = node.status,
            );
        }

        rows
    }
}

/// Minimal HTML escaping for text nodes
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
