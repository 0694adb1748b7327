//! Roadmap graph visualization

pub mod mermaid;

pub use mermaid::MermaidGenerator;
