//! Data models for questions, question banks, and roadmaps

pub mod bank;
pub mod node;
pub mod question;
pub mod roadmap;

pub use bank::QuestionBank;
pub use node::{NodePatch, NodeStatus, RoadmapNode};
pub use question::Question;
pub use roadmap::Roadmap;
