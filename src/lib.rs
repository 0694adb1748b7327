//! Shared library for `StudyPath`
//! Contains the quiz session engine, the roadmap graph, and the supporting
//! config/loader/report functionality used by the CLI.

pub mod core;
pub mod logger;

pub use core::*;
