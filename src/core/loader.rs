//! TOML loaders for question banks and roadmap definitions
//!
//! Content files are the boundary with the external content/persistence
//! layer: a question bank file feeds the session engine, a roadmap
//! definition file populates the roadmap graph. Loading validates every
//! structural invariant, so a successfully loaded value is safe to hand to
//! the core.
//!
//! A loaded roadmap's stored `progress` is taken as-is;
//! [`Roadmap::validate`] reports divergence from the recomputed value
//! separately so callers can decide how loudly to complain.

use crate::core::errors::LoadError;
use crate::core::models::{Question, QuestionBank, Roadmap, RoadmapNode};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape of a question bank file
#[derive(Debug, Deserialize)]
struct BankFile {
    topic: String,
    #[serde(default)]
    questions: Vec<Question>,
}

/// On-disk shape of a roadmap definition file
#[derive(Debug, Deserialize)]
struct RoadmapFile {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    progress: u8,
    last_updated: NaiveDate,
    #[serde(default)]
    nodes: Vec<RoadmapNode>,
}

/// Parse a question bank from TOML content
///
/// # Errors
/// [`LoadError::Parse`] for malformed TOML, [`LoadError::Quiz`] for bank
/// invariant violations (empty bank, bad option counts or indices).
pub fn question_bank_from_toml(content: &str) -> Result<QuestionBank, LoadError> {
    let file: BankFile = toml::from_str(content)?;
    Ok(QuestionBank::new(file.topic, file.questions)?)
}

/// Load a question bank from a TOML file
///
/// # Errors
/// [`LoadError::Io`] when the file cannot be read, plus everything
/// [`question_bank_from_toml`] raises.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    question_bank_from_toml(&content)
}

/// Parse a roadmap definition from TOML content
///
/// # Errors
/// [`LoadError::Parse`] for malformed TOML, [`LoadError::Roadmap`] for
/// graph invariant violations (duplicate ids, dangling children, cycles,
/// misplaced or out-of-range scores).
pub fn roadmap_from_toml(content: &str) -> Result<Roadmap, LoadError> {
    let file: RoadmapFile = toml::from_str(content)?;
    Ok(Roadmap::from_parts(
        file.id,
        file.title,
        file.description,
        file.subject,
        file.nodes,
        file.progress,
        file.last_updated,
    )?)
}

/// Load a roadmap definition from a TOML file
///
/// # Errors
/// [`LoadError::Io`] when the file cannot be read, plus everything
/// [`roadmap_from_toml`] raises.
pub fn load_roadmap(path: &Path) -> Result<Roadmap, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    roadmap_from_toml(&content)
}
