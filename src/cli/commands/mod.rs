//! CLI command handlers

pub mod config;
pub mod quiz;
pub mod roadmap;

use study_path::config::Config;
use std::path::{Path, PathBuf};

/// Resolve a content file path
///
/// Uses the path as given when it exists; otherwise a relative path is
/// retried inside the configured content directory. Returns the given path
/// unchanged when neither exists so the error names what the user typed.
pub fn resolve_content_path(path: &Path, config: &Config) -> PathBuf {
    if path.exists() || path.is_absolute() || config.paths.content_dir.is_empty() {
        return path.to_path_buf();
    }

    let in_content_dir = PathBuf::from(&config.paths.content_dir).join(path);
    if in_content_dir.exists() {
        in_content_dir
    } else {
        path.to_path_buf()
    }
}
