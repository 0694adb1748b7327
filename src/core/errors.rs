//! Error types for the quiz session engine and the roadmap graph
//!
//! Every variant is a local contract violation: it is never retried, it is
//! surfaced to the immediate caller, and a failed operation leaves prior
//! state unchanged. The core performs no logging of its own; user-visible
//! messaging is the CLI layer's job.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the question bank and the quiz session engine
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    /// The question bank contains no questions
    #[error("question bank contains no questions")]
    EmptyBank,

    /// A question offers fewer than two options
    #[error("question {id}: needs at least 2 options, got {count}")]
    TooFewOptions {
        /// Offending question id
        id: u32,
        /// Number of options supplied
        count: usize,
    },

    /// A question's correct-option index does not point into its options
    #[error("question {id}: correct option {index} out of range for {count} options")]
    CorrectOptionOutOfRange {
        /// Offending question id
        id: u32,
        /// Stored correct-option index
        index: usize,
        /// Number of options supplied
        count: usize,
    },

    /// Start was called on a session that already ran
    #[error("session was already started")]
    AlreadyStarted,

    /// The operation requires an in-progress session
    #[error("session is not in progress")]
    NotInProgress,

    /// The selected option index does not exist on the current question
    #[error("option {index} out of range for {count} options")]
    OptionOutOfRange {
        /// Requested option index
        index: usize,
        /// Number of options on the current question
        count: usize,
    },

    /// Submit was called with no pending selection
    #[error("no option selected for the current question")]
    NoSelection,

    /// The current question's answer was already submitted
    #[error("answer for the current question was already submitted")]
    AlreadySubmitted,

    /// Navigation forward while a selection is pending but unsubmitted
    #[error("current selection has not been submitted yet")]
    NotRevealed,

    /// Navigation backward from the first question
    #[error("already at the first question")]
    AtFirstQuestion,
}

/// Errors raised by roadmap graph operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoadmapError {
    /// A referenced node id does not exist in the roadmap
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    /// A generated or loaded node id collides with an existing one
    #[error("node id '{0}' already exists")]
    DuplicateId(String),

    /// An edge insertion or a loaded definition would create a cycle
    #[error("cycle detected through node '{0}'")]
    Cycle(String),

    /// A node's children list references a missing node
    #[error("node '{node}' references missing child '{child}'")]
    DanglingChild {
        /// Node holding the reference
        node: String,
        /// Missing child id
        child: String,
    },

    /// A quiz score outside the `[0, 100]` range
    #[error("quiz score {0} out of range (expected 0-100)")]
    ScoreOutOfRange(u32),

    /// A quiz score stored on a node whose status does not allow one
    #[error("node '{0}' has a quiz score but is neither in-progress nor completed")]
    MisplacedScore(String),

    /// Stored progress diverges from the recomputed value
    #[error("stored progress {stored}% does not match computed {computed}%")]
    ProgressMismatch {
        /// Progress recorded on the roadmap
        stored: u8,
        /// Progress recomputed from node statuses
        computed: u8,
    },
}

/// Errors raised while loading question banks or roadmap definitions from disk
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The content is not valid TOML for the expected schema
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed question bank violates a bank invariant
    #[error("invalid question bank: {0}")]
    Quiz(#[from] QuizError),

    /// The parsed roadmap violates a graph invariant
    #[error("invalid roadmap: {0}")]
    Roadmap(#[from] RoadmapError),
}
