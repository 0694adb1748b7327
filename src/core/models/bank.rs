//! Question bank model

use crate::core::errors::QuizError;
use crate::core::models::Question;

/// A validated, ordered, read-only set of questions for one topic
///
/// The bank is the session engine's only input; it is fixed for the session
/// lifetime and guaranteed non-empty with every question invariant checked.
/// Constructed through [`QuestionBank::new`] only, so deserialization cannot
/// smuggle in an unvalidated bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    /// Topic the questions belong to (e.g., "Advanced JavaScript Concepts")
    pub topic: String,

    /// Questions in display order
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Create a bank from a topic and its questions
    ///
    /// # Errors
    /// Returns [`QuizError::EmptyBank`] when `questions` is empty, or the
    /// first per-question invariant violation.
    pub fn new(topic: String, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { topic, questions })
    }

    /// Questions in display order
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the bank
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the bank is empty (never true for a constructed bank)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
