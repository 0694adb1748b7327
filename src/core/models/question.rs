//! Quiz question model

use crate::core::errors::QuizError;
use serde::{Deserialize, Serialize};

/// A single multiple-choice question
///
/// Questions are immutable once loaded; a session never mutates its bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question id, unique within its bank
    pub id: u32,

    /// Prompt text shown to the user
    pub prompt: String,

    /// Answer options, in display order (at least two)
    pub options: Vec<String>,

    /// Index into `options` of the correct answer
    pub correct_option: usize,

    /// Explanation shown after the answer is revealed
    pub explanation: String,
}

impl Question {
    /// Create a new question
    ///
    /// # Errors
    /// Returns [`QuizError::TooFewOptions`] when fewer than two options are
    /// supplied, or [`QuizError::CorrectOptionOutOfRange`] when
    /// `correct_option` does not index into `options`.
    pub fn new(
        id: u32,
        prompt: String,
        options: Vec<String>,
        correct_option: usize,
        explanation: String,
    ) -> Result<Self, QuizError> {
        let question = Self {
            id,
            prompt,
            options,
            correct_option,
            explanation,
        };
        question.validate()?;
        Ok(question)
    }

    /// Check the question invariants
    ///
    /// # Errors
    /// Same conditions as [`Question::new`]; used by loaders on
    /// deserialized records.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.options.len() < 2 {
            return Err(QuizError::TooFewOptions {
                id: self.id,
                count: self.options.len(),
            });
        }
        if self.correct_option >= self.options.len() {
            return Err(QuizError::CorrectOptionOutOfRange {
                id: self.id,
                index: self.correct_option,
                count: self.options.len(),
            });
        }
        Ok(())
    }

    /// Whether the given option index is the correct answer
    #[must_use]
    pub const fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_question_creation() {
        let q = Question::new(
            1,
            "What does DAG stand for?".to_string(),
            options(),
            2,
            "Directed acyclic graph.".to_string(),
        )
        .unwrap();

        assert_eq!(q.id, 1);
        assert_eq!(q.options.len(), 3);
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_too_few_options() {
        let err = Question::new(
            7,
            "Lonely?".to_string(),
            vec!["only".to_string()],
            0,
            String::new(),
        )
        .unwrap_err();

        assert_eq!(err, QuizError::TooFewOptions { id: 7, count: 1 });
    }

    #[test]
    fn test_correct_option_out_of_range() {
        let err = Question::new(3, "Pick".to_string(), options(), 3, String::new()).unwrap_err();

        assert_eq!(
            err,
            QuizError::CorrectOptionOutOfRange {
                id: 3,
                index: 3,
                count: 3
            }
        );
    }
}
