//! Quiz session state machine
//!
//! Drives one user through one question bank: `NotStarted -> InProgress ->
//! Completed`, with a per-question sub-state of `Unanswered -> Selected ->
//! Revealed`. State changes happen only through the defined operations; a
//! failed operation leaves the session untouched.
//!
//! Elapsed time is counted in whole seconds via [`tick`](QuizSession::tick),
//! so the counter is deterministic in tests; wiring a real clock to `tick`
//! is the job of [`timer::Ticker`](crate::core::timer::Ticker). The session
//! is owned by a single consumer and all operations are synchronous.

use crate::core::errors::QuizError;
use crate::core::models::{Question, QuestionBank};
use std::collections::{HashMap, HashSet};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created but not started; the timer is not running
    NotStarted,
    /// Actively progressing through questions
    InProgress,
    /// Advanced past the last question; terminal until reset
    Completed,
}

/// Sub-state of the question currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// No selection made yet
    Unanswered,
    /// An option is selected but not submitted
    Selected,
    /// The answer was submitted and the result shown
    Revealed,
}

/// What happens to a previously revealed question when navigated back to
///
/// The upstream behavior (`Relock`) resets the sub-state on every
/// navigation, so a revisited question can be re-answered and its recorded
/// answer silently overwritten. `Preserve` keeps revealed questions
/// locked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevisitPolicy {
    /// Navigation re-locks: revisited questions can be answered again
    #[default]
    Relock,
    /// Revealed questions stay revealed; their answers are final
    Preserve,
}

/// Result of [`QuizSession::score`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    /// Number of submitted answers matching the correct option
    pub correct: usize,
    /// Total number of questions in the session
    pub total: usize,
}

/// A single user's run through a question bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    bank: QuestionBank,
    state: SessionState,
    current: usize,
    pending: Option<usize>,
    answers: HashMap<usize, usize>,
    revealed: HashSet<usize>,
    elapsed_seconds: u64,
    paused: bool,
    policy: RevisitPolicy,
}

impl QuizSession {
    /// Create a session over a bank with the default (upstream) revisit policy
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_policy(bank, RevisitPolicy::default())
    }

    /// Create a session over a bank with an explicit revisit policy
    #[must_use]
    pub fn with_policy(bank: QuestionBank, policy: RevisitPolicy) -> Self {
        Self {
            bank,
            state: SessionState::NotStarted,
            current: 0,
            pending: None,
            answers: HashMap::new(),
            revealed: HashSet::new(),
            elapsed_seconds: 0,
            paused: false,
            policy,
        }
    }

    /// Begin the session at the first question
    ///
    /// # Errors
    /// [`QuizError::AlreadyStarted`] unless the session is `NotStarted`.
    pub fn start(&mut self) -> Result<(), QuizError> {
        if self.state != SessionState::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Record a pending selection for the current question
    ///
    /// Calling again before submit overwrites the previous selection
    /// (last-write-wins). Nothing is written to the answers until
    /// [`submit_answer`](Self::submit_answer).
    ///
    /// # Errors
    /// - [`QuizError::NotInProgress`] outside `InProgress`
    /// - [`QuizError::OptionOutOfRange`] when `index` does not exist on the
    ///   current question
    /// - [`QuizError::AlreadySubmitted`] when the current question is
    ///   already revealed
    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        self.require_in_progress()?;
        let count = self.current_question().options.len();
        if index >= count {
            return Err(QuizError::OptionOutOfRange { index, count });
        }
        if self.revealed.contains(&self.current) {
            return Err(QuizError::AlreadySubmitted);
        }
        self.pending = Some(index);
        Ok(())
    }

    /// Submit the pending selection and reveal the result
    ///
    /// Writes the answer for the current question and moves it to
    /// `Revealed`. The aggregate score is not recomputed here; it is always
    /// derived on demand by [`score`](Self::score).
    ///
    /// # Errors
    /// - [`QuizError::NotInProgress`] outside `InProgress`
    /// - [`QuizError::AlreadySubmitted`] when the current question is
    ///   already revealed
    /// - [`QuizError::NoSelection`] when nothing is selected
    ///
    /// # Returns
    /// Whether the submitted answer is correct.
    pub fn submit_answer(&mut self) -> Result<bool, QuizError> {
        self.require_in_progress()?;
        if self.revealed.contains(&self.current) {
            return Err(QuizError::AlreadySubmitted);
        }
        let selection = self.pending.ok_or(QuizError::NoSelection)?;

        self.answers.insert(self.current, selection);
        self.revealed.insert(self.current);
        self.pending = None;
        Ok(self.current_question().is_correct(selection))
    }

    /// Advance to the next question, or complete the session
    ///
    /// Allowed when the current question is revealed or untouched (skipping
    /// records no answer). From the last question the session transitions to
    /// `Completed` and the elapsed counter stops. Otherwise the index
    /// advances and the revisit policy decides whether an already-revealed
    /// target question re-locks.
    ///
    /// # Errors
    /// - [`QuizError::NotInProgress`] outside `InProgress`
    /// - [`QuizError::NotRevealed`] when a selection is pending but not
    ///   submitted (submitting first keeps it from being dropped silently)
    pub fn next(&mut self) -> Result<(), QuizError> {
        self.require_in_progress()?;
        if self.pending.is_some() {
            return Err(QuizError::NotRevealed);
        }

        if self.current + 1 == self.bank.len() {
            self.state = SessionState::Completed;
            return Ok(());
        }

        self.current += 1;
        self.apply_revisit_policy();
        Ok(())
    }

    /// Go back to the previous question
    ///
    /// The stored answer of the revisited question is kept; whether it shows
    /// as revealed is decided by the revisit policy.
    ///
    /// # Errors
    /// - [`QuizError::NotInProgress`] outside `InProgress`
    /// - [`QuizError::AtFirstQuestion`] at index 0
    pub fn previous(&mut self) -> Result<(), QuizError> {
        self.require_in_progress()?;
        if self.current == 0 {
            return Err(QuizError::AtFirstQuestion);
        }

        self.current -= 1;
        self.pending = None;
        self.apply_revisit_policy();
        Ok(())
    }

    /// Compute the score from the submitted answers
    ///
    /// Pure; callable at any time, returning a partial score mid-session.
    #[must_use]
    pub fn score(&self) -> ScoreReport {
        let correct = self
            .bank
            .questions()
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.answers
                    .get(index)
                    .is_some_and(|answer| question.is_correct(*answer))
            })
            .count();

        ScoreReport {
            correct,
            total: self.bank.len(),
        }
    }

    /// Discard all progress and return to `NotStarted`
    ///
    /// The resulting state is indistinguishable from a freshly created
    /// session over the same bank and policy.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.current = 0;
        self.pending = None;
        self.answers.clear();
        self.revealed.clear();
        self.elapsed_seconds = 0;
        self.paused = false;
    }

    /// Advance the elapsed counter by one second
    ///
    /// No-op unless the session is `InProgress` and not paused, so a ticker
    /// left running past completion cannot move the counter.
    pub fn tick(&mut self) {
        if self.state == SessionState::InProgress && !self.paused {
            self.elapsed_seconds += 1;
        }
    }

    /// Suspend elapsed-time counting (e.g., session not displayed)
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume elapsed-time counting
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether elapsed-time counting is suspended
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session has advanced past the last question
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Sub-state of the current question
    #[must_use]
    pub fn phase(&self) -> QuestionPhase {
        if self.revealed.contains(&self.current) {
            QuestionPhase::Revealed
        } else if self.pending.is_some() {
            QuestionPhase::Selected
        } else {
            QuestionPhase::Unanswered
        }
    }

    /// Index of the current question
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The current question
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.bank.questions()[self.current]
    }

    /// The pending (selected, unsubmitted) option of the current question
    #[must_use]
    pub const fn pending_selection(&self) -> Option<usize> {
        self.pending
    }

    /// The submitted answer for a question index, if any
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    /// The bank driving this session
    #[must_use]
    pub const fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Seconds counted while in progress and not paused
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time formatted for display
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    fn require_in_progress(&self) -> Result<(), QuizError> {
        if self.state == SessionState::InProgress {
            Ok(())
        } else {
            Err(QuizError::NotInProgress)
        }
    }

    fn apply_revisit_policy(&mut self) {
        self.pending = None;
        if self.policy == RevisitPolicy::Relock {
            self.revealed.remove(&self.current);
        }
    }
}

/// Format a second count as `mm:ss`, or `hh:mm:ss` past one hour
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let secs = seconds % 60;
    let mins = (seconds / 60) % 60;
    let hours = seconds / 3600;
    if hours > 0 {
        format!("{hours:02}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::QuestionBank;

    /// Four questions; the correct option is always index 0
    fn bank() -> QuestionBank {
        let questions = (1..=4)
            .map(|id| {
                Question::new(
                    id,
                    format!("Question {id}"),
                    vec!["right".to_string(), "wrong".to_string()],
                    0,
                    "Because.".to_string(),
                )
                .unwrap()
            })
            .collect();
        QuestionBank::new("Testing".to_string(), questions).unwrap()
    }

    fn started() -> QuizSession {
        let mut session = QuizSession::new(bank());
        session.start().unwrap();
        session
    }

    #[test]
    fn test_start_transitions_once() {
        let mut session = QuizSession::new(bank());
        assert_eq!(session.state(), SessionState::NotStarted);

        session.start().unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_index(), 0);

        assert_eq!(session.start().unwrap_err(), QuizError::AlreadyStarted);
    }

    #[test]
    fn test_operations_require_in_progress() {
        let mut session = QuizSession::new(bank());
        assert_eq!(session.select_option(0).unwrap_err(), QuizError::NotInProgress);
        assert_eq!(session.submit_answer().unwrap_err(), QuizError::NotInProgress);
        assert_eq!(session.next().unwrap_err(), QuizError::NotInProgress);
        assert_eq!(session.previous().unwrap_err(), QuizError::NotInProgress);
    }

    #[test]
    fn test_select_overwrites_pending() {
        let mut session = started();
        session.select_option(1).unwrap();
        session.select_option(0).unwrap();

        assert_eq!(session.pending_selection(), Some(0));
        assert_eq!(session.phase(), QuestionPhase::Selected);
        // Nothing written until submit
        assert_eq!(session.answer(0), None);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = started();
        assert_eq!(
            session.select_option(2).unwrap_err(),
            QuizError::OptionOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn test_submit_without_selection_fails_and_leaves_state() {
        let mut session = started();
        let before = session.clone();

        assert_eq!(session.submit_answer().unwrap_err(), QuizError::NoSelection);
        assert_eq!(session, before);
    }

    #[test]
    fn test_submit_records_answer_and_reveals() {
        let mut session = started();
        session.select_option(0).unwrap();

        assert!(session.submit_answer().unwrap());
        assert_eq!(session.phase(), QuestionPhase::Revealed);
        assert_eq!(session.answer(0), Some(0));
        assert_eq!(session.pending_selection(), None);
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut session = started();
        session.select_option(0).unwrap();
        session.submit_answer().unwrap();

        assert_eq!(session.submit_answer().unwrap_err(), QuizError::AlreadySubmitted);
        assert_eq!(session.select_option(1).unwrap_err(), QuizError::AlreadySubmitted);
    }

    #[test]
    fn test_next_with_pending_selection_rejected() {
        let mut session = started();
        session.select_option(1).unwrap();

        assert_eq!(session.next().unwrap_err(), QuizError::NotRevealed);
        // Selection survives the failed call
        assert_eq!(session.pending_selection(), Some(1));
    }

    #[test]
    fn test_one_correct_then_skip_to_end() {
        // 4 questions: answer Q1 correctly, then advance through the rest
        // without answering
        let mut session = started();
        session.select_option(0).unwrap();
        assert!(session.submit_answer().unwrap());

        session.next().unwrap();
        session.next().unwrap();
        session.next().unwrap();

        assert!(session.is_completed());
        assert_eq!(session.score(), ScoreReport { correct: 1, total: 4 });
    }

    #[test]
    fn test_score_is_partial_mid_session() {
        let mut session = started();
        assert_eq!(session.score(), ScoreReport { correct: 0, total: 4 });

        session.select_option(0).unwrap();
        session.submit_answer().unwrap();
        assert_eq!(session.score(), ScoreReport { correct: 1, total: 4 });

        session.next().unwrap();
        session.select_option(1).unwrap();
        session.submit_answer().unwrap();
        // Wrong answer does not count
        assert_eq!(session.score(), ScoreReport { correct: 1, total: 4 });
    }

    #[test]
    fn test_completed_stops_ticking() {
        let mut session = started();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);

        for _ in 0..4 {
            session.next().unwrap();
        }
        assert!(session.is_completed());

        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn test_pause_and_resume_gate_ticks() {
        let mut session = started();
        session.tick();
        session.pause();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 1);
        assert!(session.is_paused());

        session.resume();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut session = QuizSession::new(bank());
        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_previous_at_first_question() {
        let mut session = started();
        assert_eq!(session.previous().unwrap_err(), QuizError::AtFirstQuestion);
    }

    #[test]
    fn test_relock_allows_overwriting_an_answer() {
        let mut session = started(); // default policy: Relock
        session.select_option(1).unwrap();
        session.submit_answer().unwrap();
        session.next().unwrap();

        session.previous().unwrap();
        // Re-locked: question can be answered again
        assert_eq!(session.phase(), QuestionPhase::Unanswered);
        assert_eq!(session.answer(0), Some(1));

        session.select_option(0).unwrap();
        session.submit_answer().unwrap();
        // Recorded answer silently overwritten, and scoring follows
        assert_eq!(session.answer(0), Some(0));
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn test_preserve_keeps_answers_final() {
        let mut session = QuizSession::with_policy(bank(), RevisitPolicy::Preserve);
        session.start().unwrap();
        session.select_option(1).unwrap();
        session.submit_answer().unwrap();
        session.next().unwrap();

        session.previous().unwrap();
        assert_eq!(session.phase(), QuestionPhase::Revealed);
        assert_eq!(session.select_option(0).unwrap_err(), QuizError::AlreadySubmitted);
        assert_eq!(session.answer(0), Some(1));
    }

    #[test]
    fn test_reset_equals_fresh_session() {
        let mut session = started();
        session.select_option(0).unwrap();
        session.submit_answer().unwrap();
        session.tick();
        session.next().unwrap();
        session.pause();

        session.reset();
        assert_eq!(session, QuizSession::new(bank()));
    }

    #[test]
    fn test_score_total_always_question_count() {
        let session = started();
        assert_eq!(session.score().total, session.bank().len());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "01:00:00");
        assert_eq!(format_elapsed(3723), "01:02:03");
    }
}
