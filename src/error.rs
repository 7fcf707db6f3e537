//! Error types for the solver core.

use thiserror::Error;

/// Errors surfaced by the solver core. None of these are retried here;
/// recovery, if any, belongs to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// A sequence had the wrong length or a non-digit character.
    #[error("invalid sequence: {reason}")]
    InvalidSequence { reason: String },

    /// A feedback string could not be parsed as "xAyB".
    #[error("invalid feedback string: {0:?}")]
    InvalidFeedback(String),

    /// Feedback eliminated every remaining candidate. The game collaborator
    /// reported something no sequence can produce, so the play-through is
    /// corrupt and must be aborted.
    #[error("feedback {feedback} for guess {guess} is inconsistent with all remaining candidates")]
    InconsistentFeedback { guess: String, feedback: String },

    /// Candidate space constructed with a zero code length.
    #[error("candidate space requires a code length of at least 1")]
    EmptyCandidateSpace,
}
