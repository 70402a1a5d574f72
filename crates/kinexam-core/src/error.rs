//! Session error types.
//!
//! Validation failures are ordinary, recoverable outcomes: the caller shows
//! the message and re-prompts. The classifier below separates them from
//! misuse of the state machine.

use thiserror::Error;

/// Errors from driving an exam session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The student name was empty or whitespace.
    #[error("please enter your name")]
    EmptyName,

    /// The seed text did not parse as an integer.
    #[error("invalid seed number {0:?}: enter a whole number")]
    SeedNotAnInteger(String),

    /// The seed parsed but was zero or negative.
    #[error("the seed must be a POSITIVE integer, got {0}")]
    SeedNotPositive(i64),

    /// The seed was positive but larger than the engine accepts.
    #[error("seed {0} is too large")]
    SeedOutOfRange(i64),

    /// `begin` was called on a session that already started.
    #[error("the exam has already started")]
    AlreadyStarted,

    /// An answer or finalization was attempted outside `InProgress`.
    #[error("no exam is in progress")]
    NotInProgress,
}

impl SessionError {
    /// Returns `true` for validation failures the caller recovers from by
    /// re-prompting. Session state did not change.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SessionError::EmptyName
                | SessionError::SeedNotAnInteger(_)
                | SessionError::SeedNotPositive(_)
                | SessionError::SeedOutOfRange(_)
        )
    }
}
