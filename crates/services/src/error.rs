//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::{AnswerError, TaskSetError};

/// Errors emitted by the task generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("pool of {available} distinct items cannot fill {needed} choices")]
    InsufficientPool { available: usize, needed: usize },
    #[error("choice list stuck at {got} of {needed} items after backfill")]
    IncompleteSet { got: usize, needed: usize },
    #[error("question selector produced no candidate")]
    NoCandidate,
    #[error(transparent)]
    Set(#[from] TaskSetError),
}

/// Errors emitted by the drill session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Answer(#[from] AnswerError),
}
