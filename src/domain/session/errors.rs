//! Error types for session operations.

use thiserror::Error;

/// Errors produced by session state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Message text was empty or whitespace-only; the transcript is
    /// unchanged.
    #[error("message text cannot be empty")]
    EmptyMessage,

    /// Goal text was empty or whitespace-only; the previous goal is kept.
    #[error("goal cannot be empty")]
    EmptyGoal,

    /// Analysis was requested with nothing accumulated in the context.
    #[error("no context to analyze")]
    NoContext,
}
