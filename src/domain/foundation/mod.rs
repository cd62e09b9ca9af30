//! Shared domain primitives.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{MessageId, SessionId};
pub use timestamp::Timestamp;
