//! Conversation state: messages, the transcript, the context, and the goal.
//!
//! The transcript is the full ordered history of the session. The context is
//! the client-authored subset that gets submitted for analysis; service
//! messages never enter it.

mod context;
mod goal;
mod message;
mod transcript;

pub use context::Context;
pub use goal::Goal;
pub use message::{Message, Sender};
pub use transcript::Transcript;
