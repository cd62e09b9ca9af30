//! Domain layer containing the conversation state model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `conversation` - Messages, transcript, context, and goal
//! - `analysis` - Scored options returned by the analysis service
//! - `session` - The conversation session aggregate and its events

pub mod analysis;
pub mod conversation;
pub mod foundation;
pub mod session;
