//! Application layer - mediates user intents and service events.

mod session_manager;

pub use session_manager::{SessionManager, SessionManagerError, SubscriberId};
