//! The conversation session aggregate and its events.

mod aggregate;
mod errors;
mod events;

pub use aggregate::{Connectivity, RequestId, Session};
pub use errors::SessionError;
pub use events::SessionEvent;
