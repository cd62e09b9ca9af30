//! WebSocket adapter for the Conversation Analysis Service.
//!
//! # Components
//!
//! - [`protocol`] - JSON wire frames for the named service events
//! - [`client`] - the connecting websocket client implementing the
//!   transport port
//! - [`event_bridge`] - pumps inbound service events into the session
//!   manager

pub mod client;
pub mod event_bridge;
pub mod protocol;

pub use client::WsAnalysisClient;
pub use event_bridge::attach_session_bridge;
pub use protocol::{AnalysisPayload, ClientFrame, ServerFrame, WireMessage};
