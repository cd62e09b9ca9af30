//! Adapters - implementations of port interfaces.
//!
//! - `websocket` - the websocket client for the Conversation Analysis
//!   Service and its wire protocol

pub mod websocket;

pub use websocket::{attach_session_bridge, WsAnalysisClient};
