//! Transport port - the contract with the Conversation Analysis Service.
//!
//! The service speaks named events over a persistent bidirectional
//! connection. Outbound, the client sends either a full analysis request
//! (`chat-message`) or a request for the default option set
//! (`request-parsed-options`). Inbound, the transport delivers lifecycle
//! and response events as [`ServiceEvent`]s.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::conversation::{Goal, Message};
use crate::domain::session::RequestId;

/// Port for sending requests to the analysis service.
///
/// Implementations own the underlying connection; sending never blocks on
/// the service's response, which arrives later as a [`ServiceEvent`].
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Submits the accumulated context (and goal) for analysis.
    async fn send_analysis(&self, request: AnalysisRequest) -> Result<(), TransportError>;

    /// Asks the service for its default option set.
    ///
    /// Issued once per established connection.
    async fn request_default_options(&self) -> Result<(), TransportError>;
}

/// One analysis request: a snapshot of the context plus the goal.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Identifies this request within the session.
    pub request_id: RequestId,
    /// The client-authored messages, in append order.
    pub messages: Vec<Message>,
    /// The declared conversation goal, when one has been set.
    pub goal: Option<Goal>,
}

impl AnalysisRequest {
    /// Creates a new analysis request.
    pub fn new(request_id: RequestId, messages: Vec<Message>, goal: Option<Goal>) -> Self {
        Self {
            request_id,
            messages,
            goal,
        }
    }
}

/// Inbound events delivered by the transport.
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    /// The connection is established and usable.
    Connected,

    /// The connection ended; no further events will arrive from it.
    Disconnected,

    /// A single reply message from the service (`chat-response`).
    Reply(String),

    /// A service-reported error description (`chat-error`).
    ServiceError(String),

    /// A replacement option set (`parsedoptions`).
    ParsedOptions(Vec<AnalysisResult>),
}

/// Transport-level failures.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The connection attempt did not complete in time.
    #[error("connect timed out after {secs}s")]
    ConnectTimeout { secs: u64 },

    /// The websocket handshake failed.
    #[error("websocket handshake failed: {0}")]
    Handshake(String),

    /// A frame could not be serialized.
    #[error("failed to encode frame: {0}")]
    Encode(String),

    /// The connection is gone and the frame was not sent.
    #[error("transport channel closed")]
    Closed,
}

impl TransportError {
    /// Creates a handshake error.
    pub fn handshake(message: impl Into<String>) -> Self {
        Self::Handshake(message.into())
    }

    /// Creates an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Session;
    use crate::domain::conversation::Sender;

    #[test]
    fn analysis_request_snapshots_context_in_order() {
        let mut session = Session::new();
        session.append_message("Hi there", Sender::Customer).unwrap();
        session.append_message("How can I help?", Sender::Agent).unwrap();
        let goal = session.set_goal("close the deal").unwrap();
        let request_id = session.begin_analysis().unwrap();

        let request = AnalysisRequest::new(
            request_id,
            session.context().messages().to_vec(),
            Some(goal),
        );

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].text(), "Hi there");
        assert_eq!(request.messages[1].text(), "How can I help?");
        assert_eq!(request.goal.unwrap().as_str(), "close the deal");
    }

    #[test]
    fn transport_error_displays_reason() {
        let err = TransportError::ConnectTimeout { secs: 10 };
        assert_eq!(err.to_string(), "connect timed out after 10s");

        let err = TransportError::handshake("connection refused");
        assert_eq!(err.to_string(), "websocket handshake failed: connection refused");
    }
}
