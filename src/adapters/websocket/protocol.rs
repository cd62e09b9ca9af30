//! Wire protocol for the Conversation Analysis Service.
//!
//! Each websocket text frame carries one named event as JSON:
//! `{"event": "<name>", "data": <payload>}`. Outbound events are
//! `chat-message` (the accumulated context plus goal) and
//! `request-parsed-options` (no payload). Inbound events are
//! `chat-response`, `chat-error`, and `parsedoptions`.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::conversation::{Message, Sender};
use crate::ports::{AnalysisRequest, ServiceEvent};

/// A message as it crosses the wire: text and sender only.
///
/// Local bookkeeping (IDs, timestamps) stays on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub text: String,
    pub sender: Sender,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            text: message.text().to_string(),
            sender: message.sender(),
        }
    }
}

/// Payload of an outbound `chat-message` frame.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisPayload {
    /// The client-authored context, in append order.
    pub messages: Vec<WireMessage>,
    /// The declared goal; omitted when never set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Frames sent from the client to the service.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Ask for the default option set. Sent once per connection.
    RequestParsedOptions,

    /// Submit the accumulated conversation for analysis.
    ChatMessage(AnalysisPayload),
}

impl ClientFrame {
    /// Builds a `chat-message` frame from an analysis request.
    pub fn chat_message(request: &AnalysisRequest) -> Self {
        Self::ChatMessage(AnalysisPayload {
            messages: request.messages.iter().map(WireMessage::from).collect(),
            goal: request.goal.as_ref().map(|g| g.as_str().to_string()),
        })
    }
}

/// Frames received from the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// A single reply message.
    ChatResponse(String),

    /// An error description.
    ChatError(String),

    /// A replacement set of scored options.
    #[serde(rename = "parsedoptions")]
    ParsedOptions(Vec<AnalysisResult>),
}

impl From<ServerFrame> for ServiceEvent {
    fn from(frame: ServerFrame) -> Self {
        match frame {
            ServerFrame::ChatResponse(text) => ServiceEvent::Reply(text),
            ServerFrame::ChatError(reason) => ServiceEvent::ServiceError(reason),
            ServerFrame::ParsedOptions(results) => ServiceEvent::ParsedOptions(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Session;

    fn request_with_goal() -> AnalysisRequest {
        let mut session = Session::new();
        session.append_message("Hi there", Sender::Customer).unwrap();
        session.append_message("How can I help?", Sender::Agent).unwrap();
        let goal = session.set_goal("close the deal").unwrap();
        let request_id = session.begin_analysis().unwrap();
        AnalysisRequest::new(request_id, session.context().messages().to_vec(), Some(goal))
    }

    #[test]
    fn chat_message_frame_serializes_event_and_payload() {
        let frame = ClientFrame::chat_message(&request_with_goal());
        let json = serde_json::to_string(&frame).unwrap();

        assert!(json.contains(r#""event":"chat-message""#));
        assert!(json.contains(r#""text":"Hi there""#));
        assert!(json.contains(r#""sender":"customer""#));
        assert!(json.contains(r#""goal":"close the deal""#));
    }

    #[test]
    fn chat_message_frame_preserves_message_order() {
        let frame = ClientFrame::chat_message(&request_with_goal());
        let value: serde_json::Value = serde_json::to_value(&frame).unwrap();

        let messages = value["data"]["messages"].as_array().unwrap();
        assert_eq!(messages[0]["text"], "Hi there");
        assert_eq!(messages[1]["text"], "How can I help?");
    }

    #[test]
    fn chat_message_frame_omits_unset_goal() {
        let mut session = Session::new();
        session.append_message("Hi", Sender::Customer).unwrap();
        let request_id = session.begin_analysis().unwrap();
        let request =
            AnalysisRequest::new(request_id, session.context().messages().to_vec(), None);

        let frame = ClientFrame::chat_message(&request);
        let value: serde_json::Value = serde_json::to_value(&frame).unwrap();

        assert!(value["data"].get("goal").is_none());
    }

    #[test]
    fn request_parsed_options_serializes_without_payload() {
        let json = serde_json::to_string(&ClientFrame::RequestParsedOptions).unwrap();
        assert_eq!(json, r#"{"event":"request-parsed-options"}"#);
    }

    #[test]
    fn chat_response_frame_parses() {
        let json = r#"{"event": "chat-response", "data": "hello"}"#;
        let frame: ServerFrame = serde_json::from_str(json).unwrap();
        assert!(matches!(frame, ServerFrame::ChatResponse(ref text) if text == "hello"));
    }

    #[test]
    fn chat_error_frame_parses() {
        let json = r#"{"event": "chat-error", "data": "model overloaded"}"#;
        let frame: ServerFrame = serde_json::from_str(json).unwrap();
        assert!(matches!(frame, ServerFrame::ChatError(ref reason) if reason == "model overloaded"));
    }

    #[test]
    fn parsedoptions_frame_parses() {
        let json = r#"{"event": "parsedoptions", "data": [{"option": "Offer discount", "score": 0.82}]}"#;
        let frame: ServerFrame = serde_json::from_str(json).unwrap();

        match frame {
            ServerFrame::ParsedOptions(results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].option, "Offer discount");
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn unknown_event_fails_to_parse() {
        let json = r#"{"event": "mystery", "data": 42}"#;
        assert!(serde_json::from_str::<ServerFrame>(json).is_err());
    }

    #[test]
    fn server_frames_convert_to_service_events() {
        let event: ServiceEvent = ServerFrame::ChatResponse("hi".to_string()).into();
        assert!(matches!(event, ServiceEvent::Reply(ref text) if text == "hi"));

        let event: ServiceEvent = ServerFrame::ChatError("bad".to_string()).into();
        assert!(matches!(event, ServiceEvent::ServiceError(_)));

        let event: ServiceEvent =
            ServerFrame::ParsedOptions(vec![AnalysisResult::new("A", 0.9)]).into();
        assert!(matches!(event, ServiceEvent::ParsedOptions(ref r) if r.len() == 1));
    }
}
