//! Events emitted to presentation-layer subscribers.

use crate::domain::analysis::AnalysisResult;
use crate::domain::conversation::{Goal, Message};

use super::aggregate::{Connectivity, RequestId};

/// A state change observed on the session.
///
/// Subscribers receive these over their own channels; the payloads are
/// read-only copies, never live references into the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A message was appended to the transcript.
    MessageAppended(Message),

    /// The conversation goal was replaced.
    GoalChanged(Goal),

    /// An analysis request went out and a response is now awaited.
    AnalysisStarted { request_id: RequestId },

    /// The service sent a single reply message.
    ReplyReceived(Message),

    /// The pending analysis ended without a usable response.
    AnalysisFailed { reason: String },

    /// The analysis result set was replaced wholesale.
    ResultsReplaced(Vec<AnalysisResult>),

    /// The transport connection state changed.
    ConnectivityChanged(Connectivity),
}
