//! The conversation session aggregate.
//!
//! Pure state container for the transcript, context, goal, analysis
//! results, connectivity, and the one-at-a-time pending analysis request.
//! All transitions are synchronous; the application layer owns transport
//! dispatch and event fan-out.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisResult;
use crate::domain::conversation::{Context, Goal, Message, Sender, Transcript};
use crate::domain::foundation::SessionId;

use super::errors::SessionError;

/// Connection state of the transport channel.
///
/// Driven entirely by transport lifecycle events; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Connecting,
    Connected,
    Disconnected,
}

/// Identifier for one analysis request within a session.
///
/// Monotonically increasing, so a superseded or timed-out request can be
/// distinguished from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// In-memory state of one conversation session.
///
/// # Invariants
///
/// - The transcript is append-only and insertion-ordered.
/// - The context is exactly the client-authored subset of the transcript, in
///   append order.
/// - At most one analysis request is pending; a new request supersedes the
///   previous one.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    transcript: Transcript,
    context: Context,
    goal: Option<Goal>,
    results: Vec<AnalysisResult>,
    connectivity: Connectivity,
    pending: Option<RequestId>,
    next_request: u64,
}

impl Session {
    /// Creates a fresh session with an empty transcript and no goal.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            context: Context::new(),
            goal: None,
            results: Vec::new(),
            connectivity: Connectivity::Connecting,
            pending: None,
            next_request: 1,
        }
    }

    /// Appends a message to the transcript and, for client-authored
    /// senders, to the context.
    ///
    /// Returns a copy of the appended message.
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` if text is empty or whitespace-only; no state
    ///   changes.
    pub fn append_message(
        &mut self,
        text: impl Into<String>,
        sender: Sender,
    ) -> Result<Message, SessionError> {
        let message = Message::new(sender, text).map_err(|_| SessionError::EmptyMessage)?;
        if sender.is_client_authored() {
            self.context.push(message.clone());
        }
        self.transcript.push(message.clone());
        Ok(message)
    }

    /// Replaces the conversation goal.
    ///
    /// Returns a copy of the new goal. Dispatching the follow-up analysis
    /// when context already exists is the application layer's job.
    ///
    /// # Errors
    ///
    /// - `EmptyGoal` if text is empty or whitespace-only; the previous goal
    ///   is kept.
    pub fn set_goal(&mut self, text: impl Into<String>) -> Result<Goal, SessionError> {
        let goal = Goal::new(text).map_err(|_| SessionError::EmptyGoal)?;
        self.goal = Some(goal.clone());
        Ok(goal)
    }

    /// Begins an analysis request over the current context.
    ///
    /// Allocates a fresh request ID and enters the awaiting-response state.
    /// Calling again while pending supersedes the in-flight request: the new
    /// ID becomes current and the old one's timeout is ignored.
    ///
    /// # Errors
    ///
    /// - `NoContext` if nothing has been accumulated; no state changes.
    pub fn begin_analysis(&mut self) -> Result<RequestId, SessionError> {
        if self.context.is_empty() {
            return Err(SessionError::NoContext);
        }
        let request_id = RequestId(self.next_request);
        self.next_request += 1;
        self.pending = Some(request_id);
        Ok(request_id)
    }

    /// Records a reply message from the service.
    ///
    /// Clears the pending state unconditionally, then appends the reply to
    /// the transcript (never to the context).
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` if the reply text is empty; pending is still
    ///   cleared, the transcript is unchanged.
    pub fn record_service_reply(
        &mut self,
        text: impl Into<String>,
    ) -> Result<Message, SessionError> {
        self.pending = None;
        let message = Message::service(text).map_err(|_| SessionError::EmptyMessage)?;
        self.transcript.push(message.clone());
        Ok(message)
    }

    /// Records a service-reported error: clears pending, transcript
    /// untouched.
    pub fn record_service_error(&mut self) {
        self.pending = None;
    }

    /// Replaces the analysis result set wholesale and clears pending.
    pub fn record_parsed_options(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
        self.pending = None;
    }

    /// Expires a timed-out request.
    ///
    /// Clears pending only when `request_id` is still the current request;
    /// stale watchdogs for superseded or already-answered requests are
    /// no-ops. Returns true when the expiry fired.
    pub fn expire_request(&mut self, request_id: RequestId) -> bool {
        match self.pending {
            Some(pending) if pending == request_id => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Updates the connectivity state. Returns true when it changed.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) -> bool {
        let changed = self.connectivity != connectivity;
        self.connectivity = connectivity;
        changed
    }

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the analysis context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the current goal, if one has been set.
    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// Returns the current analysis result set.
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    /// Returns the connectivity state.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Returns true while an analysis request is awaiting a response.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the ID of the in-flight request, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
