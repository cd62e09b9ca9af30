//! The session manager: mediates user intents, the pending analysis cycle,
//! and event fan-out to presentation subscribers.
//!
//! All state mutation funnels through this type; the session mutex
//! serializes event handling, and subscribers only ever see read-only
//! copies. One analysis request is outstanding at a time: a new request
//! supersedes the in-flight one, and a watchdog clears a request that never
//! hears back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

use crate::domain::analysis::AnalysisResult;
use crate::domain::conversation::{Goal, Message, Sender};
use crate::domain::session::{
    Connectivity, RequestId, Session, SessionError, SessionEvent,
};
use crate::ports::{AnalysisRequest, AnalysisTransport, ServiceEvent, TransportError};

/// Capacity of each subscriber's event channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Identifies one presentation-layer subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Errors surfaced by session manager operations.
#[derive(Debug, Clone, Error)]
pub enum SessionManagerError {
    /// A session state transition was rejected.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The transport could not carry the request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Owns the session state and the transport, and fans events out to
/// subscribers.
pub struct SessionManager<T: AnalysisTransport> {
    session: Mutex<Session>,
    transport: T,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<SessionEvent>>>,
    next_subscriber: AtomicU64,
    analysis_timeout: Duration,
}

impl<T: AnalysisTransport + 'static> SessionManager<T> {
    /// Creates a manager over a fresh session.
    pub fn new(transport: T, analysis_timeout: Duration) -> Self {
        Self {
            session: Mutex::new(Session::new()),
            transport,
            subscribers: Mutex::new(HashMap::new()),
            next_subscriber: AtomicU64::new(1),
            analysis_timeout,
        }
    }

    /// Registers a subscriber and returns its event receiver.
    ///
    /// Events are delivered best-effort over a bounded channel; a subscriber
    /// that stops draining its channel misses events rather than stalling
    /// the session.
    pub async fn subscribe(&self) -> (SubscriberId, mpsc::Receiver<SessionEvent>) {
        let id = SubscriberId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.subscribers.lock().await.insert(id, tx);
        (id, rx)
    }

    /// Removes a subscriber; its channel closes and no further events
    /// arrive.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.lock().await.remove(&id);
    }

    /// Appends a message to the transcript (and context, for client-authored
    /// senders).
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` for empty or whitespace-only text; the transcript is
    ///   unchanged.
    pub async fn append_message(
        &self,
        text: &str,
        sender: Sender,
    ) -> Result<(), SessionManagerError> {
        let message = {
            let mut session = self.session.lock().await;
            match session.append_message(text, sender) {
                Ok(message) => message,
                Err(err) => {
                    tracing::debug!(%sender, "ignoring empty message input");
                    return Err(err.into());
                }
            }
        };
        self.emit(SessionEvent::MessageAppended(message)).await;
        Ok(())
    }

    /// Replaces the conversation goal.
    ///
    /// When context has already been accumulated, the new goal immediately
    /// triggers an analysis run.
    ///
    /// # Errors
    ///
    /// - `EmptyGoal` for empty or whitespace-only text; the previous goal is
    ///   kept.
    /// - Transport errors from the triggered analysis dispatch.
    pub async fn set_goal(self: &Arc<Self>, text: &str) -> Result<(), SessionManagerError> {
        let request = {
            let mut session = self.session.lock().await;
            let goal = match session.set_goal(text) {
                Ok(goal) => goal,
                Err(err) => {
                    tracing::debug!("ignoring empty goal input");
                    return Err(err.into());
                }
            };
            // The goal is already replaced, so subscribers hear about it
            // even when the follow-up dispatch fails.
            self.emit(SessionEvent::GoalChanged(goal)).await;
            if session.context().is_empty() {
                None
            } else {
                Some(self.dispatch_analysis(&mut session).await?)
            }
        };

        if let Some(request) = request {
            self.begin_watch(request.request_id).await;
        }
        Ok(())
    }

    /// Submits the accumulated context (plus goal) for analysis.
    ///
    /// # Errors
    ///
    /// - `NoContext` when nothing has been accumulated; no transport send
    ///   happens.
    /// - Transport errors; pending is cleared so the session stays usable.
    pub async fn run_analysis(self: &Arc<Self>) -> Result<(), SessionManagerError> {
        let request = {
            let mut session = self.session.lock().await;
            self.dispatch_analysis(&mut session).await?
        };
        self.begin_watch(request.request_id).await;
        Ok(())
    }

    /// Applies one inbound transport event to the session.
    pub async fn handle_service_event(&self, event: ServiceEvent) {
        match event {
            ServiceEvent::Connected => {
                let changed = {
                    let mut session = self.session.lock().await;
                    session.set_connectivity(Connectivity::Connected)
                };
                tracing::info!("connected to analysis service");
                if let Err(err) = self.transport.request_default_options().await {
                    tracing::error!(error = %err, "failed to request default options");
                }
                if changed {
                    self.emit(SessionEvent::ConnectivityChanged(Connectivity::Connected))
                        .await;
                }
            }
            ServiceEvent::Disconnected => {
                let changed = {
                    let mut session = self.session.lock().await;
                    session.set_connectivity(Connectivity::Disconnected)
                };
                tracing::warn!("disconnected from analysis service");
                if changed {
                    self.emit(SessionEvent::ConnectivityChanged(Connectivity::Disconnected))
                        .await;
                }
            }
            ServiceEvent::Reply(text) => {
                let appended = {
                    let mut session = self.session.lock().await;
                    session.record_service_reply(text)
                };
                match appended {
                    Ok(message) => self.emit(SessionEvent::ReplyReceived(message)).await,
                    Err(_) => tracing::warn!("service sent an empty reply; dropping it"),
                }
            }
            ServiceEvent::ServiceError(reason) => {
                {
                    let mut session = self.session.lock().await;
                    session.record_service_error();
                }
                tracing::error!(%reason, "analysis service reported an error");
                self.emit(SessionEvent::AnalysisFailed { reason }).await;
            }
            ServiceEvent::ParsedOptions(results) => {
                {
                    let mut session = self.session.lock().await;
                    session.record_parsed_options(results.clone());
                }
                self.emit(SessionEvent::ResultsReplaced(results)).await;
            }
        }
    }

    /// Returns a copy of the transcript messages in insertion order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.session.lock().await.transcript().messages().to_vec()
    }

    /// Returns the number of messages accumulated in the context.
    pub async fn context_len(&self) -> usize {
        self.session.lock().await.context().len()
    }

    /// Returns the current goal, if any.
    pub async fn goal(&self) -> Option<Goal> {
        self.session.lock().await.goal().cloned()
    }

    /// Returns a copy of the current analysis result set.
    pub async fn results(&self) -> Vec<AnalysisResult> {
        self.session.lock().await.results().to_vec()
    }

    /// Returns true while an analysis request is awaiting a response.
    pub async fn is_pending(&self) -> bool {
        self.session.lock().await.is_pending()
    }

    /// Returns the connectivity state.
    pub async fn connectivity(&self) -> Connectivity {
        self.session.lock().await.connectivity()
    }

    /// Begins an analysis over the locked session and sends it out.
    ///
    /// On transport failure the pending state is cleared before the error
    /// propagates, so a failed dispatch never leaves the session stuck.
    async fn dispatch_analysis(
        &self,
        session: &mut Session,
    ) -> Result<AnalysisRequest, SessionManagerError> {
        let request_id = match session.begin_analysis() {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("no context to analyze");
                return Err(err.into());
            }
        };
        let request = AnalysisRequest::new(
            request_id,
            session.context().messages().to_vec(),
            session.goal().cloned(),
        );
        tracing::debug!(
            %request_id,
            messages = request.messages.len(),
            has_goal = request.goal.is_some(),
            "submitting context for analysis"
        );
        if let Err(err) = self.transport.send_analysis(request.clone()).await {
            session.record_service_error();
            tracing::error!(error = %err, "failed to send analysis request");
            return Err(err.into());
        }
        Ok(request)
    }

    /// Emits the started event and arms the timeout watchdog.
    async fn begin_watch(self: &Arc<Self>, request_id: RequestId) {
        self.emit(SessionEvent::AnalysisStarted { request_id }).await;

        let manager = Arc::clone(self);
        let timeout = self.analysis_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            manager.expire_request(request_id).await;
        });
    }

    /// Clears a request that never received a response.
    ///
    /// No-op for superseded or already-answered requests.
    async fn expire_request(&self, request_id: RequestId) {
        let fired = {
            let mut session = self.session.lock().await;
            session.expire_request(request_id)
        };
        if fired {
            tracing::warn!(%request_id, "analysis request timed out");
            self.emit(SessionEvent::AnalysisFailed {
                reason: format!(
                    "analysis timed out after {}s",
                    self.analysis_timeout.as_secs()
                ),
            })
            .await;
        }
    }

    /// Delivers an event to every live subscriber.
    ///
    /// Lossy by design: a full channel drops the event for that subscriber,
    /// a closed channel removes the subscription.
    async fn emit(&self, event: SessionEvent) {
        let senders: Vec<(SubscriberId, mpsc::Sender<SessionEvent>)> = {
            let subscribers = self.subscribers.lock().await;
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        for (id, tx) in senders {
            match tx.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::debug!(subscriber = %id, "subscriber channel full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    self.subscribers.lock().await.remove(&id);
                }
            }
        }
    }
}
