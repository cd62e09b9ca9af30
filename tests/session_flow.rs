//! Integration tests for the conversation session flow.
//!
//! These tests verify the end-to-end loop:
//! 1. Client-authored messages accumulate in the transcript and context
//! 2. Running an analysis ships the full context (plus goal) once
//! 3. Inbound service events update results, transcript, and pending state
//! 4. Subscribers observe the transitions as session events
//!
//! Uses an in-memory transport to test the flow without a live service.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use saleschat::application::{SessionManager, SessionManagerError};
use saleschat::domain::analysis::AnalysisResult;
use saleschat::domain::conversation::Sender;
use saleschat::domain::session::{Connectivity, SessionError, SessionEvent};
use saleschat::ports::{AnalysisRequest, AnalysisTransport, ServiceEvent, TransportError};

/// In-memory transport that records every outbound call.
#[derive(Default)]
struct TestTransport {
    sent: Mutex<Vec<AnalysisRequest>>,
    option_requests: AtomicUsize,
}

impl TestTransport {
    fn sent(&self) -> Vec<AnalysisRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisTransport for TestTransport {
    async fn send_analysis(&self, request: AnalysisRequest) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(request);
        Ok(())
    }

    async fn request_default_options(&self) -> Result<(), TransportError> {
        self.option_requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn new_manager() -> (Arc<SessionManager<SharedTransport>>, Arc<TestTransport>) {
    // The manager owns the transport, so observations go through a second
    // handle into the same recording state.
    let transport = Arc::new(TestTransport::default());
    let manager = Arc::new(SessionManager::new(
        SharedTransport(Arc::clone(&transport)),
        Duration::from_secs(30),
    ));
    (manager, transport)
}

/// Wrapper so the recording state can be observed from outside the manager.
struct SharedTransport(Arc<TestTransport>);

#[async_trait]
impl AnalysisTransport for SharedTransport {
    async fn send_analysis(&self, request: AnalysisRequest) -> Result<(), TransportError> {
        self.0.send_analysis(request).await
    }

    async fn request_default_options(&self) -> Result<(), TransportError> {
        self.0.request_default_options().await
    }
}

#[tokio::test]
async fn full_conversation_cycle() {
    let (manager, transport) = new_manager();
    let (_id, mut events) = manager.subscribe().await;

    // Connecting triggers exactly one default-options request.
    manager.handle_service_event(ServiceEvent::Connected).await;
    assert_eq!(manager.connectivity().await, Connectivity::Connected);
    assert_eq!(transport.option_requests.load(Ordering::SeqCst), 1);

    // Two client-authored messages accumulate.
    manager
        .append_message("Hi there", Sender::Customer)
        .await
        .unwrap();
    manager
        .append_message("How can I help?", Sender::Agent)
        .await
        .unwrap();
    assert_eq!(manager.context_len().await, 2);

    // The analysis run ships the full context in insertion order.
    manager.run_analysis().await.unwrap();
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].messages.len(), 2);
    assert_eq!(sent[0].messages[0].text(), "Hi there");
    assert_eq!(sent[0].messages[1].text(), "How can I help?");
    assert!(manager.is_pending().await);

    // The service answers with a fresh result set.
    manager
        .handle_service_event(ServiceEvent::ParsedOptions(vec![AnalysisResult::new(
            "Offer discount",
            0.82,
        )]))
        .await;

    let results = manager.results().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].option, "Offer discount");
    assert!(!manager.is_pending().await);

    // Subscribers saw the whole sequence in order.
    let mut observed = Vec::new();
    while let Ok(event) = events.try_recv() {
        observed.push(event);
    }
    assert!(matches!(
        observed[0],
        SessionEvent::ConnectivityChanged(Connectivity::Connected)
    ));
    assert!(matches!(observed[1], SessionEvent::MessageAppended(_)));
    assert!(matches!(observed[2], SessionEvent::MessageAppended(_)));
    assert!(matches!(observed[3], SessionEvent::AnalysisStarted { .. }));
    assert!(matches!(observed[4], SessionEvent::ResultsReplaced(_)));
}

#[tokio::test]
async fn goal_change_with_context_reanalyzes_with_goal_attached() {
    let (manager, transport) = new_manager();
    manager
        .append_message("Looking at the premium plan", Sender::Customer)
        .await
        .unwrap();

    manager.set_goal("close the deal").await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].goal.as_ref().unwrap().as_str(), "close the deal");
    assert_eq!(sent[0].messages.len(), 1);
}

#[tokio::test]
async fn new_run_supersedes_the_pending_one() {
    let (manager, transport) = new_manager();
    manager.append_message("Hi", Sender::Customer).await.unwrap();

    manager.run_analysis().await.unwrap();
    manager.run_analysis().await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_ne!(sent[0].request_id, sent[1].request_id);

    // Only one answer is expected; it resolves the superseding request.
    manager
        .handle_service_event(ServiceEvent::Reply("will do".to_string()))
        .await;
    assert!(!manager.is_pending().await);
}

#[tokio::test]
async fn service_reply_lands_in_transcript_but_not_context() {
    let (manager, _transport) = new_manager();
    manager.append_message("Hi", Sender::Customer).await.unwrap();
    manager.run_analysis().await.unwrap();

    manager
        .handle_service_event(ServiceEvent::Reply("Suggest the annual plan".to_string()))
        .await;

    let transcript = manager.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].sender(), Sender::Service);
    assert_eq!(manager.context_len().await, 1);
}

#[tokio::test]
async fn empty_input_is_rejected_without_side_effects() {
    let (manager, transport) = new_manager();

    let message = manager.append_message("   ", Sender::Customer).await;
    let goal = manager.set_goal("").await;
    let run = manager.run_analysis().await;

    assert!(matches!(
        message,
        Err(SessionManagerError::Session(SessionError::EmptyMessage))
    ));
    assert!(matches!(
        goal,
        Err(SessionManagerError::Session(SessionError::EmptyGoal))
    ));
    assert!(matches!(
        run,
        Err(SessionManagerError::Session(SessionError::NoContext))
    ));
    assert!(transport.sent().is_empty());
    assert!(manager.transcript().await.is_empty());
}
