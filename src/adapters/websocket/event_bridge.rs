//! Bridges the service event stream into the session manager.
//!
//! The websocket client produces [`ServiceEvent`]s; the session manager
//! consumes them sequentially. This task is the only consumer of the
//! receiver, so events are applied in arrival order. It terminates after
//! forwarding `Disconnected`, which closes out the connection lifecycle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::SessionManager;
use crate::ports::{AnalysisTransport, ServiceEvent};

/// Spawns the task that feeds service events into the session manager.
pub fn attach_session_bridge<T>(
    manager: Arc<SessionManager<T>>,
    mut events: mpsc::Receiver<ServiceEvent>,
) -> JoinHandle<()>
where
    T: AnalysisTransport + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let last = matches!(event, ServiceEvent::Disconnected);
            manager.handle_service_event(event).await;
            if last {
                break;
            }
        }
        tracing::debug!("service event bridge stopped");
    })
}
