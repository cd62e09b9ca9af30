//! WebSocket client for the Conversation Analysis Service.
//!
//! The client is a lifecycle-scoped resource: [`WsAnalysisClient::connect`]
//! performs the handshake and spawns a writer and a reader task; dropping
//! the handle closes the outbound channel, which ends the writer and shuts
//! the connection down. Inbound frames arrive on the returned
//! [`ServiceEvent`] receiver, starting with `Connected` and ending with
//! `Disconnected`.

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use async_trait::async_trait;

use crate::config::ServiceConfig;
use crate::ports::{AnalysisRequest, AnalysisTransport, ServiceEvent, TransportError};

use super::protocol::{ClientFrame, ServerFrame};

/// Connecting websocket implementation of the transport port.
pub struct WsAnalysisClient {
    outbound: mpsc::Sender<WsMessage>,
}

impl WsAnalysisClient {
    /// Connects to the analysis service.
    ///
    /// Returns the transport handle and the inbound event receiver. The
    /// receiver is primed with `Connected` and always terminates with
    /// `Disconnected`.
    ///
    /// # Errors
    ///
    /// - `ConnectTimeout` when the handshake does not complete within the
    ///   configured window
    /// - `Handshake` for any other connection failure
    pub async fn connect(
        config: &ServiceConfig,
        channel_capacity: usize,
    ) -> Result<(Self, mpsc::Receiver<ServiceEvent>), TransportError> {
        let connect = connect_async(config.url.as_str());
        let (stream, _response) = tokio::time::timeout(config.connect_timeout(), connect)
            .await
            .map_err(|_| TransportError::ConnectTimeout {
                secs: config.connect_timeout_secs,
            })?
            .map_err(|err| TransportError::handshake(err.to_string()))?;
        tracing::info!(url = %config.url, "websocket connection established");

        let (mut write, mut read) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::channel::<WsMessage>(channel_capacity);
        let (event_tx, event_rx) = mpsc::channel::<ServiceEvent>(channel_capacity);

        // Writer: drains the outbound channel until the handle is dropped,
        // then closes the socket.
        tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                if let Err(err) = write.send(frame).await {
                    tracing::error!(error = %err, "websocket send failed");
                    break;
                }
            }
            let _ = write.send(WsMessage::Close(None)).await;
        });

        // Reader: decodes frames into service events for the bridge.
        tokio::spawn(async move {
            let _ = event_tx.send(ServiceEvent::Connected).await;
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(WsMessage::Text(text)) => {
                        match serde_json::from_str::<ServerFrame>(&text) {
                            Ok(frame) => {
                                if event_tx.send(frame.into()).await.is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "unrecognized frame from service");
                            }
                        }
                    }
                    Ok(WsMessage::Close(_)) => break,
                    // Ping/pong are answered by the protocol layer; binary
                    // frames are not part of the contract.
                    Ok(_) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "websocket read failed");
                        break;
                    }
                }
            }
            let _ = event_tx.send(ServiceEvent::Disconnected).await;
        });

        Ok((Self { outbound }, event_rx))
    }

    async fn send_frame(&self, frame: &ClientFrame) -> Result<(), TransportError> {
        let json =
            serde_json::to_string(frame).map_err(|err| TransportError::encode(err.to_string()))?;
        self.outbound
            .send(WsMessage::Text(json))
            .await
            .map_err(|_| TransportError::Closed)
    }
}

#[async_trait]
impl AnalysisTransport for WsAnalysisClient {
    async fn send_analysis(&self, request: AnalysisRequest) -> Result<(), TransportError> {
        self.send_frame(&ClientFrame::chat_message(&request)).await
    }

    async fn request_default_options(&self) -> Result<(), TransportError> {
        self.send_frame(&ClientFrame::RequestParsedOptions).await
    }
}
