//! Desktop WebSocket client using tokio-tungstenite
//!
//! Owns the reconnect loop: the narrator's push transport drops
//! unpredictably, so a lost connection is retried with exponential backoff
//! while the application is told `Reconnecting`. Room membership is not
//! preserved by the transport, which is why every successful (re)connection
//! is reported upward as a fresh `Connected`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use loreline_protocol::{ClientMessage, ServerMessage};

use crate::ports::outbound::{
    ConnectionError, GameConnectionPort, TransportEvent,
};

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(15);
const MAX_CONSECUTIVE_FAILURES: u32 = 5;
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

type Callback<T> = Arc<Mutex<Option<Box<dyn FnMut(T) + Send + 'static>>>>;
type SenderSlot = Arc<Mutex<Option<mpsc::Sender<ClientMessage>>>>;

/// WebSocket adapter for the narrator's push channel
pub struct WsConnection {
    url: String,
    tx: SenderSlot,
    on_message: Callback<ServerMessage>,
    on_transport_event: Callback<TransportEvent>,
    shutdown: Mutex<Option<CancellationToken>>,
}

impl WsConnection {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tx: Arc::new(Mutex::new(None)),
            on_message: Arc::new(Mutex::new(None)),
            on_transport_event: Arc::new(Mutex::new(None)),
            shutdown: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GameConnectionPort for WsConnection {
    async fn connect(&self, auth_token: &str) {
        // restart cleanly if a previous loop is still running
        if let Some(token) = self.shutdown.lock().await.take() {
            token.cancel();
        }
        let token = CancellationToken::new();
        *self.shutdown.lock().await = Some(token.clone());

        let url = if auth_token.is_empty() {
            self.url.clone()
        } else {
            format!("{}?token={}", self.url, auth_token)
        };
        tokio::spawn(run_loop(
            url,
            Arc::clone(&self.tx),
            Arc::clone(&self.on_message),
            Arc::clone(&self.on_transport_event),
            token,
        ));
    }

    async fn disconnect(&self) {
        if let Some(token) = self.shutdown.lock().await.take() {
            token.cancel();
        }
        self.tx.lock().await.take();
    }

    async fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        // clone the sender to avoid holding the lock across the await
        let tx = { self.tx.lock().await.clone() };
        match tx {
            Some(tx) => tx
                .send(message)
                .await
                .map_err(|error| ConnectionError::SendFailed(error.to_string())),
            None => Err(ConnectionError::NotConnected),
        }
    }

    async fn set_on_transport_event(
        &self,
        callback: Box<dyn FnMut(TransportEvent) + Send + 'static>,
    ) {
        *self.on_transport_event.lock().await = Some(callback);
    }

    async fn set_on_message(&self, callback: Box<dyn FnMut(ServerMessage) + Send + 'static>) {
        *self.on_message.lock().await = Some(callback);
    }
}

async fn run_loop(
    url: String,
    tx_slot: SenderSlot,
    on_message: Callback<ServerMessage>,
    on_transport_event: Callback<TransportEvent>,
    token: CancellationToken,
) {
    let mut failures: u32 = 0;
    loop {
        if token.is_cancelled() {
            return;
        }
        match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                failures = 0;
                tracing::info!(%url, "connected to narrator");
                emit(&on_transport_event, TransportEvent::Connected).await;

                run_session(stream, &tx_slot, &on_message, &token).await;
                tx_slot.lock().await.take();

                if token.is_cancelled() {
                    return;
                }
                tracing::info!("connection lost, retrying");
                emit(&on_transport_event, TransportEvent::Reconnecting).await;
            }
            Err(error) => {
                failures += 1;
                tracing::warn!(%error, attempt = failures, "connect attempt failed");
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    emit(&on_transport_event, TransportEvent::Disconnected).await;
                    return;
                }
            }
        }

        let delay = backoff(failures);
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

async fn run_session(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    tx_slot: &SenderSlot,
    on_message: &Callback<ServerMessage>,
    token: &CancellationToken,
) {
    let (mut write, mut read) = stream.split();
    let (tx, mut rx) = mpsc::channel::<ClientMessage>(32);
    *tx_slot.lock().await = Some(tx);

    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // the first tick completes immediately
    heartbeat.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                let _ = write.send(WsMessage::Close(None)).await;
                return;
            }
            outbound = rx.recv() => {
                let Some(message) = outbound else { return };
                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(error) => {
                        tracing::error!(%error, "failed to serialize outbound message");
                        continue;
                    }
                };
                if let Err(error) = write.send(WsMessage::Text(json)).await {
                    tracing::error!(%error, "failed to send message");
                    return;
                }
            }
            _ = heartbeat.tick() => {
                if let Ok(json) = serde_json::to_string(&ClientMessage::Heartbeat) {
                    if write.send(WsMessage::Text(json)).await.is_err() {
                        return;
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        match serde_json::from_str::<ServerMessage>(&text) {
                            Ok(ServerMessage::Pong) => {}
                            Ok(message) => dispatch(on_message, message).await,
                            Err(error) => {
                                tracing::warn!(%error, "failed to parse server message");
                            }
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) => {
                        tracing::info!("server closed connection");
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        tracing::error!(%error, "websocket error");
                        return;
                    }
                    None => return,
                }
            }
        }
    }
}

async fn emit(slot: &Callback<TransportEvent>, event: TransportEvent) {
    let mut guard = slot.lock().await;
    if let Some(callback) = guard.as_mut() {
        callback(event);
    }
}

async fn dispatch(slot: &Callback<ServerMessage>, message: ServerMessage) {
    let mut guard = slot.lock().await;
    if let Some(callback) = guard.as_mut() {
        callback(message);
    }
}

fn backoff(failures: u32) -> Duration {
    let exp = failures.min(5);
    (INITIAL_BACKOFF * 2u32.pow(exp)).min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff(0), Duration::from_millis(500));
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(3), Duration::from_secs(4));
        assert_eq!(backoff(10), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_send_without_connection_errors() {
        let connection = WsConnection::new("ws://127.0.0.1:9/ws");
        let result = connection.send(ClientMessage::Heartbeat).await;
        assert!(matches!(result, Err(ConnectionError::NotConnected)));
    }
}
