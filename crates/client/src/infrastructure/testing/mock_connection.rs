//! Mock push-channel connection
//!
//! Lets tests drive transport events and inbound messages and assert
//! outbound intents.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use loreline_protocol::{ClientMessage, ServerMessage};

use crate::ports::outbound::{
    ConnectionError, GameConnectionPort, TransportEvent,
};

#[derive(Default)]
struct State {
    connect_calls: u32,
    rejecting_sends: bool,
    sent: Vec<ClientMessage>,
    on_transport_event: Option<Box<dyn FnMut(TransportEvent) + Send + 'static>>,
    on_message: Option<Box<dyn FnMut(ServerMessage) + Send + 'static>>,
}

/// Mock `GameConnectionPort` for tests
#[derive(Clone, Default)]
pub struct MockGameConnection {
    state: Arc<Mutex<State>>,
}

impl MockGameConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `send` calls fail as if disconnected
    pub fn reject_sends(&self) {
        self.state.lock().expect("mock state").rejecting_sends = true;
    }

    /// Drive a transport lifecycle event into the registered callback
    pub fn emit_transport_event(&self, event: TransportEvent) {
        let mut state = self.state.lock().expect("mock state");
        if let Some(callback) = state.on_transport_event.as_mut() {
            callback(event);
        }
    }

    /// Drive an inbound server message into the registered callback
    pub fn emit_message(&self, message: ServerMessage) {
        let mut state = self.state.lock().expect("mock state");
        if let Some(callback) = state.on_message.as_mut() {
            callback(message);
        }
    }

    pub fn sent_messages(&self) -> Vec<ClientMessage> {
        self.state.lock().expect("mock state").sent.clone()
    }

    pub fn connect_calls(&self) -> u32 {
        self.state.lock().expect("mock state").connect_calls
    }
}

#[async_trait]
impl GameConnectionPort for MockGameConnection {
    async fn connect(&self, _auth_token: &str) {
        self.state.lock().expect("mock state").connect_calls += 1;
    }

    async fn disconnect(&self) {
        self.state.lock().expect("mock state").rejecting_sends = true;
    }

    async fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        let mut state = self.state.lock().expect("mock state");
        if state.rejecting_sends {
            return Err(ConnectionError::NotConnected);
        }
        state.sent.push(message);
        Ok(())
    }

    async fn set_on_transport_event(
        &self,
        callback: Box<dyn FnMut(TransportEvent) + Send + 'static>,
    ) {
        self.state.lock().expect("mock state").on_transport_event = Some(callback);
    }

    async fn set_on_message(&self, callback: Box<dyn FnMut(ServerMessage) + Send + 'static>) {
        self.state.lock().expect("mock state").on_message = Some(callback);
    }
}
