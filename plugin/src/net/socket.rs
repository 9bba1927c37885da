//! Game Socket
//!
//! One WebSocket connection, driven by tokio-tungstenite on its own thread.
//! The UI thread pushes commands in and drains `SocketEvent`s out; nothing
//! here blocks the caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, mpsc as std_mpsc};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use url::Url;

use crate::dispatch::EventSink;
use crate::protocol::{self, ClientEvent};

/// Close code reported when the connection ends without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// Close code reported when a close frame carries no status.
pub const CLOSE_NO_STATUS: u16 = 1005;

/// Connection ready states, matching the browser API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ReadyState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

/// Events pushed from the connection thread to the UI thread
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    Open,
    Message(String),
    Error(String),
    Closed { code: u16, reason: String },
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SocketCommand {
    Text(String),
    Close { code: u16, reason: String },
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("WebSocket is not open")]
    NotOpen,
    #[error("Connection task has stopped")]
    Disconnected,
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),
}

/// Shared between the handle and the connection thread.
#[derive(Clone)]
struct Shared {
    ready_state: Arc<AtomicU8>,
    events: std_mpsc::Sender<SocketEvent>,
}

impl Shared {
    fn set_state(&self, state: ReadyState) {
        self.ready_state.store(state as u8, Ordering::SeqCst);
    }

    fn dispatch(&self, event: SocketEvent) {
        log::debug!("[WebSocket] Dispatching {:?}", event);
        if self.events.send(event).is_err() {
            log::warn!("[WebSocket] Event receiver dropped");
        }
    }

    /// Report a failure and mark the connection as closed.
    fn fail(&self, message: String, reason: &str) {
        self.set_state(ReadyState::Closed);
        self.dispatch(SocketEvent::Error(message));
        self.dispatch(SocketEvent::Closed {
            code: CLOSE_ABNORMAL,
            reason: reason.to_string(),
        });
    }
}

/// Handle to the single game connection.
pub struct GameSocket {
    url: Url,
    commands: mpsc::UnboundedSender<SocketCommand>,
    ready_state: Arc<AtomicU8>,
    events: Mutex<std_mpsc::Receiver<SocketEvent>>,
}

impl GameSocket {
    /// Start connecting to `url`. Returns immediately; progress arrives as `SocketEvent`s.
    pub fn connect(url: Url) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel::<SocketCommand>();
        let (event_tx, event_rx) = std_mpsc::channel::<SocketEvent>();
        let ready_state = Arc::new(AtomicU8::new(ReadyState::Connecting as u8));

        let shared = Shared {
            ready_state: ready_state.clone(),
            events: event_tx,
        };
        let target = url.clone();

        // Spawn on a separate thread with its own tokio runtime
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(2)
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("[WebSocket] Failed to create runtime: {}", e);
                    shared.fail(format!("Failed to create runtime: {}", e), "Runtime failed");
                    return;
                }
            };

            rt.block_on(run_connection(target, shared, command_rx));
        });

        Self {
            url,
            commands: command_tx,
            ready_state,
            events: Mutex::new(event_rx),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// A handle wired to in-memory channels instead of a connection, already open.
    #[cfg(test)]
    pub(crate) fn loopback() -> (
        Self,
        std_mpsc::Sender<SocketEvent>,
        mpsc::UnboundedReceiver<SocketCommand>,
    ) {
        let (command_tx, command_rx) = mpsc::unbounded_channel::<SocketCommand>();
        let (event_tx, event_rx) = std_mpsc::channel::<SocketEvent>();
        let socket = Self {
            url: Url::parse("ws://127.0.0.1/").unwrap(),
            commands: command_tx,
            ready_state: Arc::new(AtomicU8::new(ReadyState::Open as u8)),
            events: Mutex::new(event_rx),
        };
        (socket, event_tx, command_rx)
    }

    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.ready_state.load(Ordering::SeqCst))
    }

    /// Queue a text frame.
    pub fn send_text(&self, text: String) -> Result<(), SocketError> {
        if self.ready_state() != ReadyState::Open {
            return Err(SocketError::NotOpen);
        }
        self.commands
            .send(SocketCommand::Text(text))
            .map_err(|_| SocketError::Disconnected)
    }

    pub fn send_event(&self, event: &ClientEvent) -> Result<(), SocketError> {
        let text = protocol::encode(event)?;
        self.send_text(text)
    }

    /// Start the closing handshake. Does nothing once closing has begun.
    pub fn close_with(&self, code: u16, reason: impl Into<String>) {
        match self.ready_state() {
            ReadyState::Closing | ReadyState::Closed => return,
            ReadyState::Connecting | ReadyState::Open => {}
        }

        self.ready_state
            .store(ReadyState::Closing as u8, Ordering::SeqCst);
        log::info!("[WebSocket] Closing with code {}", code);

        let command = SocketCommand::Close {
            code,
            reason: reason.into(),
        };
        if self.commands.send(command).is_err() {
            log::warn!("[WebSocket] Connection task already stopped");
        }
    }

    /// Try to receive the next event without blocking
    pub fn try_recv(&self) -> Option<SocketEvent> {
        self.events.lock().ok()?.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SocketEvent> {
        self.events.lock().ok()?.recv_timeout(timeout).ok()
    }
}

impl EventSink for GameSocket {
    fn send(&self, event: ClientEvent) {
        if let Err(e) = self.send_event(&event) {
            log::error!("[WebSocket] Failed to send {:?}: {}", event, e);
        }
    }

    fn close(&self, code: u16, reason: &str) {
        self.close_with(code, reason);
    }
}

async fn run_connection(
    url: Url,
    shared: Shared,
    mut commands: mpsc::UnboundedReceiver<SocketCommand>,
) {
    log::info!("[WebSocket] Connecting to {}", url);

    if url.scheme() == "wss" {
        match rustls::crypto::ring::default_provider().install_default() {
            Ok(()) => log::debug!("[WebSocket] Installed ring crypto provider"),
            Err(_) => log::debug!("[WebSocket] Crypto provider already installed"),
        }
    }

    let ws_stream = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((stream, response)) => {
            log::info!(
                "[WebSocket] Connected successfully (status: {})",
                response.status()
            );
            stream
        }
        Err(e) => {
            log::error!("[WebSocket] Connection failed: {}", e);
            shared.fail(format!("Connection failed: {}", e), "Connection failed");
            return;
        }
    };

    // A close requested while still connecting wins over the open.
    let opened = shared
        .ready_state
        .compare_exchange(
            ReadyState::Connecting as u8,
            ReadyState::Open as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_ok();
    if opened {
        shared.dispatch(SocketEvent::Open);
    }

    let (mut write, mut read) = ws_stream.split();

    // Spawn task to forward outgoing frames
    let send_task = tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            match command {
                SocketCommand::Text(text) => {
                    log::debug!("[WebSocket] Sending: {}", text);
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        log::error!("[WebSocket] Send error: {}", e);
                        break;
                    }
                }
                SocketCommand::Close { code, reason } => {
                    let frame = CloseFrame {
                        code: CloseCode::from(code),
                        reason: reason.into(),
                    };
                    if let Err(e) = write.send(Message::Close(Some(frame))).await {
                        log::error!("[WebSocket] Close error: {}", e);
                    }
                    break;
                }
            }
        }
    });

    // Read incoming frames until the connection ends. After a close frame the
    // loop keeps polling so tungstenite can flush its close reply.
    let mut close_frame: Option<(u16, String)> = None;
    let mut failed = false;
    while let Some(msg_result) = read.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                log::debug!("[WebSocket] Received: {}", text.as_str());
                shared.dispatch(SocketEvent::Message(text.to_string()));
            }
            Ok(Message::Binary(data)) => {
                log::warn!("[WebSocket] Ignoring binary frame ({} bytes)", data.len());
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Handled by tungstenite
            }
            Ok(Message::Close(frame)) => {
                let (code, reason) = frame
                    .map(|f| (f.code.into(), f.reason.to_string()))
                    .unwrap_or((CLOSE_NO_STATUS, String::new()));
                log::info!("[WebSocket] Received close: {} {}", code, reason);
                shared.set_state(ReadyState::Closing);
                close_frame = Some((code, reason));
            }
            Ok(Message::Frame(_)) => {}
            Err(e) if close_frame.is_some() => {
                log::debug!("[WebSocket] Stream ended after close: {}", e);
                break;
            }
            Err(e) => {
                log::error!("[WebSocket] Read error: {}", e);
                shared.fail(e.to_string(), "Connection error");
                failed = true;
                break;
            }
        }
    }

    if !failed {
        let (code, reason) = close_frame
            .unwrap_or_else(|| (CLOSE_ABNORMAL, "Connection dropped".to_string()));
        shared.set_state(ReadyState::Closed);
        shared.dispatch(SocketEvent::Closed { code, reason });
    }

    send_task.abort();
    log::info!("[WebSocket] Connection ended");
}
