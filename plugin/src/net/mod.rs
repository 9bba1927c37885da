//! Networking
//!
//! Server URL resolution and the single WebSocket connection to the game
//! server. No Bevy dependencies; the plugin wraps these in resources.

mod endpoint;
mod socket;

pub use endpoint::ServerEndpoints;
pub use socket::{CLOSE_ABNORMAL, CLOSE_NO_STATUS, GameSocket, ReadyState, SocketError, SocketEvent};

#[cfg(test)]
pub(crate) use socket::SocketCommand;
