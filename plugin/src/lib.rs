//! # Connect Four client for Bevy
//!
//! A native client for a server-authoritative Connect Four game. The board
//! is drawn with Bevy UI, clicks become `play` events on a WebSocket, and
//! whatever the server pushes back (moves, wins, errors, share links) is
//! reflected on screen.
//!
//! ## Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_connect4::{ClientConfig, Connect4Plugin};
//!
//! fn main() -> Result<(), bevy_connect4::ClientError> {
//!     let plugin = Connect4Plugin::new(
//!         ClientConfig::default().with_page_url("http://localhost:8000/?join=abc"),
//!     )?;
//!
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(plugin)
//!         .add_systems(Startup, |mut commands: Commands| {
//!             commands.spawn(Camera2d);
//!         })
//!         .run();
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod dispatch;
pub mod net;
pub mod plugin;
pub mod protocol;
pub mod session;
pub mod ui;

mod config;
mod error;

pub use config::ClientConfig;
pub use error::ClientError;
pub use plugin::Connect4Plugin;
