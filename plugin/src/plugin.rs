//! Connect Four Plugin for Bevy
//!
//! Resolves the server, opens the game connection and wires the board UI to it.

use std::time::Duration;

use bevy::prelude::*;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::GameSocket;
use crate::session::PageLocation;
use crate::ui::*;

/// Bevy plugin for a networked Connect Four client.
///
/// ## Usage
///
/// ```ignore
/// let plugin = Connect4Plugin::new(ClientConfig::default())?;
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(plugin)
///     .run();
/// ```
pub struct Connect4Plugin {
    session: Session,
    server_url: Url,
    palette: Palette,
    notice_delay: Duration,
}

impl Connect4Plugin {
    /// Validate the launch configuration. An unknown page host fails here,
    /// before any connection is attempted.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let page = PageLocation::parse(&config.page_url)?;
        let server_url = config.endpoints.resolve(page.host())?;

        log::info!(
            "Page {} ({:?}) uses server {}",
            page.url(),
            page.role(),
            server_url
        );

        Ok(Self {
            session: Session {
                page,
                nickname: config.nickname,
            },
            server_url,
            palette: Palette::from_theme(&config.theme),
            notice_delay: config.notice_delay,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Plugin for Connect4Plugin {
    fn build(&self, app: &mut App) {
        log::info!("Building Connect Four plugin...");

        let socket = GameSocket::connect(self.server_url.clone());
        log::info!("Connecting to game server at {}", socket.url());

        app.insert_resource(SocketResource(socket))
            .insert_resource(self.session.clone())
            .insert_resource(self.palette.clone())
            .insert_resource(Notices::new(self.notice_delay))
            .init_resource::<BoardState>()
            .init_resource::<ShareLinkState>()
            .add_systems(Startup, spawn_board)
            .add_systems(
                Update,
                (
                    process_socket_events,
                    handle_board_clicks,
                    paint_board,
                    update_share_links,
                    show_notices,
                )
                    .chain(),
            );

        log::info!("Connect Four plugin configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resolves_server() {
        let plugin = Connect4Plugin::new(
            ClientConfig::default().with_page_url("http://localhost:8000/?join=abc"),
        )
        .unwrap();

        assert_eq!(plugin.server_url().as_str(), "ws://localhost:8001/");
        assert_eq!(plugin.session().page.join(), Some("abc"));
    }

    #[test]
    fn test_new_rejects_unknown_host() {
        let result = Connect4Plugin::new(
            ClientConfig::default().with_page_url("http://example.com/"),
        );
        assert!(matches!(result, Err(ClientError::UnsupportedHost(h)) if h == "example.com"));
    }

    #[test]
    fn test_custom_endpoint() {
        let plugin = Connect4Plugin::new(
            ClientConfig::default()
                .with_page_url("http://127.0.0.1:9000/")
                .with_endpoint("127.0.0.1:9000", "ws://127.0.0.1:9001/")
                .with_nickname("ada"),
        )
        .unwrap();

        assert_eq!(plugin.server_url().as_str(), "ws://127.0.0.1:9001/");
        assert_eq!(plugin.session().nickname.as_deref(), Some("ada"));
    }
}
