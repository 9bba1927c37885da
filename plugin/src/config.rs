use std::time::Duration;

use crate::net::ServerEndpoints;
use crate::ui::Theme;

/// Launch settings for the client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Stands in for the browser's page URL: its host picks the server, its
    /// `join`/`watch` query parameters pick the role.
    pub page_url: String,
    pub nickname: Option<String>,
    pub endpoints: ServerEndpoints,
    pub theme: Theme,
    /// How long a notice waits before showing, so the board repaints first.
    pub notice_delay: Duration,
}

impl ClientConfig {
    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = page_url.into();
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_endpoint(mut self, host: impl Into<String>, server_url: impl Into<String>) -> Self {
        self.endpoints = self.endpoints.with_endpoint(host, server_url);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_notice_delay(mut self, notice_delay: Duration) -> Self {
        self.notice_delay = notice_delay;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_url: "http://localhost:8000/".to_string(),
            nickname: None,
            endpoints: ServerEndpoints::default(),
            theme: Theme::default(),
            notice_delay: Duration::from_millis(50),
        }
    }
}
