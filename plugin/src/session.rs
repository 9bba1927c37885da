//! Session inputs derived from the page URL the client was launched with.

use url::Url;

use crate::error::ClientError;
use crate::protocol::ClientEvent;

/// What this client is allowed to do in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionRole {
    /// No `join`/`watch` in the URL: the server starts a new game.
    Creator,
    /// `join` in the URL: second player of an existing game.
    Player,
    /// `watch` without `join`: read-only.
    Spectator,
}

impl SessionRole {
    pub fn can_play(self) -> bool {
        !matches!(self, SessionRole::Spectator)
    }
}

/// Link targets handed out by the server after `init`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLinks {
    pub join: Url,
    pub watch: Url,
}

/// Parsed page URL, the native stand-in for `window.location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
    host: String,
    join: Option<String>,
    watch: Option<String>,
}

impl PageLocation {
    pub fn parse(page_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(page_url).map_err(|source| ClientError::InvalidPageUrl {
            url: page_url.to_string(),
            source,
        })?;

        let Some(hostname) = url.host_str() else {
            return Err(ClientError::MissingHost(page_url.to_string()));
        };

        // Same shape as `location.host`: the port only shows up when it isn't the scheme default.
        let host = match url.port() {
            Some(port) => format!("{}:{}", hostname, port),
            None => hostname.to_string(),
        };

        let join = query_value(&url, "join");
        let watch = query_value(&url, "watch");

        Ok(Self {
            url,
            host,
            join,
            watch,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn join(&self) -> Option<&str> {
        self.join.as_deref()
    }

    pub fn watch(&self) -> Option<&str> {
        self.watch.as_deref()
    }

    pub fn role(&self) -> SessionRole {
        match (&self.join, &self.watch) {
            (Some(_), _) => SessionRole::Player,
            (None, Some(_)) => SessionRole::Spectator,
            (None, None) => SessionRole::Creator,
        }
    }

    /// The event sent right after the connection opens.
    pub fn init_event(&self, nickname: Option<&str>) -> ClientEvent {
        ClientEvent::Init {
            nickname: nickname
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            join: self.join.clone(),
            watch: self.watch.clone(),
        }
    }

    pub fn share_links(&self, join: &str, watch: &str) -> ShareLinks {
        ShareLinks {
            join: self.link_with("join", join),
            watch: self.link_with("watch", watch),
        }
    }

    fn link_with(&self, key: &str, id: &str) -> Url {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.set_query(None);
        url.query_pairs_mut().append_pair(key, id);
        url
    }
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_keeps_explicit_port() {
        let page = PageLocation::parse("http://localhost:8000/").unwrap();
        assert_eq!(page.host(), "localhost:8000");

        let page = PageLocation::parse("https://lucanijim.github.io/connect4/").unwrap();
        assert_eq!(page.host(), "lucanijim.github.io");

        let page = PageLocation::parse("https://lucanijim.github.io:443/").unwrap();
        assert_eq!(page.host(), "lucanijim.github.io");
    }

    #[test]
    fn test_invalid_page_url() {
        assert!(matches!(
            PageLocation::parse("localhost 8000"),
            Err(ClientError::InvalidPageUrl { .. })
        ));
        assert!(matches!(
            PageLocation::parse("unix:/run/connect4.socket"),
            Err(ClientError::MissingHost(_))
        ));
    }

    #[test]
    fn test_roles_from_query() {
        let role = |url: &str| PageLocation::parse(url).unwrap().role();

        assert_eq!(role("http://localhost:8000/"), SessionRole::Creator);
        assert_eq!(role("http://localhost:8000/?join=abc"), SessionRole::Player);
        assert_eq!(role("http://localhost:8000/?watch=xyz"), SessionRole::Spectator);
        assert_eq!(role("http://localhost:8000/?watch=xyz&join=abc"), SessionRole::Player);
        assert_eq!(role("http://localhost:8000/?utm=1"), SessionRole::Creator);
    }

    #[test]
    fn test_spectators_cannot_play() {
        assert!(SessionRole::Creator.can_play());
        assert!(SessionRole::Player.can_play());
        assert!(!SessionRole::Spectator.can_play());
    }

    #[test]
    fn test_init_event_carries_query_ids() {
        let page = PageLocation::parse("http://localhost:8000/?join=abc").unwrap();
        assert_eq!(
            page.init_event(Some("  ada ")),
            ClientEvent::Init {
                nickname: Some("ada".to_string()),
                join: Some("abc".to_string()),
                watch: None,
            }
        );

        let page = PageLocation::parse("http://localhost:8000/").unwrap();
        assert_eq!(
            page.init_event(Some("")),
            ClientEvent::Init {
                nickname: None,
                join: None,
                watch: None,
            }
        );
    }

    #[test]
    fn test_share_links_replace_query() {
        let page = PageLocation::parse("http://localhost:8000/play/?watch=old#board").unwrap();
        let links = page.share_links("abc", "xyz");

        assert_eq!(links.join.as_str(), "http://localhost:8000/play/?join=abc");
        assert_eq!(links.watch.as_str(), "http://localhost:8000/play/?watch=xyz");
    }
}
