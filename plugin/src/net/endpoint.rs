//! Server URL resolution
//!
//! The client only talks to servers it knows about: the page host is matched
//! exactly against a table, and anything unknown is a configuration error.

use std::collections::HashMap;

use url::Url;

use crate::error::ClientError;

/// Known deployments, keyed by page host (`host[:port]`).
static DEFAULT_ENDPOINTS: once_cell::sync::Lazy<ServerEndpoints> = once_cell::sync::Lazy::new(|| {
    ServerEndpoints::empty()
        .with_endpoint("lucanijim.github.io", "wss://websockets-tutorial.koyeb.app/")
        .with_endpoint("localhost:8000", "ws://localhost:8001/")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerEndpoints {
    hosts: HashMap<String, String>,
}

impl ServerEndpoints {
    pub fn empty() -> Self {
        Self {
            hosts: HashMap::new(),
        }
    }

    /// Add or replace the server URL used for pages served from `host`.
    pub fn with_endpoint(mut self, host: impl Into<String>, server_url: impl Into<String>) -> Self {
        self.hosts.insert(host.into(), server_url.into());
        self
    }

    /// Resolve the WebSocket URL for a page host. No fallback.
    pub fn resolve(&self, host: &str) -> Result<Url, ClientError> {
        let Some(server_url) = self.hosts.get(host) else {
            log::error!("No server configured for host {}", host);
            return Err(ClientError::UnsupportedHost(host.to_string()));
        };

        Url::parse(server_url).map_err(|source| ClientError::InvalidServerUrl {
            host: host.to_string(),
            url: server_url.clone(),
            source,
        })
    }
}

impl Default for ServerEndpoints {
    fn default() -> Self {
        DEFAULT_ENDPOINTS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_hosts() {
        let endpoints = ServerEndpoints::default();

        assert_eq!(
            endpoints.resolve("lucanijim.github.io").unwrap().as_str(),
            "wss://websockets-tutorial.koyeb.app/"
        );
        assert_eq!(
            endpoints.resolve("localhost:8000").unwrap().as_str(),
            "ws://localhost:8001/"
        );
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let endpoints = ServerEndpoints::default();

        for host in ["localhost", "localhost:8001", "LOCALHOST:8000", "example.com", ""] {
            match endpoints.resolve(host) {
                Err(ClientError::UnsupportedHost(h)) => assert_eq!(h, host),
                other => panic!("expected unsupported host for {:?}, got {:?}", host, other),
            }
        }
    }

    #[test]
    fn test_with_endpoint_adds_host() {
        let endpoints = ServerEndpoints::empty().with_endpoint("127.0.0.1:9000", "ws://127.0.0.1:9001/");

        assert!(endpoints.resolve("127.0.0.1:9000").is_ok());
        assert!(endpoints.resolve("localhost:8000").is_err());
    }

    #[test]
    fn test_invalid_server_url() {
        let endpoints = ServerEndpoints::empty().with_endpoint("bad", "not a url");
        assert!(matches!(
            endpoints.resolve("bad"),
            Err(ClientError::InvalidServerUrl { .. })
        ));
    }
}
