use thiserror::Error;

/// Errors raised while setting up the client, before any socket exists.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid page URL '{url}': {source}")]
    InvalidPageUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Page URL '{0}' has no host")]
    MissingHost(String),
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),
    #[error("Invalid server URL '{url}' for host {host}: {source}")]
    InvalidServerUrl {
        host: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}
