//! Error taxonomy shared by every component.
//!
//! Clients never swallow failures: each one returns a [`Res`] and the HTTP
//! handler decides what the caller gets to see. "Nothing is playing" is not
//! an error and is modelled as `Ok(None)` by the now-playing client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The authorization server rejected a grant or answered with something
    /// that does not carry an `access_token`.
    #[error("credential acquisition failed: {0}")]
    CredentialAcquisition(String),

    /// Network error, non-success status or unexpected response shape from
    /// the music metadata API.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// The token cache could not be read or written.
    #[error("token cache error: {0}")]
    Cache(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Cache(err.to_string())
    }
}

impl Error {
    /// Short, stable label used in operator logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::CredentialAcquisition(_) => "credential_acquisition",
            Error::UpstreamFetch(_) => "upstream_fetch",
            Error::Cache(_) => "cache",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
        }
    }
}

/// A convenient Result type alias for operations that may fail.
pub type Res<T> = std::result::Result<T, Error>;
