//! Configuration management for the gradient service.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Configuration is read exactly once at startup into a [`Config`]
//! which is then handed to every component that needs it:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, or the working directory
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{Error, Res};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing user-read-playback-state";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_MARKET: &str = "GB";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file.
///
/// Looks in the platform-specific local data directory first
/// (`spotify-gradient/.env`), then falls back to a `.env` in the working
/// directory. A missing file is not an error: the service can be configured
/// entirely through the real environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotify-gradient/.env`
/// - macOS: `~/Library/Application Support/spotify-gradient/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-gradient/.env`
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    } else {
        // working directory .env is optional
        let _ = dotenv::dotenv();
    }
    Ok(())
}

/// Location of the per-user `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-gradient/.env");
    path
}

/// Everything the service reads from its environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// One-time authorization code, only consulted while no tokens are cached.
    pub auth_code: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
    /// Connection address of the token cache. `None` selects the in-process cache.
    pub redis_url: Option<String>,
    pub server_addr: SocketAddr,
    pub cors_origin: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Res<Self> {
        let server_addr = optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr = SocketAddr::from_str(&server_addr)
            .map_err(|e| Error::Config(format!("invalid SERVER_ADDRESS '{server_addr}': {e}")))?;

        let timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("invalid REQUEST_TIMEOUT_SECS '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            auth_code: non_empty("SPOTIFY_API_AUTH_CODE"),
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            market: optional("SPOTIFY_MARKET", DEFAULT_MARKET),
            redis_url: non_empty("REDIS_URL"),
            server_addr,
            cors_origin: optional("CORS_ALLOW_ORIGIN", DEFAULT_CORS_ORIGIN),
            request_timeout: Duration::from_secs(timeout),
        })
    }

    /// Configuration with defaults for everything but the client credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_code: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            redis_url: None,
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn required(name: &str) -> Res<String> {
    non_empty(name).ok_or_else(|| Error::Config(format!("{name} must be set")))
}

fn optional(name: &str, default: &str) -> String {
    non_empty(name).unwrap_or_else(|| default.to_string())
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
