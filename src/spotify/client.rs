use std::time::Duration;

use reqwest::{Client, Response};

use crate::{
    config::Config,
    error::{Error, Res},
};

/// Builds the HTTP client shared by every outbound call.
///
/// The timeout applies to each request as a whole, so a stalled upstream
/// cannot hold an incoming request indefinitely.
pub fn http_client(timeout: Duration) -> Res<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))
}

/// Client for the Spotify Web API endpoints the service reads.
#[derive(Clone)]
pub struct SpotifyApi {
    pub(super) http: Client,
    pub(super) api_url: String,
    pub(super) market: String,
}

impl SpotifyApi {
    /// Uses `config.api_url` without its trailing slash and `config.market`
    /// for track relinking.
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            market: config.market.clone(),
        }
    }

    /// Authorized GET against `api_url + path`. Any non-2xx status becomes
    /// [`Error::UpstreamFetch`].
    pub(super) async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: &str,
    ) -> Res<Response> {
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("GET {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamFetch(format!(
                "GET {path} answered {status}: {}",
                body.trim()
            )));
        }
        Ok(response)
    }
}
