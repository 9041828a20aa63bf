use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};

use crate::{
    config::Config,
    error::{Error, Res},
    types::{Credential, GrantResponse},
};

/// Client for Spotify's authorization server.
///
/// Issues the two grant flavours the service needs: the one-time
/// authorization-code exchange that bootstraps the credential, and the
/// refresh-token grant that keeps it alive afterwards. Both authenticate the
/// application with HTTP Basic credentials.
#[derive(Clone)]
pub struct SpotifyAuth {
    http: Client,
    token_url: String,
    authorization: String,
    redirect_uri: String,
    auth_code: Option<String>,
}

impl SpotifyAuth {
    /// Reads the token endpoint, redirect URI, client credentials and the
    /// optional authorization code from `config`.
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            authorization: basic_authorization(&config.client_id, &config.client_secret),
            redirect_uri: config.redirect_uri.clone(),
            auth_code: config.auth_code.clone(),
        }
    }

    /// The one-time authorization code from the environment, if any.
    pub fn configured_code(&self) -> Option<&str> {
        self.auth_code.as_deref()
    }

    /// Exchanges an authorization code for a credential.
    ///
    /// # Errors
    ///
    /// [`Error::CredentialAcquisition`] when the request fails or the server
    /// does not hand out an access token.
    pub async fn exchange_code(&self, code: &str) -> Res<Credential> {
        self.grant(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    /// Trades a refresh token for a new access token.
    ///
    /// The returned credential only carries a refresh token when the server
    /// rotated it.
    pub async fn refresh_token(&self, refresh_token: &str) -> Res<Credential> {
        self.grant(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn grant(&self, params: &[(&str, &str)]) -> Res<Credential> {
        let response = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, &self.authorization)
            .form(params)
            .send()
            .await
            .map_err(|e| Error::CredentialAcquisition(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::CredentialAcquisition(format!("token response unreadable: {e}")))?;

        let grant: GrantResponse = serde_json::from_str(&body).map_err(|e| {
            Error::CredentialAcquisition(format!("malformed token response ({status}): {e}"))
        })?;

        credential_from_grant(status, grant)
    }
}

/// Validates a token endpoint answer.
///
/// Error-bearing bodies, non-success statuses and bodies without an
/// `access_token` are all acquisition failures.
pub fn credential_from_grant(status: StatusCode, grant: GrantResponse) -> Res<Credential> {
    if let Some(error) = grant.error {
        let detail = grant.error_description.unwrap_or_default();
        return Err(Error::CredentialAcquisition(format!(
            "authorization server returned '{error}' ({status}) {detail}"
        )));
    }

    if !status.is_success() {
        return Err(Error::CredentialAcquisition(format!(
            "authorization server answered {status}"
        )));
    }

    let access_token = grant
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::CredentialAcquisition("token response has no access_token".to_string())
        })?;

    Ok(Credential {
        access_token,
        refresh_token: grant.refresh_token.filter(|t| !t.is_empty()),
    })
}

/// `Basic base64(client_id:client_secret)`
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// URL the account owner visits once to obtain the authorization code.
///
/// `state` comes back untouched on the redirect and ties the callback to
/// this request.
pub fn authorize_url(config: &Config, state: &str) -> Res<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid SPOTIFY_API_AUTH_URL: {e}")))
}
