use std::{sync::Arc, time::Duration};

use rand::{Rng, distr::Alphanumeric};
use tokio::sync::Mutex;

use crate::{
    error::{Error, Res},
    management::cache::{ACCESS_TOKEN_KEY, AUTHORIZE_STATE_KEY, REFRESH_TOKEN_KEY, TokenCache},
    spotify::SpotifyAuth,
    success,
    types::Credential,
    warning,
};

/// Lifetime of a cached access token.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// How long an authorization request waits for its callback.
pub const AUTHORIZE_STATE_TTL: Duration = Duration::from_secs(600);

/// What the token cache currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Nothing cached, the authorization code has to be exchanged.
    Empty,
    /// The access token expired or was never stored.
    RefreshOnly,
    /// A live access token is cached.
    Valid,
}

/// Keeps the service credential valid.
///
/// The cache is the source of truth and is consulted on every call. A cached
/// access token is returned without touching the network; otherwise the
/// cached refresh token is traded for a new one, and with an empty cache the
/// one-time authorization code is exchanged. Every grant is written back to
/// the cache before its access token is handed out.
///
/// Grant requests are single-flight per process: concurrent callers that
/// find no access token queue behind one acquisition and pick up its result
/// from the cache. Grants run on their own task, so a caller that goes away
/// mid-request never leaves a granted credential unwritten.
#[derive(Clone)]
pub struct TokenManager {
    cache: Arc<dyn TokenCache>,
    auth: SpotifyAuth,
    acquiring: Arc<Mutex<()>>,
}

impl TokenManager {
    pub fn new(cache: Arc<dyn TokenCache>, auth: SpotifyAuth) -> Self {
        TokenManager {
            cache,
            auth,
            acquiring: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a usable access token.
    ///
    /// # Errors
    ///
    /// [`crate::Error::CredentialAcquisition`] when a grant fails and
    /// [`crate::Error::Cache`] when the cache cannot be read or written.
    /// Nothing is retried.
    pub async fn acquire(&self) -> Res<String> {
        if let Some(token) = self.cache.get(ACCESS_TOKEN_KEY).await? {
            return Ok(token);
        }

        let manager = self.clone();
        detached(async move { manager.acquire_locked().await }).await
    }

    async fn acquire_locked(&self) -> Res<String> {
        let _guard = self.acquiring.lock().await;

        // another caller may have completed a grant while we waited
        if let Some(token) = self.cache.get(ACCESS_TOKEN_KEY).await? {
            return Ok(token);
        }

        let credential = match self.cache.get(REFRESH_TOKEN_KEY).await? {
            Some(refresh_token) => {
                let credential = self.auth.refresh_token(&refresh_token).await?;
                success!("Refreshed Spotify access token");
                credential
            }
            None => {
                let code = self.auth.configured_code().ok_or_else(|| {
                    Error::CredentialAcquisition(
                        "no tokens cached and no authorization code configured".to_string(),
                    )
                })?;
                self.exchange(code).await?
            }
        };

        self.persist(&credential).await?;
        Ok(credential.access_token)
    }

    /// Starts an authorization request and returns its `state` nonce.
    ///
    /// The nonce is kept in the token cache until the callback presents it,
    /// so the process that opens the authorization page and the server that
    /// receives the redirect only need to share the cache.
    pub async fn begin_authorization(&self) -> Res<String> {
        let state = generate_state();
        self.cache
            .set_ex(AUTHORIZE_STATE_KEY, &state, AUTHORIZE_STATE_TTL)
            .await?;
        Ok(state)
    }

    /// Bootstraps the cache from an authorization code handed in by the
    /// account owner, replacing whatever was cached before.
    ///
    /// # Errors
    ///
    /// [`crate::Error::CredentialAcquisition`] when `state` is not the nonce
    /// of a pending [`Self::begin_authorization`] request. The cached tokens
    /// are left untouched in that case and no grant is requested.
    pub async fn authorize(&self, state: &str, code: &str) -> Res<String> {
        let manager = self.clone();
        let (state, code) = (state.to_string(), code.to_string());
        detached(async move { manager.authorize_locked(&state, &code).await }).await
    }

    async fn authorize_locked(&self, state: &str, code: &str) -> Res<String> {
        let _guard = self.acquiring.lock().await;

        let pending = self.cache.get(AUTHORIZE_STATE_KEY).await?;
        if state.is_empty() || pending.as_deref() != Some(state) {
            return Err(Error::CredentialAcquisition(
                "authorization state does not match a pending request".to_string(),
            ));
        }
        // one callback per nonce
        self.cache.del(AUTHORIZE_STATE_KEY).await?;

        let credential = self.exchange(code).await?;
        self.persist(&credential).await?;
        Ok(credential.access_token)
    }

    /// Reports which tokens are cached without requesting any grant.
    pub async fn state(&self) -> Res<TokenState> {
        if self.cache.get(ACCESS_TOKEN_KEY).await?.is_some() {
            return Ok(TokenState::Valid);
        }
        if self.cache.get(REFRESH_TOKEN_KEY).await?.is_some() {
            return Ok(TokenState::RefreshOnly);
        }
        Ok(TokenState::Empty)
    }

    /// Forgets both tokens. The next acquisition needs a fresh authorization code.
    pub async fn clear(&self) -> Res<()> {
        let _guard = self.acquiring.lock().await;
        self.cache.del(ACCESS_TOKEN_KEY).await?;
        self.cache.del(REFRESH_TOKEN_KEY).await?;
        self.cache.del(AUTHORIZE_STATE_KEY).await
    }

    async fn exchange(&self, code: &str) -> Res<Credential> {
        let credential = self.auth.exchange_code(code).await?;
        if credential.refresh_token.is_none() {
            warning!("Authorization code grant returned no refresh token");
        }
        success!("Exchanged authorization code for Spotify tokens");
        Ok(credential)
    }

    async fn persist(&self, credential: &Credential) -> Res<()> {
        self.cache
            .set_ex(ACCESS_TOKEN_KEY, &credential.access_token, ACCESS_TOKEN_TTL)
            .await?;
        if let Some(refresh_token) = &credential.refresh_token {
            self.cache.set(REFRESH_TOKEN_KEY, refresh_token).await?;
        }
        Ok(())
    }
}

async fn detached<F>(task: F) -> Res<String>
where
    F: Future<Output = Res<String>> + Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|e| Error::CredentialAcquisition(format!("token task failed: {e}")))?
}

fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
