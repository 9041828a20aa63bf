use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tokio::sync::Mutex;

use crate::error::{Error, Res};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Nonce of the authorization request currently waiting for its callback.
pub const AUTHORIZE_STATE_KEY: &str = "authorize_state";

/// Key-value store holding the service credential.
///
/// Implementations must be safe to share between concurrent requests; each
/// individual operation is expected to be atomic.
#[async_trait]
pub trait TokenCache: Send + Sync {
    async fn get(&self, key: &str) -> Res<Option<String>>;

    /// Stores a value without expiry.
    async fn set(&self, key: &str, value: &str) -> Res<()>;

    /// Stores a value that disappears after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Res<()>;

    async fn del(&self, key: &str) -> Res<()>;
}

/// Token cache backed by a Redis server.
#[derive(Clone)]
pub struct RedisTokenCache {
    connection: ConnectionManager,
}

impl RedisTokenCache {
    /// Connects to the Redis server at `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// The connection manager reconnects on its own, so the returned cache
    /// can be held for the lifetime of the process.
    pub async fn connect(url: &str) -> Res<Self> {
        let client = redis::Client::open(url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        let mut con = self.connection.clone();
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Res<()> {
        let mut con = self.connection.clone();
        let _: () = con.set(key, value).await?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Res<()> {
        if ttl.as_secs() == 0 {
            return Err(Error::Cache(format!("expiry for '{key}' must be at least one second")));
        }
        let mut con = self.connection.clone();
        let _: () = con.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Res<()> {
        let mut con = self.connection.clone();
        let _: () = con.del(key).await?;
        Ok(())
    }
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// In-process token cache with the same expiry semantics as Redis.
///
/// Used when no cache server is configured and in tests. Tokens do not
/// survive a restart.
#[derive(Default)]
pub struct MemoryTokenCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining lifetime of a live entry. `Ok(None)` for entries without
    /// expiry, `Err` when the key is absent or expired.
    pub async fn ttl(&self, key: &str) -> Res<Option<Duration>> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => {
                Ok(entry.expires_at.map(|at| at.saturating_duration_since(now)))
            }
            _ => Err(Error::Cache(format!("no live entry for '{key}'"))),
        }
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Res<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Res<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Res<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
