mod auth;
mod cache;

pub use auth::ACCESS_TOKEN_TTL;
pub use auth::AUTHORIZE_STATE_TTL;
pub use auth::TokenManager;
pub use auth::TokenState;
pub use cache::ACCESS_TOKEN_KEY;
pub use cache::AUTHORIZE_STATE_KEY;
pub use cache::MemoryTokenCache;
pub use cache::REFRESH_TOKEN_KEY;
pub use cache::RedisTokenCache;
pub use cache::TokenCache;
