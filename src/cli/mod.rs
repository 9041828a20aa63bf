//! # CLI Module
//!
//! Operator commands for the gradient service. Each command receives the
//! [`crate::config::Config`] loaded at startup and reports through the
//! crate's console macros; fatal problems end the process via `error!`.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP server until interrupted
//! - [`now_playing`] - Computes the gradient once and prints it as a table
//! - [`authorize`] - Opens the authorization page that yields the one-time code
//! - [`token_status`] / [`clear_tokens`] - Inspect or reset the token cache

mod auth;
mod now_playing;
mod serve;
mod tokens;

pub use auth::authorize;
pub use now_playing::hex_to_rgb;
pub use now_playing::now_playing;
pub use serve::serve;
pub use tokens::clear_tokens;
pub use tokens::token_status;
