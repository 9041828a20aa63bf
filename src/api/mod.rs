//! # API Module
//!
//! HTTP handlers served by the gradient service, built on
//! [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`now_playing`] - `GET /spotify`: the currently playing song with its color
//!   gradient, or `{"success": false, "message": "No song playing"}`.
//! - [`callback`] - `GET /callback`: redirect target of the authorization
//!   page; exchanges the code and seeds the token cache.
//! - [`health`] - `GET /health`: status and version for monitoring.
//!
//! Handlers receive the shared [`crate::spotify::GradientService`] through an
//! `Extension` layer installed by [`crate::server::router`].

mod callback;
mod health;
mod now_playing;

pub use callback::callback;
pub use health::health;
pub use now_playing::now_playing;
