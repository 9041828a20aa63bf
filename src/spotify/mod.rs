//! # Spotify Integration Module
//!
//! Clients for Spotify's authorization server and Web API, plus the
//! orchestration that turns them into the gradient response.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handler (api)
//!          ↓
//! GradientService (now_playing)
//!     ├── TokenManager ── SpotifyAuth (auth) ── accounts.spotify.com
//!     ├── SpotifyApi::currently_playing (player)
//!     ├── SpotifyApi::audio_analysis (analysis)
//!     └── gradient::build_gradient
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization-code and refresh-token grants against the token
//!   endpoint, authenticated with the application's client credentials.
//! - [`client`] - The shared `reqwest` client and the [`SpotifyApi`] handle.
//! - [`player`] - The currently-playing endpoint, normalized into a [`crate::types::Song`].
//! - [`analysis`] - The audio-analysis endpoint, validated before use.
//! - [`now_playing`] - [`GradientService`], the request orchestrator.
//!
//! ## Error Handling
//!
//! Every call returns [`crate::Res`]. Authorization failures surface as
//! [`crate::Error::CredentialAcquisition`], everything that goes wrong while
//! talking to the Web API as [`crate::Error::UpstreamFetch`]. Nothing is
//! retried; an expired access token is handled by the single refresh grant
//! in [`crate::management::TokenManager`].

pub mod analysis;
pub mod auth;
pub mod client;
pub mod now_playing;
pub mod player;

pub use auth::SpotifyAuth;
pub use client::{SpotifyApi, http_client};
pub use now_playing::{GradientService, NO_SONG_PLAYING};
