//! Spotify Now-Playing Gradient Library
//!
//! This library serves the track currently playing on a single Spotify account
//! together with a color gradient computed from the track's audio analysis.
//! It keeps the account's OAuth credentials alive in a token cache and
//! refreshes them against Spotify's authorization server when they expire.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the gradient and health endpoints
//! - `cli` - Operator command implementations
//! - `config` - Configuration loaded once from the process environment
//! - `error` - Error taxonomy and the `Res` alias
//! - `gradient` - Color mapping and gradient building from audio sections
//! - `management` - Token cache backends and the token lifecycle manager
//! - `server` - Router wiring and the HTTP listener
//! - `spotify` - Authorization server and Web API clients, request orchestration
//! - `types` - Data structures and type definitions

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gradient;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::{Error, Res};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Stored fresh access token");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for unrecoverable startup failures. Failures while serving a
/// request are reported with [`warning!`] so the process keeps running.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Audio analysis request failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
