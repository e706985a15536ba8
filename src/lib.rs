//! Playlist Genius Library
//!
//! This library turns a free-text prompt into a Spotify playlist. A user signs
//! in with the OAuth 2.0 PKCE flow, a chat-completion model suggests songs for
//! the prompt, every suggestion is matched against the Spotify catalog and the
//! matches that survive the novelty filter end up in a freshly created
//! playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by the web backend
//! - `cli` - Command-line interface implementations
//! - `completion` - Chat-completion client, prompt building and output parsing
//! - `config` - Configuration management and environment variables
//! - `error` - Outbound and HTTP-facing error types
//! - `playlist` - The playlist generation orchestration
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify accounts and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_genius::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> playlist_genius::Res<()> {
//!     config::load_env().await?;
//!     // Build settings, then serve...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod playlist;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line layer, where any error ends up printed to the
/// terminal. The HTTP layer uses [`error::AppError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the command-line interface.
///
/// # Example
///
/// ```
/// info!("Opening the Spotify authorization page...");
/// info!("Found {} songs", count);
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
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Created playlist with {} songs", count);
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
/// Terminates the program with exit code 1 right after printing. Only the
/// command-line layer uses it; server code never exits the process.
///
/// # Example
///
/// ```
/// error!("Failed to start the callback listener");
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
/// warning!("Failed to open browser, open the URL manually");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
