//! Configuration management for Playlist Genius.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files. Values are resolved in this order:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables, including those loaded from `.env` files
//! 3. Application defaults (where applicable)

use std::path::PathBuf;

use clap::Args;

/// Public client id of the registered Spotify application, used when
/// `SPOTIFY_CLIENT_ID` is not set. PKCE needs no client secret.
pub const DEFAULT_CLIENT_ID: &str = "2ee0d98b21d048978bf73d78924daf91";

pub const DEFAULT_SCOPE: &str = concat!(
    "user-read-private user-read-email ",
    "playlist-modify-public playlist-modify-private ",
    "user-read-recently-played user-top-read"
);

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";

/// Loads environment variables from `.env` files.
///
/// Looks in the platform-specific local data directory first
/// (`<data_local_dir>/playlist-genius/.env`, created if missing), then in the
/// current working directory. Both files are optional; variables already set
/// in the process environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlist-genius/.env`
/// - macOS: `~/Library/Application Support/playlist-genius/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-genius/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    dotenv::dotenv().ok();

    Ok(())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-genius/.env");
    path
}

/// Runtime settings shared by the server and the CLI.
///
/// Every field can be given as a flag or through its environment variable.
#[derive(Clone, Debug, Args)]
pub struct Settings {
    /// Spotify application client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
    pub client_id: String,

    /// Redirect URI registered with the Spotify application
    #[arg(
        long,
        env = "SPOTIFY_REDIRECT_URI",
        default_value = "http://127.0.0.1:8888/callback"
    )]
    pub redirect_uri: String,

    /// Space separated OAuth scopes requested at login
    #[arg(long, env = "SPOTIFY_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Spotify Web API base URL
    #[arg(
        long,
        env = "SPOTIFY_API_URL",
        default_value = "https://api.spotify.com/v1"
    )]
    pub spotify_api_url: String,

    /// Spotify accounts service base URL (authorize and token endpoints)
    #[arg(
        long,
        env = "SPOTIFY_ACCOUNTS_URL",
        default_value = "https://accounts.spotify.com"
    )]
    pub spotify_accounts_url: String,

    /// API key for the chat-completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub completion_api_key: Option<String>,

    /// Chat-completion API base URL
    #[arg(
        long,
        env = "OPENAI_API_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub completion_api_url: String,

    /// Chat-completion model name
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub completion_model: String,
}

impl Settings {
    /// The client id as sent to Spotify. Values pasted into hosting dashboards
    /// often carry a trailing newline.
    pub fn client_id(&self) -> &str {
        self.client_id.trim()
    }

    pub fn completion_api_key(&self) -> Option<&str> {
        self.completion_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorize",
            self.spotify_accounts_url.trim_end_matches('/')
        )
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/api/token",
            self.spotify_accounts_url.trim_end_matches('/')
        )
    }
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides `default_filter`; `LOG_FORMAT=json` switches to JSON
/// lines.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
