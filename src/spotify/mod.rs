//! # Spotify Integration Module
//!
//! Thin async client for the parts of Spotify that playlist generation needs:
//! the accounts service (authorize URL, token exchange) and a handful of Web
//! API endpoints (profile, listening history, search, playlists).
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers / CLI
//!          ↓
//! Playlist generation
//!          ↓
//! SpotifyClient
//!     ├── auth      (PKCE session, code exchange)
//!     ├── profile   (GET /me)
//!     ├── history   (recently played, top tracks)
//!     ├── search    (GET /search)
//!     └── playlist  (create, add tracks)
//!          ↓
//! reqwest
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me` - Profile of the token owner
//! - `GET /me/player/recently-played` - Last played tracks
//! - `GET /me/top/tracks` - Short term top tracks
//! - `GET /search` - Track search
//! - `POST /users/{user_id}/playlists` - Create playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks
//!
//! ## Error Handling
//!
//! Every call is attempted exactly once. Non-success statuses come back as
//! [`ApiError::Status`] carrying the raw upstream body so handlers can hand it
//! to their callers verbatim.
//!
//! The client holds no credentials: every Web API call takes the caller's
//! [`Session`](crate::types::Session).

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{config::Settings, error::ApiError};

pub mod auth;
pub mod history;
pub mod playlist;
pub mod profile;
pub mod search;

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
    client_id: String,
}

impl SpotifyClient {
    pub fn new(http: Client, settings: &Settings) -> Self {
        Self {
            http,
            api_url: settings.spotify_api_url.trim_end_matches('/').to_string(),
            token_url: settings.token_url(),
            client_id: settings.client_id().to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Reads a response body, turning non-success statuses into
/// [`ApiError::Status`] and decoding success bodies as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}
