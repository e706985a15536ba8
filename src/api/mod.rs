//! # API Module
//!
//! HTTP handlers of the Playlist Genius web backend.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`authorize`] - Starts a PKCE login and returns the session to the caller
//! - [`exchange_token`] - Exchanges an authorization code for a token set
//! - [`login_callback`] - Landing page for the CLI login flow
//!
//! ### Spotify
//!
//! - [`me`] - Profile of the token owner
//! - [`generate_playlist`] - Prompt to playlist
//!
//! ### Monitoring
//!
//! - [`health`] - Application status and version
//! - [`debug`] / [`debug_completion`] - Configuration diagnostics
//!
//! The backend keeps no per-user state: every request carries its own token
//! (or code and verifier), and errors are JSON bodies built by
//! [`AppError`](crate::error::AppError).

use std::sync::Arc;

use reqwest::Client;

use crate::{
    completion::CompletionClient, config::Settings, playlist::PlaylistGenerator,
    spotify::SpotifyClient,
};

mod callback;
mod debug;
mod generate;
mod health;
mod me;

pub use callback::{LoginState, authorize, exchange_token, login_callback};
pub use debug::{debug, debug_completion};
pub use generate::generate_playlist;
pub use health::health;
pub use me::me;

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub spotify: SpotifyClient,
    pub completion: CompletionClient,
    pub generator: PlaylistGenerator,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let http = Client::new();
        let spotify = SpotifyClient::new(http.clone(), &settings);
        let completion = CompletionClient::new(http, &settings);
        let generator = PlaylistGenerator::new(spotify.clone(), completion.clone());

        Self {
            settings: Arc::new(settings),
            spotify,
            completion,
            generator,
        }
    }
}
