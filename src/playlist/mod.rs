//! Playlist generation.
//!
//! One call to [`PlaylistGenerator::generate`] runs the whole pipeline for a
//! prompt:
//!
//! 1. resolve the token owner (`GET /me`),
//! 2. load listening history (best effort),
//! 3. ask the completion model for suggestions (soft failure),
//! 4. match suggestions against the catalog with a bounded task group,
//! 5. fall back to a keyword search on the prompt when no suggestion had a
//!    catalog hit,
//! 6. create the playlist and add the tracks.
//!
//! Nothing is retried and nothing is rolled back: if adding tracks fails the
//! freshly created playlist stays empty.

use chrono::{Datelike, Utc};

use crate::{
    completion::{CompletionClient, CurationPrompt, parse_suggestions, prompt::TARGET_SUGGESTIONS},
    error::{ApiError, AppError},
    spotify::{SpotifyClient, playlist::MAX_TRACKS_PER_REQUEST},
    types::{GenerateOutcome, MatchedTrack, Session, Suggestions},
    utils,
};

pub mod history;
pub mod matcher;

pub use history::ListeningHistory;
pub use matcher::NoveltyFilter;

/// Fewer tracks than this and no playlist gets created.
pub const MIN_TRACKS: usize = 5;

/// Hits kept from the keyword search on the raw prompt.
pub const FALLBACK_LIMIT: u32 = 20;

pub const PLAYLIST_DESCRIPTION: &str = "Generated by Playlist Genius";

#[derive(Debug, Clone)]
pub struct PlaylistGenerator {
    spotify: SpotifyClient,
    completion: CompletionClient,
}

impl PlaylistGenerator {
    pub fn new(spotify: SpotifyClient, completion: CompletionClient) -> Self {
        Self { spotify, completion }
    }

    /// Generates a playlist for `prompt` in the account behind `session`.
    ///
    /// Too few matches and a failed playlist creation are reported as an
    /// outcome with `success: false` and the songs found so far.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingFields`] for a blank prompt or token
    /// - [`AppError::Unauthorized`] when the token owner cannot be resolved
    pub async fn generate(
        &self,
        session: &Session,
        prompt: &str,
        novelty: bool,
    ) -> Result<GenerateOutcome, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() || session.access_token.trim().is_empty() {
            return Err(AppError::MissingFields { received: None });
        }

        let profile = self.spotify.current_user(session).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to resolve token owner");
            AppError::Unauthorized {
                message: "Failed to get user profile".to_string(),
                details: None,
            }
        })?;

        let history = ListeningHistory::fetch(&self.spotify, session).await;

        let curation = CurationPrompt::new(
            prompt,
            history.track_count(),
            history.artists(),
            Utc::now().year(),
        );
        let suggestions = self.suggest(&curation).await;
        let used_chatgpt = suggestions.is_some();
        let Suggestions { title, mut songs } = suggestions.unwrap_or_default();
        songs.truncate(TARGET_SUGGESTIONS);

        let results = matcher::search_suggestions(
            &self.spotify,
            session,
            &songs,
            matcher::SEARCH_CONCURRENCY,
        )
        .await;
        let any_hit = results.iter().any(Option::is_some);
        let mut tracks = NoveltyFilter::new(novelty).select(results, &history);
        tracing::info!(
            suggested = songs.len(),
            kept = tracks.len(),
            "suggestions matched"
        );

        // only a complete catalog miss falls back; filtered hits stay dropped
        if !any_hit {
            tracks = self.fallback(session, prompt).await;
        }

        if tracks.len() < MIN_TRACKS {
            let message = if tracks.is_empty() && any_hit {
                "Every suggested song was already known or too popular".to_string()
            } else if tracks.is_empty() {
                "No songs found for your prompt".to_string()
            } else {
                format!(
                    "Only found {} songs, at least {MIN_TRACKS} are needed for a playlist",
                    tracks.len()
                )
            };
            return Ok(outcome(false, message, prompt, tracks, used_chatgpt));
        }

        let name = utils::playlist_name(prompt, title.as_deref());
        let playlist = match self
            .spotify
            .create_playlist(session, &profile.id, &name, PLAYLIST_DESCRIPTION)
            .await
        {
            Ok(playlist) => playlist,
            Err(e) => {
                tracing::warn!(error = %e, "failed to create playlist");
                return Ok(outcome(
                    false,
                    "Found songs but failed to create playlist".to_string(),
                    prompt,
                    tracks,
                    used_chatgpt,
                ));
            }
        };

        let uris: Vec<String> = tracks
            .iter()
            .take(MAX_TRACKS_PER_REQUEST)
            .map(MatchedTrack::uri)
            .collect();
        if let Err(e) = self.spotify.add_tracks(session, &playlist.id, uris).await {
            tracing::warn!(error = %e, playlist = %playlist.id, "failed to add tracks to playlist");
        }

        tracing::info!(playlist = %playlist.id, songs = tracks.len(), "playlist created");

        let mut result = outcome(
            true,
            format!("Successfully created playlist with {} songs!", tracks.len()),
            prompt,
            tracks,
            used_chatgpt,
        );
        result.playlist_url = playlist.external_urls.spotify;
        result.playlist_id = Some(playlist.id);
        Ok(result)
    }

    /// Asks the model for suggestions. `None` means the model could not be
    /// used at all: no key, a failed call or output that is not JSON.
    async fn suggest(&self, curation: &CurationPrompt) -> Option<Suggestions> {
        let content = match self
            .completion
            .complete(&curation.system_message(), &curation.user_message())
            .await
        {
            Ok(content) => content,
            Err(ApiError::NotConfigured(what)) => {
                tracing::warn!("{what} not set, skipping song suggestions");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion request failed");
                return None;
            }
        };

        let parsed = parse_suggestions(&content);
        match &parsed {
            Some(suggestions) => {
                tracing::info!(songs = suggestions.songs.len(), "completion parsed")
            }
            None => {
                let preview: String = content.chars().take(200).collect();
                tracing::warn!(content = %preview, "completion output is not valid JSON")
            }
        }
        parsed
    }

    /// Plain keyword search on the prompt, unfiltered.
    async fn fallback(&self, session: &Session, prompt: &str) -> Vec<MatchedTrack> {
        tracing::info!("no suggestion matched, falling back to keyword search");
        match self
            .spotify
            .search_tracks(session, prompt, FALLBACK_LIMIT)
            .await
        {
            Ok(tracks) => tracks
                .into_iter()
                .filter_map(|track| matcher::matched_track(track, None))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "fallback search failed");
                Vec::new()
            }
        }
    }
}

fn outcome(
    success: bool,
    message: String,
    prompt: &str,
    songs: Vec<MatchedTrack>,
    used_chatgpt: bool,
) -> GenerateOutcome {
    GenerateOutcome {
        success,
        message,
        prompt: prompt.to_string(),
        songs,
        playlist_id: None,
        playlist_url: None,
        used_chatgpt,
    }
}
