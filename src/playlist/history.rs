use std::collections::HashSet;

use crate::{
    spotify::SpotifyClient,
    types::{Session, Track},
};

/// Items fetched from each history endpoint.
pub const HISTORY_LIMIT: u32 = 50;

/// What the user is already known to listen to. Only ever used to bias
/// discovery; an empty history is a valid history.
#[derive(Debug, Clone, Default)]
pub struct ListeningHistory {
    known_track_ids: HashSet<String>,
    known_artists: HashSet<String>,
}

impl ListeningHistory {
    /// Fetches recently played and short term top tracks concurrently.
    /// Either call may fail (missing scope, expired token); failures are
    /// logged and leave the corresponding part empty.
    pub async fn fetch(spotify: &SpotifyClient, session: &Session) -> Self {
        let (recent, top) = tokio::join!(
            spotify.recently_played(session, HISTORY_LIMIT),
            spotify.top_tracks(session, HISTORY_LIMIT)
        );

        let mut history = Self::default();
        match recent {
            Ok(tracks) => history.extend(tracks),
            Err(e) => tracing::warn!(error = %e, "failed to fetch recently played tracks"),
        }
        match top {
            Ok(tracks) => history.extend(tracks),
            Err(e) => tracing::warn!(error = %e, "failed to fetch top tracks"),
        }

        tracing::info!(
            tracks = history.known_track_ids.len(),
            artists = history.known_artists.len(),
            "listening history loaded"
        );
        history
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for track in tracks {
            let Some(id) = track.id else {
                continue;
            };
            self.known_artists
                .extend(track.artists.iter().map(|a| a.name.to_lowercase()));
            self.known_track_ids.insert(id);
        }
    }

    pub fn knows_track(&self, id: &str) -> bool {
        self.known_track_ids.contains(id)
    }

    pub fn knows_artist(&self, name: &str) -> bool {
        self.known_artists.contains(&name.to_lowercase())
    }

    pub fn track_count(&self) -> usize {
        self.known_track_ids.len()
    }

    /// Known artist names in a stable (sorted) order.
    pub fn artists(&self) -> Vec<String> {
        let mut artists: Vec<String> = self.known_artists.iter().cloned().collect();
        artists.sort();
        artists
    }
}
