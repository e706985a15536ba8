use std::{collections::HashSet, sync::Arc};

use tokio::sync::Semaphore;

use crate::{
    playlist::history::ListeningHistory,
    spotify::SpotifyClient,
    types::{MatchedTrack, Session, SuggestedSong, Track},
    utils,
};

/// Tracks more popular than this are dropped while novelty filtering is on.
pub const POPULARITY_CEILING: u32 = 70;

/// Catalog searches allowed in flight per generation.
pub const SEARCH_CONCURRENCY: usize = 8;

/// Converts a catalog hit. Tracks without an id cannot be added to a
/// playlist and yield `None`.
pub fn matched_track(track: Track, reason: Option<String>) -> Option<MatchedTrack> {
    let catalog_id = track.id?;
    let artist = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let release_year = track
        .album
        .as_ref()
        .and_then(|album| album.release_date.as_deref())
        .and_then(utils::release_year);

    Some(MatchedTrack {
        name: track.name,
        artist,
        catalog_id,
        preview_url: track.preview_url,
        external_url: track.external_urls.spotify,
        popularity: track.popularity,
        release_year,
        reason,
    })
}

/// Searches the catalog for every suggestion concurrently.
///
/// Each suggestion becomes its own task; a semaphore keeps at most
/// `concurrency` searches in flight. Handles are awaited in suggestion
/// order, so the result lines up index for index with `suggestions`: `None`
/// marks a suggestion without a hit (or whose search failed).
pub async fn search_suggestions(
    spotify: &SpotifyClient,
    session: &Session,
    suggestions: &[SuggestedSong],
    concurrency: usize,
) -> Vec<Option<MatchedTrack>> {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(suggestions.len());

    for song in suggestions {
        let spotify = spotify.clone();
        let session = session.clone();
        let song = song.clone();
        let permits = Arc::clone(&permits);

        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await.ok()?;
            search_one(&spotify, &session, song).await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!(error = %e, "search task join error");
                results.push(None);
            }
        }
    }

    results
}

async fn search_one(
    spotify: &SpotifyClient,
    session: &Session,
    song: SuggestedSong,
) -> Option<MatchedTrack> {
    let query = format!("{} {}", song.name, song.artist);
    match spotify.search_tracks(session, &query, 1).await {
        Ok(tracks) => {
            let hit = tracks
                .into_iter()
                .next()
                .and_then(|track| matched_track(track, song.reason));
            if hit.is_none() {
                tracing::debug!(%query, "no catalog match");
            }
            hit
        }
        Err(e) => {
            tracing::warn!(error = %e, %query, "catalog search failed");
            None
        }
    }
}

/// Decides which catalog hits make it into the playlist.
#[derive(Debug, Clone, Copy)]
pub struct NoveltyFilter {
    popularity_ceiling: Option<u32>,
}

impl NoveltyFilter {
    /// With `novelty` off only already-heard tracks are dropped.
    pub fn new(novelty: bool) -> Self {
        Self {
            popularity_ceiling: novelty.then_some(POPULARITY_CEILING),
        }
    }

    pub fn admits(&self, track: &MatchedTrack, history: &ListeningHistory) -> bool {
        if history.knows_track(&track.catalog_id) {
            return false;
        }

        self.popularity_ceiling
            .is_none_or(|ceiling| track.popularity <= ceiling)
    }

    /// Keeps admitted hits in suggestion order, dropping repeated catalog ids.
    pub fn select(
        &self,
        results: Vec<Option<MatchedTrack>>,
        history: &ListeningHistory,
    ) -> Vec<MatchedTrack> {
        let mut seen = HashSet::new();
        results
            .into_iter()
            .flatten()
            .filter(|track| {
                let admitted = self.admits(track, history);
                if !admitted {
                    tracing::debug!(
                        id = %track.catalog_id,
                        popularity = track.popularity,
                        "filtered out"
                    );
                }
                admitted
            })
            .filter(|track| seen.insert(track.catalog_id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExternalUrls, TrackAlbum, TrackArtist};

    fn track(id: &str, popularity: u32) -> Track {
        Track {
            id: Some(id.to_string()),
            name: format!("Song {id}"),
            artists: vec![
                TrackArtist {
                    id: None,
                    name: "Massive Attack".to_string(),
                },
                TrackArtist {
                    id: None,
                    name: "Elizabeth Fraser".to_string(),
                },
            ],
            album: Some(TrackAlbum {
                id: None,
                name: None,
                release_date: Some("1998-04-20".to_string()),
            }),
            preview_url: None,
            external_urls: ExternalUrls::default(),
            popularity,
        }
    }

    fn hit(id: &str, popularity: u32) -> Option<MatchedTrack> {
        matched_track(track(id, popularity), None)
    }

    #[test]
    fn matched_track_joins_artists_and_reads_year() {
        let matched = matched_track(track("a", 40), Some("Moody.".to_string())).unwrap();
        assert_eq!(matched.artist, "Massive Attack, Elizabeth Fraser");
        assert_eq!(matched.release_year, Some(1998));
        assert_eq!(matched.uri(), "spotify:track:a");
        assert_eq!(matched.reason.as_deref(), Some("Moody."));
    }

    #[test]
    fn novelty_filter_drops_known_popular_and_repeated() {
        let mut history = ListeningHistory::default();
        history.extend(vec![track("known", 10)]);

        let results = vec![
            hit("a", 70),
            None,
            hit("known", 10),
            hit("b", 71),
            hit("a", 70),
            hit("c", 0),
        ];

        let kept: Vec<String> = NoveltyFilter::new(true)
            .select(results, &history)
            .into_iter()
            .map(|t| t.catalog_id)
            .collect();
        assert_eq!(kept, vec!["a", "c"]);
    }

    #[test]
    fn without_novelty_only_history_is_dropped() {
        let mut history = ListeningHistory::default();
        history.extend(vec![track("known", 10)]);

        let filter = NoveltyFilter::new(false);
        assert!(filter.admits(&hit("b", 99).unwrap(), &history));
        assert!(!filter.admits(&hit("known", 10).unwrap(), &history));
        assert!(history.knows_artist("massive attack"));
    }

    #[test]
    fn local_files_are_skipped() {
        let mut local = track("local", 0);
        local.id = None;
        assert!(matched_track(local.clone(), None).is_none());

        let mut history = ListeningHistory::default();
        history.extend(vec![local, track("known", 10)]);
        assert_eq!(history.track_count(), 1);
        assert!(history.knows_track("known"));
    }

    #[test]
    fn history_page_with_local_file_decodes() {
        let page: crate::types::Paging<Track> = serde_json::from_value(serde_json::json!({
            "items": [
                {
                    "id": null,
                    "name": "My Demo",
                    "artists": [{ "id": null, "name": "Me" }],
                    "album": null,
                    "preview_url": null,
                    "popularity": 0
                },
                {
                    "id": "t1",
                    "name": "Teardrop",
                    "artists": [{ "id": "a1", "name": "Massive Attack" }],
                    "album": null,
                    "preview_url": null,
                    "popularity": 60
                }
            ]
        }))
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, None);
        assert_eq!(page.items[1].id.as_deref(), Some("t1"));
    }
}
