use crate::{
    error::ApiError,
    spotify::{SpotifyClient, read_json},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, Session,
    },
};

/// Spotify accepts at most this many URIs per add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Creates a private playlist owned by `user_id`.
    ///
    /// # Returns
    ///
    /// The created playlist, including its id and web URL.
    pub async fn create_playlist(
        &self,
        session: &Session,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: false,
            collaborative: false,
        };

        let response = self
            .http
            .post(self.endpoint(&format!("/users/{user_id}/playlists")))
            .bearer_auth(&session.access_token)
            .json(&body)
            .send()
            .await?;

        read_json(response).await
    }

    /// Appends tracks to a playlist in a single call.
    ///
    /// `uris` must hold at most [`MAX_TRACKS_PER_REQUEST`] entries of the
    /// form `spotify:track:<id>`.
    pub async fn add_tracks(
        &self,
        session: &Session,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Result<AddTrackToPlaylistResponse, ApiError> {
        let body = AddTrackToPlaylistRequest { uris };

        let response = self
            .http
            .post(self.endpoint(&format!("/playlists/{playlist_id}/tracks")))
            .bearer_auth(&session.access_token)
            .json(&body)
            .send()
            .await?;

        read_json(response).await
    }
}
