use crate::{
    error::ApiError,
    spotify::{SpotifyClient, read_json},
    types::{Paging, PlayHistory, Session, Track},
};

impl SpotifyClient {
    /// Tracks the user played most recently, newest first. Spotify caps
    /// `limit` at 50.
    pub async fn recently_played(
        &self,
        session: &Session,
        limit: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/me/player/recently-played"))
            .query(&[("limit", limit.to_string())])
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let page: Paging<PlayHistory> = read_json(response).await?;
        Ok(page.items.into_iter().map(|item| item.track).collect())
    }

    /// The user's top tracks over roughly the last four weeks.
    pub async fn top_tracks(
        &self,
        session: &Session,
        limit: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/me/top/tracks"))
            .query(&[
                ("limit", limit.to_string()),
                ("time_range", "short_term".to_string()),
            ])
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let page: Paging<Track> = read_json(response).await?;
        Ok(page.items)
    }
}
