use crate::{
    error::ApiError,
    spotify::{SpotifyClient, read_json},
    types::{SearchResponse, Session, Track},
};

impl SpotifyClient {
    /// Searches the catalog for tracks, best match first.
    ///
    /// # Arguments
    ///
    /// * `session` - Caller's bearer token
    /// * `query` - Free-text query, e.g. `"Teardrop Massive Attack"`
    /// * `limit` - Number of hits to return (1-50)
    pub async fn search_tracks(
        &self,
        session: &Session,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/search"))
            .query(&[
                ("q", query.to_string()),
                ("type", "track".to_string()),
                ("limit", limit.to_string()),
            ])
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let res: SearchResponse = read_json(response).await?;
        Ok(res.tracks.items)
    }
}
