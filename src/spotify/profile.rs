use serde_json::Value;

use crate::{
    error::ApiError,
    spotify::{SpotifyClient, read_json},
    types::{Session, UserProfile},
};

impl SpotifyClient {
    /// Profile of the token owner, decoded to the fields the app needs.
    pub async fn current_user(&self, session: &Session) -> Result<UserProfile, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        read_json(response).await
    }

    /// Profile of the token owner as Spotify sent it.
    pub async fn current_user_raw(&self, session: &Session) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        read_json(response).await
    }
}
