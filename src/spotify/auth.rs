use serde_json::Value;
use url::Url;

use crate::{
    config::Settings,
    error::ApiError,
    spotify::{SpotifyClient, read_json},
    types::AuthSession,
    utils,
};

/// Starts an OAuth 2.0 PKCE login.
///
/// Generates a fresh code verifier, derives its S256 challenge and builds the
/// Spotify authorization URL the user has to visit. Nothing is stored: the
/// caller keeps the returned session until Spotify redirects back with a
/// code, then hands the verifier to [`SpotifyClient::exchange_code`].
///
/// # Arguments
///
/// * `settings` - Supplies the accounts URL, client id and scopes
/// * `redirect_uri` - Where Spotify sends the user afterwards; must be
///   registered with the Spotify application
///
/// # Errors
///
/// Fails only when the configured accounts URL is not a valid URL.
pub fn new_session(
    settings: &Settings,
    redirect_uri: &str,
) -> Result<AuthSession, url::ParseError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let authorize_url = Url::parse_with_params(
        &settings.authorize_url(),
        &[
            ("response_type", "code"),
            ("client_id", settings.client_id()),
            ("scope", settings.scope.as_str()),
            ("redirect_uri", redirect_uri),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge.as_str()),
        ],
    )?;

    Ok(AuthSession {
        code_verifier,
        code_challenge,
        authorize_url: authorize_url.to_string(),
    })
}

impl SpotifyClient {
    /// Exchanges an authorization code for a token set using PKCE.
    ///
    /// Posts the code, redirect URI and verifier as a form to the accounts
    /// token endpoint together with the server-held client id. The token JSON
    /// is returned untouched so callers can pass it through.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] with the raw body when Spotify rejects the
    ///   exchange (expired code, verifier mismatch, redirect mismatch)
    /// - [`ApiError::Http`] on network failures
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
        code_verifier: &str,
    ) -> Result<Value, ApiError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("code_verifier", code_verifier),
            ])
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "token endpoint answered");
        read_json(response).await
    }
}
