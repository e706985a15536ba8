use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// PKCE pair plus the authorize URL built from it. Handed to the caller, who
/// keeps it until the provider redirects back with a code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub code_verifier: String,
    pub code_challenge: String,
    pub authorize_url: String,
}

/// Credentials the caller presents on every request.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizeQuery {
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenExchangeRequest {
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub access_token: Option<String>,
    /// Drop popular tracks as well as already-heard ones.
    #[serde(default = "default_novelty")]
    pub novelty: bool,
}

fn default_novelty() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedSong {
    pub name: String,
    pub artist: String,
    pub reason: Option<String>,
    pub year: Option<i32>,
}

/// Songs and optional title parsed from a completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub title: Option<String>,
    pub songs: Vec<SuggestedSong>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedTrack {
    pub name: String,
    pub artist: String,
    #[serde(rename = "spotify_id")]
    pub catalog_id: String,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    pub popularity: u32,
    #[serde(rename = "year")]
    pub release_year: Option<i32>,
    #[serde(rename = "chatgpt_reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MatchedTrack {
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.catalog_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub success: bool,
    pub message: String,
    pub prompt: String,
    pub songs: Vec<MatchedTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_url: Option<String>,
    pub used_chatgpt: bool,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub name: String,
    pub artist: String,
    pub year: String,
    pub popularity: u32,
}

impl From<&MatchedTrack> for SongTableRow {
    fn from(track: &MatchedTrack) -> Self {
        SongTableRow {
            name: track.name.clone(),
            artist: track.artist.clone(),
            year: track
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            popularity: track.popularity,
        }
    }
}

// Spotify Web API shapes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `None` for local files, which have no catalog entry.
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Paging { items: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Paging<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

// Chat-completion API shapes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}
