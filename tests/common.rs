#![allow(dead_code, clippy::unwrap_used)]
//! Test harness: a mock of the Spotify accounts service, the Spotify Web API
//! and the chat-completion API, plus the backend wired against it. Both run
//! on ephemeral ports.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, Once},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use playlist_genius::{api::AppState, config::Settings, server};
use serde_json::{Value, json};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub const USER_ID: &str = "user-1";
pub const TOKEN: &str = "good-token";

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("playlist_genius=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

/// A Spotify track object as the Web API returns it.
pub fn track(id: &str, name: &str, artist: &str, popularity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "id": format!("{id}-artist"), "name": artist }],
        "album": { "id": format!("{id}-album"), "name": "Album", "release_date": "1998-04-20" },
        "preview_url": null,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") },
        "popularity": popularity
    })
}

/// A local file as it shows up in listening history: no catalog id.
pub fn local_track(name: &str) -> Value {
    json!({
        "id": null,
        "name": name,
        "artists": [{ "id": null, "name": "Me" }],
        "album": { "id": null, "name": null, "release_date": null },
        "preview_url": null,
        "external_urls": {},
        "popularity": 0,
        "is_local": true
    })
}

/// A completion answer suggesting `songs` as `(name, artist)` pairs.
pub fn suggestions(title: &str, songs: &[(&str, &str)]) -> String {
    let songs: Vec<Value> = songs
        .iter()
        .map(|(name, artist)| {
            json!({ "name": name, "artist": artist, "year": 1998, "reason": "Fits." })
        })
        .collect();
    json!({ "title": title, "songs": songs }).to_string()
}

#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub body: Value,
}

/// Canned upstream answers. Every request is recorded in `calls`.
#[derive(Debug)]
pub struct MockUpstream {
    pub token_status: StatusCode,
    pub token_body: Value,
    pub me_status: StatusCode,
    pub me_body: Value,
    pub recently_played: Vec<Value>,
    pub top_tracks: Vec<Value>,
    /// Search results keyed by the exact `q` parameter.
    pub search: HashMap<String, Vec<Value>>,
    /// Delay before answering a search, keyed by `q`.
    pub search_delays: HashMap<String, Duration>,
    /// Content of the first choice; `None` answers 500.
    pub completion: Option<String>,
    pub create_status: StatusCode,
    pub add_status: StatusCode,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: json!({
                "access_token": "new-access-token",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "new-refresh-token",
                "scope": "user-read-private"
            }),
            me_status: StatusCode::OK,
            me_body: json!({
                "id": USER_ID,
                "display_name": "Test User",
                "email": "test@example.com",
                "country": "DE"
            }),
            recently_played: Vec::new(),
            top_tracks: Vec::new(),
            search: HashMap::new(),
            search_delays: HashMap::new(),
            completion: None,
            create_status: StatusCode::CREATED,
            add_status: StatusCode::CREATED,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockUpstream {
    /// Registers `track` as the only hit for `"{name} {artist}"`.
    pub fn with_hit(mut self, name: &str, artist: &str, track: Value) -> Self {
        self.search.insert(format!("{name} {artist}"), vec![track]);
        self
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path == path)
            .cloned()
            .collect()
    }

    fn record(&self, path: impl Into<String>, body: Value) {
        self.calls.lock().unwrap().push(Call {
            path: path.into(),
            body,
        });
    }
}

type Mock = State<Arc<MockUpstream>>;

async fn token(State(mock): Mock, body: String) -> (StatusCode, Json<Value>) {
    let form: HashMap<String, String> = url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect();
    mock.record("/api/token", json!(form));
    (mock.token_status, Json(mock.token_body.clone()))
}

async fn me(State(mock): Mock) -> (StatusCode, Json<Value>) {
    mock.record("/v1/me", Value::Null);
    (mock.me_status, Json(mock.me_body.clone()))
}

async fn recently_played(State(mock): Mock) -> Json<Value> {
    mock.record("/v1/me/player/recently-played", Value::Null);
    let items: Vec<Value> = mock
        .recently_played
        .iter()
        .map(|track| json!({ "track": track, "played_at": "2024-01-01T00:00:00Z" }))
        .collect();
    Json(json!({ "items": items }))
}

async fn top_tracks(State(mock): Mock) -> Json<Value> {
    mock.record("/v1/me/top/tracks", Value::Null);
    Json(json!({ "items": mock.top_tracks }))
}

async fn search(
    State(mock): Mock,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(20);
    mock.record("/v1/search", json!({ "q": q, "limit": limit }));
    if let Some(delay) = mock.search_delays.get(&q) {
        tokio::time::sleep(*delay).await;
    }

    let items: Vec<Value> = mock
        .search
        .get(&q)
        .map(|hits| hits.iter().take(limit).cloned().collect())
        .unwrap_or_default();
    Json(json!({ "tracks": { "items": items } }))
}

async fn create_playlist(
    State(mock): Mock,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record(format!("/v1/users/{user_id}/playlists"), body);
    if !mock.create_status.is_success() {
        return (
            mock.create_status,
            Json(json!({ "error": { "status": mock.create_status.as_u16(), "message": "nope" } })),
        );
    }
    (
        mock.create_status,
        Json(json!({
            "id": "playlist-1",
            "name": "created",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/playlist-1" }
        })),
    )
}

async fn add_tracks(
    State(mock): Mock,
    Path(playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record(format!("/v1/playlists/{playlist_id}/tracks"), body);
    if !mock.add_status.is_success() {
        return (
            mock.add_status,
            Json(json!({ "error": { "status": mock.add_status.as_u16(), "message": "nope" } })),
        );
    }
    (mock.add_status, Json(json!({ "snapshot_id": "snapshot-1" })))
}

async fn chat_completions(
    State(mock): Mock,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record("/openai/chat/completions", body);
    match &mock.completion {
        Some(content) => (
            StatusCode::OK,
            Json(json!({
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
            })),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "model overloaded" } })),
        ),
    }
}

async fn models(State(mock): Mock) -> Json<Value> {
    mock.record("/openai/models", Value::Null);
    Json(json!({ "data": [] }))
}

pub struct TestApp {
    pub url: String,
    pub upstream_url: String,
    pub client: reqwest::Client,
    pub mock: Arc<MockUpstream>,
}

impl TestApp {
    /// Spawns the mock upstream and the backend. `api_key` configures the
    /// completion client; `None` leaves it unconfigured.
    pub async fn spawn(mock: MockUpstream, api_key: Option<&str>) -> Self {
        setup_tracing();
        let mock = Arc::new(mock);

        let upstream = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/player/recently-played", get(recently_played))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/search", get(search))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route("/v1/playlists/{playlist_id}/tracks", post(add_tracks))
            .route("/openai/chat/completions", post(chat_completions))
            .route("/openai/models", get(models))
            .with_state(Arc::clone(&mock));

        let upstream_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let upstream_url = format!("http://{}", upstream_listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(upstream_listener, upstream).await.unwrap();
        });

        let settings = test_settings(&upstream_url, api_key);
        let app = server::router(AppState::new(settings));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url,
            upstream_url,
            client: reqwest::Client::new(),
            mock,
        }
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(format!("{}{}", self.url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(format!("{}{}", self.url, path))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    pub async fn generate(&self, prompt: &str) -> (StatusCode, Value) {
        self.post(
            "/api/generate-playlist",
            json!({ "prompt": prompt, "access_token": TOKEN }),
        )
        .await
    }
}

pub fn test_settings(upstream_url: &str, api_key: Option<&str>) -> Settings {
    Settings {
        client_id: "test-client-id\n".to_string(),
        redirect_uri: "http://127.0.0.1:3000/callback".to_string(),
        scope: "user-read-private playlist-modify-private".to_string(),
        spotify_api_url: format!("{upstream_url}/v1"),
        spotify_accounts_url: upstream_url.to_string(),
        completion_api_key: api_key.map(str::to_string),
        completion_api_url: format!("{upstream_url}/openai"),
        completion_model: "test-model".to_string(),
    }
}
