use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
    response::Html,
};
use serde_json::Value;
use tokio::sync::{Mutex, oneshot};

use crate::{
    api::AppState,
    error::{ApiError, AppError},
    spotify::{self, SpotifyClient},
    types::{AuthSession, AuthorizeQuery, TokenExchangeRequest},
};

/// `GET /api/authorize`
///
/// Creates a PKCE session for the caller. The redirect URI defaults to the
/// configured one and may be overridden with `?redirect_uri=`.
pub async fn authorize(
    State(state): State<AppState>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Json<AuthSession>, AppError> {
    let redirect_uri = query
        .redirect_uri
        .filter(|uri| !uri.trim().is_empty())
        .unwrap_or_else(|| state.settings.redirect_uri.clone());

    let session = spotify::auth::new_session(&state.settings, &redirect_uri)
        .map_err(|e| AppError::Internal(format!("invalid accounts URL: {e}")))?;

    Ok(Json(session))
}

/// `POST /api/callback`
///
/// Exchanges `code` + `code_verifier` for a token set. The provider's token
/// JSON is returned unmodified; provider errors come back as a 500 carrying
/// the upstream status and body.
pub async fn exchange_token(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let request: TokenExchangeRequest =
        serde_json::from_value(payload.clone()).unwrap_or_default();

    let (Some(code), Some(redirect_uri), Some(code_verifier)) = (
        non_empty(request.code),
        non_empty(request.redirect_uri),
        non_empty(request.code_verifier),
    ) else {
        return Err(AppError::MissingFields {
            received: Some(payload),
        });
    };

    tracing::info!(%redirect_uri, "exchanging authorization code");

    match state
        .spotify
        .exchange_code(&code, &redirect_uri, &code_verifier)
        .await
    {
        Ok(token) => Ok(Json(token)),
        Err(ApiError::Status { status, body }) => {
            tracing::warn!(%status, "token exchange rejected");
            Err(AppError::TokenExchange {
                status: status.as_u16(),
                response: body,
            })
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// State of one CLI login: the verifier to present and where to report the
/// outcome of the exchange.
#[derive(Debug)]
pub struct LoginState {
    pub code_verifier: String,
    pub redirect_uri: String,
    pub spotify: SpotifyClient,
    pub done: Mutex<Option<oneshot::Sender<Result<Value, String>>>>,
}

/// `GET /callback` of the local listener started by `playlist-genius login`.
pub async fn login_callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<LoginState>>,
) -> Html<&'static str> {
    let (result, page) = if let Some(error) = params.get("error") {
        (
            Err(format!("authorization denied: {error}")),
            "<h4>Login cancelled.</h4>",
        )
    } else if let Some(code) = params.get("code") {
        match state
            .spotify
            .exchange_code(code, &state.redirect_uri, &state.code_verifier)
            .await
        {
            Ok(token) => (
                Ok(token),
                "<h2>Authentication successful.</h2><p>Close this browser window.</p>",
            ),
            Err(e) => (Err(e.to_string()), "<h4>Login failed.</h4>"),
        }
    } else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    if let Some(done) = state.done.lock().await.take() {
        let _ = done.send(result);
    }

    Html(page)
}
