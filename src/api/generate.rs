use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    api::AppState,
    error::{AppError, GenerationError},
    types::{GenerateOutcome, GenerateRequest, Session},
};

/// `POST /api/generate-playlist`
///
/// Body: `{"prompt": "...", "access_token": "...", "novelty": true}`.
/// Every error body carries `"success": false`.
pub async fn generate_playlist(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateOutcome>, GenerationError> {
    let Json(payload) = payload.map_err(AppError::from)?;
    let request: GenerateRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::InvalidBody(e.to_string()))?;

    let (Some(prompt), Some(access_token)) = (request.prompt, request.access_token) else {
        return Err(AppError::MissingFields { received: None }.into());
    };

    tracing::info!(novelty = request.novelty, "generating playlist");

    let outcome = state
        .generator
        .generate(&Session::new(access_token), &prompt, request.novelty)
        .await?;

    Ok(Json(outcome))
}
