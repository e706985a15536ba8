use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    api::AppState,
    error::{ApiError, AppError},
    types::{ProfileRequest, Session},
};

const PROFILE_ERROR: &str = "Failed to fetch user profile";

/// `POST /api/me`
///
/// Forwards the caller's token to Spotify and passes the profile through.
pub async fn me(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let request: ProfileRequest = serde_json::from_value(payload).unwrap_or_default();

    let Some(access_token) = request.access_token.filter(|t| !t.trim().is_empty()) else {
        return Err(AppError::MissingFields { received: None });
    };

    match state.spotify.current_user_raw(&Session::new(access_token)).await {
        Ok(profile) => Ok(Json(profile)),
        Err(e @ ApiError::Status { .. }) => {
            let details = e.details();
            match e.status() {
                Some(StatusCode::UNAUTHORIZED) => Err(AppError::Unauthorized {
                    message: PROFILE_ERROR.to_string(),
                    details: Some(details),
                }),
                status => Err(AppError::Upstream {
                    message: PROFILE_ERROR.to_string(),
                    status: status.map_or(500, |s| s.as_u16()),
                    details,
                }),
            }
        }
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}
