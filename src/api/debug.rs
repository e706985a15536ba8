use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{api::AppState, utils};

/// `GET /api/debug`
///
/// Shape of the configured client id. Stray whitespace in the id is the usual
/// cause of `invalid_client` errors from the token endpoint.
pub async fn debug(State(state): State<AppState>) -> Json<Value> {
    let client_id = &state.settings.client_id;

    Json(json!({
        "client_id_length": client_id.len(),
        "client_id_preview": utils::preview_secret(client_id, 10),
        "has_newline": client_id.contains('\n'),
        "has_spaces": client_id.contains(' '),
        "completion_configured": state.completion.is_configured(),
    }))
}

/// `GET /api/debug/completion`
///
/// Probes the completion API key against the model listing endpoint.
pub async fn debug_completion(State(state): State<AppState>) -> Json<Value> {
    let Some(key) = state.completion.api_key() else {
        return Json(json!({ "error": "No API key found", "success": false }));
    };

    match state.completion.probe().await {
        Ok(status) => Json(json!({
            "status": status.as_u16(),
            "key_length": key.len(),
            "key_preview": utils::preview_secret(key, 8),
            "success": status.is_success(),
        })),
        Err(e) => Json(json!({ "error": e.to_string(), "success": false })),
    }
}
