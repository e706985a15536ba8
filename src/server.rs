use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    Res,
    api::{self, AppState, LoginState},
};

/// Routes of the web backend. CORS is permissive because the UI is served
/// from a different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/authorize", get(api::authorize))
        .route("/api/callback", post(api::exchange_token))
        .route("/api/me", post(api::me))
        .route("/api/generate-playlist", post(api::generate_playlist))
        .route("/api/debug", get(api::debug))
        .route("/api/debug/completion", get(api::debug_completion))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the backend on `listener` until Ctrl-C.
pub async fn start_api_server(listener: TcpListener, state: AppState) -> Res<()> {
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Serves the one-shot login callback at `path`.
pub async fn start_callback_server(
    listener: TcpListener,
    path: String,
    state: Arc<LoginState>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route(&path, get(api::login_callback).layer(Extension(state)));

    axum::serve(listener, app).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
