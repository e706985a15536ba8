use tokio::net::TcpListener;

use crate::{api::AppState, config::Settings, error, server};

pub async fn serve(settings: Settings, address: &str) {
    if settings.completion_api_key().is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, playlists will use keyword search only");
    }

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", address, e),
    };

    if let Err(e) = server::start_api_server(listener, AppState::new(settings)).await {
        error!("Server error: {}", e);
    }
}
