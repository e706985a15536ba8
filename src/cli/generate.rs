use tabled::Table;

use crate::{
    api::AppState,
    config::Settings,
    error, info, success,
    types::{Session, SongTableRow},
    warning,
};

pub async fn generate(settings: Settings, token: &str, prompt: &str, novelty: bool) {
    let state = AppState::new(settings);
    if !state.completion.is_configured() {
        warning!("OPENAI_API_KEY is not set, falling back to keyword search");
    }

    let pb = super::spinner("Generating playlist...");
    let result = state
        .generator
        .generate(&Session::new(token), prompt, novelty)
        .await;
    pb.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => error!("Failed to generate playlist: {}", e),
    };

    if !outcome.songs.is_empty() {
        let rows: Vec<SongTableRow> = outcome.songs.iter().map(SongTableRow::from).collect();
        let table = Table::new(rows);
        println!("{}", table);
    }

    if !outcome.used_chatgpt {
        info!("Songs come from a keyword search, not from model suggestions");
    }

    if outcome.success {
        success!("{}", outcome.message);
        if let Some(url) = outcome.playlist_url {
            info!("{}", url);
        }
    } else {
        warning!("{}", outcome.message);
    }
}
