use crate::{api::AppState, config::Settings, error, success, types::Session};

pub async fn profile(settings: Settings, token: &str) {
    let state = AppState::new(settings);

    let pb = super::spinner("Fetching profile...");
    let result = state.spotify.current_user(&Session::new(token)).await;
    pb.finish_and_clear();

    match result {
        Ok(user) => {
            success!(
                "Signed in as {} ({})",
                user.display_name.as_deref().unwrap_or("unknown"),
                user.id
            );
            if let Some(email) = user.email {
                println!("    {}", email);
            }
        }
        Err(e) => error!("Failed to fetch profile. Run playlist-genius login\n Error: {}", e),
    }
}
