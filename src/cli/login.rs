use std::{sync::Arc, time::Duration};

use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};
use url::Url;

use crate::{
    api::{AppState, LoginState},
    config::Settings,
    error, info, server, spotify, success, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the complete OAuth 2.0 PKCE login from the terminal.
///
/// 1. **PKCE Setup**: Generates a verifier and its S256 challenge
/// 2. **Listener**: Binds the host and port of the configured redirect URI
/// 3. **Browser Launch**: Opens the Spotify authorization page
/// 4. **Callback Handling**: The listener exchanges the returned code
/// 5. **Output**: Prints the token set; nothing is written to disk
///
/// The redirect URI must be registered with the Spotify application and
/// point at this machine, e.g. `http://127.0.0.1:8888/callback`.
pub async fn login(settings: Settings) {
    let redirect = match Url::parse(&settings.redirect_uri) {
        Ok(url) => url,
        Err(e) => error!("Invalid redirect URI {}: {}", settings.redirect_uri, e),
    };
    let (Some(host), Some(port)) = (redirect.host_str(), redirect.port_or_known_default()) else {
        error!("Redirect URI {} has no host or port", settings.redirect_uri);
    };

    let session = match spotify::auth::new_session(&settings, &settings.redirect_uri) {
        Ok(session) => session,
        Err(e) => error!("Failed to build authorization URL: {}", e),
    };

    let listener = match TcpListener::bind(format!("{host}:{port}")).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to listen on {}:{}: {}", host, port, e),
    };

    let (done_tx, done_rx) = oneshot::channel();
    let state = AppState::new(settings.clone());
    let login_state = Arc::new(LoginState {
        code_verifier: session.code_verifier.clone(),
        redirect_uri: settings.redirect_uri.clone(),
        spotify: state.spotify.clone(),
        done: Mutex::new(Some(done_tx)),
    });

    let callback_server = tokio::spawn(server::start_callback_server(
        listener,
        redirect.path().to_string(),
        login_state,
    ));

    if webbrowser::open(&session.authorize_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            session.authorize_url
        )
    }
    info!("Waiting for Spotify to redirect back...");

    let result = tokio::time::timeout(LOGIN_TIMEOUT, done_rx).await;
    callback_server.abort();

    match result {
        Ok(Ok(Ok(token))) => {
            success!("Authentication successful!");
            match serde_json::to_string_pretty(&token) {
                Ok(json) => println!("{}", json),
                Err(e) => warning!("Failed to print token: {}", e),
            }
            info!("Pass the access_token to `generate --token` or set SPOTIFY_ACCESS_TOKEN");
        }
        Ok(Ok(Err(e))) => error!("Authentication failed: {}", e),
        Ok(Err(_)) | Err(_) => error!("Authentication failed or timed out."),
    }
}
