//! # CLI Module
//!
//! Command-line front end for Playlist Genius. Every command builds the same
//! clients the web backend uses, so a playlist generated from the terminal
//! goes through exactly the same pipeline as one requested over HTTP.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the web backend
//! - [`login`] - Browser based PKCE login, prints the token set
//! - [`profile`] - Shows the account behind a token
//! - [`generate`] - Generates a playlist from a prompt
//!
//! ## Output
//!
//! User-facing status lines go through the crate's `info!`, `success!`,
//! `warning!` and `error!` macros; long-running calls show an `indicatif`
//! spinner. `error!` exits the process, so commands never return errors.

mod generate;
mod login;
mod profile;
mod serve;

pub use generate::generate;
pub use login::login;
pub use profile::profile;
pub use serve::serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
