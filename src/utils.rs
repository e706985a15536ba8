use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Spotify rejects playlist names longer than this.
pub const MAX_PLAYLIST_NAME_LEN: usize = 100;

const PROMPT_NAME_PREFIX: &str = "Playlist Genius: ";
const PROMPT_NAME_CHARS: usize = 80;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Year part of a Spotify release date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.get(..4)?.parse().ok()
}

/// Replaces control characters with spaces and collapses runs of whitespace.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Caps a name at [`MAX_PLAYLIST_NAME_LEN`] characters, ending in `...` when cut.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_PLAYLIST_NAME_LEN {
        return name.to_string();
    }

    let mut cut: String = name.chars().take(MAX_PLAYLIST_NAME_LEN - 3).collect();
    cut.push_str("...");
    cut
}

/// Playlist name: the model's title when it gave a usable one, otherwise a
/// name derived from the prompt.
pub fn playlist_name(prompt: &str, title: Option<&str>) -> String {
    if let Some(title) = title.map(sanitize_name).filter(|t| !t.is_empty()) {
        return truncate_name(&title);
    }

    let prompt: String = sanitize_name(prompt)
        .chars()
        .take(PROMPT_NAME_CHARS)
        .collect();
    truncate_name(&format!("{PROMPT_NAME_PREFIX}{prompt}"))
}

/// Detects a release era named in a prompt.
///
/// A standalone year (`1983`) wins over decades. Decades may be written as
/// `1990s`, `90s` or `90's`, optionally preceded by `early`, `mid` or `late`.
/// Two-digit decades below 20 are read as 2000s.
pub fn parse_era(prompt: &str, current_year: i32) -> Option<(i32, i32)> {
    let text = prompt.to_lowercase().replace('\'', "");
    let tokens: Vec<&str> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for token in &tokens {
        if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(year) = token.parse::<i32>() {
                if (1900..=current_year).contains(&year) {
                    return Some((year, year));
                }
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        let Some(start) = decade_start(token) else {
            continue;
        };

        let narrowed = match i.checked_sub(1).map(|p| tokens[p]) {
            Some("early") => (start, start + 3),
            Some("mid") => (start + 4, start + 6),
            Some("late") => (start + 7, start + 9),
            _ => (start, start + 9),
        };
        return Some(narrowed);
    }

    None
}

fn decade_start(token: &str) -> Option<i32> {
    let digits = token.strip_suffix('s')?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    match digits.len() {
        4 => {
            let year: i32 = digits.parse().ok()?;
            (1900..2100).contains(&year).then_some(year - year % 10)
        }
        2 => {
            let two: i32 = digits.parse().ok()?;
            if two % 10 != 0 {
                return None;
            }
            Some(if two >= 20 { 1900 + two } else { 2000 + two })
        }
        _ => None,
    }
}

const GENRE_KEYWORDS: &[(&str, &[&str])] = &[
    ("disco", &["disco"]),
    ("funk", &["funk", "funky"]),
    ("r&b", &["r&b", "rnb", "rhythm and blues", "soul"]),
    ("electronic", &["electronic", "synth", "techno", "edm"]),
    ("dance", &["dance", "club"]),
    ("punk", &["punk"]),
    ("goth", &["goth", "gothic"]),
    ("rock", &["rock"]),
    ("pop", &["pop"]),
    ("jazz", &["jazz"]),
    ("blues", &["blues"]),
    ("reggae", &["reggae"]),
    ("hip hop", &["hip hop", "rap", "hip-hop"]),
];

/// Genres named in a prompt, in table order.
pub fn detect_genres(prompt: &str) -> Vec<&'static str> {
    let text = prompt.to_lowercase();
    GENRE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(genre, _)| *genre)
        .collect()
}

/// Masks a secret for diagnostics, keeping only its first characters.
pub fn preview_secret(secret: &str, visible: usize) -> String {
    let shown: String = secret.chars().take(visible).collect();
    format!("{shown}...")
}
