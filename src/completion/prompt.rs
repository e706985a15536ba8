use crate::utils;

/// Songs requested from the model per playlist.
pub const TARGET_SUGGESTIONS: usize = 20;

/// Songs allowed per artist in one suggestion list.
pub const MAX_SONGS_PER_ARTIST: usize = 2;

/// Known artist names quoted back to the model as things to avoid.
pub const AVOID_ARTIST_SAMPLE: usize = 20;

const PERSONA: &str = concat!(
    "You are a music obsessive with encyclopedic knowledge across all genres and eras, ",
    "the friend everyone asks for the perfect deep cut."
);

const SPOTIFY_RULE: &str = concat!(
    "- Only suggest songs that are on Spotify, ",
    "using the original title and the primary artist."
);

const DEEP_CUT_RULE: &str = concat!(
    "- Pick songs that actually sound like the request, not just the same genre: ",
    "album cuts, B-sides, regional hits that never crossed over."
);

const TITLE_RULE: &str =
    "- Also come up with a short, catchy playlist title (at most 60 characters).";

const RESPONSE_FORMAT: &str = concat!(
    "Respond with valid JSON only, no other text, in exactly this shape:\n",
    r#"{"title": "playlist title", "songs": [{"name": "song title", "artist": "artist name", "#,
    r#""year": 1999, "reason": "one conversational sentence on why it fits"}]}"#
);

/// Everything the curation instructions are built from.
#[derive(Debug, Clone)]
pub struct CurationPrompt {
    pub prompt: String,
    pub known_track_count: usize,
    pub avoid_artists: Vec<String>,
    pub era: Option<(i32, i32)>,
    pub genres: Vec<&'static str>,
}

impl CurationPrompt {
    /// Derives era and genre hints from the prompt text. `avoid_artists` is
    /// cut down to [`AVOID_ARTIST_SAMPLE`] entries.
    pub fn new(
        prompt: &str,
        known_track_count: usize,
        mut avoid_artists: Vec<String>,
        current_year: i32,
    ) -> Self {
        avoid_artists.truncate(AVOID_ARTIST_SAMPLE);

        Self {
            prompt: prompt.to_string(),
            known_track_count,
            avoid_artists,
            era: utils::parse_era(prompt, current_year),
            genres: utils::detect_genres(prompt),
        }
    }

    pub fn system_message(&self) -> String {
        let mut rules = vec![
            format!("- Suggest exactly {TARGET_SUGGESTIONS} songs."),
            format!("- Never more than {MAX_SONGS_PER_ARTIST} songs by the same artist."),
            SPOTIFY_RULE.to_string(),
            DEEP_CUT_RULE.to_string(),
        ];

        if let Some((start, end)) = self.era {
            let range = if start == end {
                format!("released in {start}")
            } else {
                format!("released between {start} and {end} (inclusive)")
            };
            rules.push(format!(
                "- ABSOLUTELY CRITICAL: only songs {range}. \
                 Check every release year twice and drop anything outside it."
            ));
        }

        if self.genres.len() > 1 {
            rules.push(format!(
                "- The request names {} genres ({}). \
                 Include roughly equal amounts of each, about {} songs per genre.",
                self.genres.len(),
                self.genres.join(", "),
                TARGET_SUGGESTIONS / self.genres.len()
            ));
        }

        rules.push(TITLE_RULE.to_string());

        format!(
            "{PERSONA}\n\nRules:\n{}\n\n{RESPONSE_FORMAT}",
            rules.join("\n")
        )
    }

    pub fn user_message(&self) -> String {
        let mut message = format!("Create a playlist for: \"{}\"", self.prompt);

        if self.known_track_count > 0 {
            message.push_str(&format!(
                "\n\nThey already have {} tracks in their recent listening history, \
                 so skip the obvious picks.",
                self.known_track_count
            ));
        }

        if !self.avoid_artists.is_empty() {
            message.push_str(&format!(
                "\nAvoid these artists they already listen to: {}.",
                self.avoid_artists.join(", ")
            ));
        }

        message
    }
}
