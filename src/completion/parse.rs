use serde_json::Value;

use crate::types::{SuggestedSong, Suggestions};

/// Parses a model answer into song suggestions.
///
/// Accepts `{"title": .., "songs": [..]}` or a bare array of songs, with or
/// without a surrounding markdown code fence. When the whole text is not
/// JSON, the outermost object or array inside it is tried. Songs need a
/// `name` (or `title`) and an `artist`; entries without them are skipped.
///
/// Returns `None` when nothing usable could be parsed.
pub fn parse_suggestions(content: &str) -> Option<Suggestions> {
    let cleaned = strip_code_fence(content);

    let value = serde_json::from_str::<Value>(cleaned)
        .ok()
        .or_else(|| embedded_json(cleaned))?;

    let (title, songs) = match &value {
        Value::Object(map) => {
            let songs = map
                .get("songs")
                .or_else(|| map.get("tracks"))
                .and_then(Value::as_array)?;
            let title = map
                .get("title")
                .or_else(|| map.get("playlist_title"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            (title, songs)
        }
        Value::Array(songs) => (None, songs),
        _ => return None,
    };

    Some(Suggestions {
        title,
        songs: songs.iter().filter_map(suggested_song).collect(),
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string, e.g. ```json
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().trim_end_matches("```").trim()
}

fn embedded_json(content: &str) -> Option<Value> {
    let start = content.find(['{', '['])?;
    let close = if content[start..].starts_with('{') { '}' } else { ']' };
    let end = content.rfind(close)?;
    if end <= start {
        return None;
    }

    serde_json::from_str(&content[start..=end]).ok()
}

fn suggested_song(item: &Value) -> Option<SuggestedSong> {
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(SuggestedSong {
        name: text("name").or_else(|| text("title"))?,
        artist: text("artist")?,
        reason: text("reason"),
        year: item.get("year").and_then(year_of),
    })
}

fn year_of(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.get(..4)?.parse().ok(),
        _ => None,
    }
}
