use playlist_genius::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64 URL-safe encoded (no padding, no +, no /)
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));

    // SHA-256 digest is 32 bytes, 43 characters unpadded
    assert_eq!(challenge.len(), 43);
}

#[test]
fn test_generate_code_challenge_rfc7636_vector() {
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_release_year() {
    assert_eq!(release_year("1983-06-01"), Some(1983));
    assert_eq!(release_year("1983-06"), Some(1983));
    assert_eq!(release_year("1983"), Some(1983));
    assert_eq!(release_year("83"), None);
    assert_eq!(release_year(""), None);
    assert_eq!(release_year("unknown"), None);
}

#[test]
fn test_sanitize_name() {
    assert_eq!(sanitize_name("  Late   Night\tDrive \n"), "Late Night Drive");
    assert_eq!(sanitize_name("a\u{0007}b"), "a b");
    assert_eq!(sanitize_name("   "), "");
}

#[test]
fn test_truncate_name() {
    let short = "Rainy Sunday";
    assert_eq!(truncate_name(short), short);

    let exact = "x".repeat(MAX_PLAYLIST_NAME_LEN);
    assert_eq!(truncate_name(&exact), exact);

    let long = "y".repeat(150);
    let cut = truncate_name(&long);
    assert_eq!(cut.chars().count(), MAX_PLAYLIST_NAME_LEN);
    assert!(cut.ends_with("..."));
    assert_eq!(&cut[..97], &long[..97]);
}

#[test]
fn test_truncate_name_multibyte() {
    let long = "é".repeat(120);
    let cut = truncate_name(&long);
    assert_eq!(cut.chars().count(), MAX_PLAYLIST_NAME_LEN);
}

#[test]
fn test_playlist_name_prefers_title() {
    let name = playlist_name("some prompt", Some("  Neon   Nights "));
    assert_eq!(name, "Neon Nights");
}

#[test]
fn test_playlist_name_from_prompt() {
    assert_eq!(
        playlist_name("chill lo-fi for studying", None),
        "Playlist Genius: chill lo-fi for studying"
    );

    // blank titles fall back to the prompt
    assert_eq!(
        playlist_name("chill lo-fi for studying", Some("   ")),
        "Playlist Genius: chill lo-fi for studying"
    );
}

#[test]
fn test_playlist_name_prompt_is_cut_at_80_chars() {
    let prompt = "a".repeat(200);
    let name = playlist_name(&prompt, None);
    assert_eq!(name, format!("Playlist Genius: {}", "a".repeat(80)));
    assert!(name.chars().count() <= MAX_PLAYLIST_NAME_LEN);
}

#[test]
fn test_playlist_name_long_title_is_truncated() {
    let title = "t".repeat(140);
    let name = playlist_name("prompt", Some(&title));
    assert_eq!(name.chars().count(), MAX_PLAYLIST_NAME_LEN);
    assert!(name.ends_with("..."));
}

#[test]
fn test_parse_era_decades() {
    assert_eq!(parse_era("80s synth pop", 2026), Some((1980, 1989)));
    assert_eq!(parse_era("best of the 1990s", 2026), Some((1990, 1999)));
    assert_eq!(parse_era("70's funk", 2026), Some((1970, 1979)));
    assert_eq!(parse_era("00s indie", 2026), Some((2000, 2009)));
    assert_eq!(parse_era("2010s bangers", 2026), Some((2010, 2019)));
}

#[test]
fn test_parse_era_qualifiers() {
    assert_eq!(parse_era("early 90s hip hop", 2026), Some((1990, 1993)));
    assert_eq!(parse_era("mid 80s", 2026), Some((1984, 1986)));
    assert_eq!(parse_era("Late 70s disco", 2026), Some((1977, 1979)));
}

#[test]
fn test_parse_era_year_wins() {
    assert_eq!(parse_era("summer of 1983", 2026), Some((1983, 1983)));
    assert_eq!(parse_era("80s vibes but only 1985", 2026), Some((1985, 1985)));
}

#[test]
fn test_parse_era_none() {
    assert_eq!(parse_era("chill lo-fi for studying", 2026), None);
    // out of range years are ignored
    assert_eq!(parse_era("songs about 3000", 2026), None);
    assert_eq!(parse_era("in the year 2099", 2026), None);
    // not a decade
    assert_eq!(parse_era("85s", 2026), None);
}

#[test]
fn test_detect_genres() {
    assert_eq!(detect_genres("late 70s disco and funk"), vec!["disco", "funk"]);
    assert_eq!(detect_genres("Hip-Hop and Jazz"), vec!["jazz", "hip hop"]);
    assert!(detect_genres("rainy afternoon").is_empty());
}

#[test]
fn test_preview_secret() {
    assert_eq!(preview_secret("abcdefghijkl", 4), "abcd...");
    assert_eq!(preview_secret("ab", 4), "ab...");
}
