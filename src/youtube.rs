//! YouTube link helpers for blog posts

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").unwrap()
});

/// Video ids are always this long; anything else is treated as no match.
const ID_LEN: usize = 11;

/// Extracts the video id from a YouTube URL
///
/// Handles `watch?v=`, `youtu.be/`, `embed/`, `v/` and `&v=` forms.
/// Returns `None` when no 11-character id can be found.
pub fn youtube_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_ID.captures(url)?;
    let id = caps.get(2)?.as_str();
    (id.chars().count() == ID_LEN).then(|| id.to_string())
}

/// Builds the embeddable player URL for a YouTube link
pub fn embed_url(url: &str) -> Option<String> {
    youtube_id(url).map(|id| format!("https://www.youtube.com/embed/{}", id))
}
