use url::Url;

/// Titles shorter than this many characters are treated as noise
pub const MIN_TITLE_CHARS: usize = 2;

/// Trims and collapses every whitespace run to a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a raw title, returning `None` when it is too short to keep
pub fn normalize_title(raw: &str) -> Option<String> {
    let title = collapse_whitespace(raw);
    if title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }
    Some(title)
}

/// Extracts the `list` query parameter of a playlist URL
pub fn playlist_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "list")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
