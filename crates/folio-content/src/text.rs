//! Plain-text helpers: reading time and excerpts.

use std::sync::LazyLock;

use regex::Regex;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Estimated reading time in minutes, rounded up.
///
/// Words are the whitespace-separated tokens of the trimmed text. Empty text
/// still counts as one word, so every page takes at least a minute.
#[must_use]
pub fn reading_time(text: &str, words_per_minute: u32) -> u32 {
    let words = text.split_whitespace().count().max(1);
    let wpm = usize::try_from(words_per_minute.max(1)).unwrap_or(usize::MAX);
    u32::try_from(words.div_ceil(wpm)).unwrap_or(u32::MAX)
}

/// Plain-text summary of rendered HTML.
///
/// Strips tags and turns newlines into spaces. Text longer than `max_len`
/// characters is cut, trimmed and terminated with `...`.
#[must_use]
pub fn extract_excerpt(html: &str, max_len: usize) -> String {
    let text = TAG_PATTERN.replace_all(html, "").replace('\n', " ");
    if text.chars().count() <= max_len {
        return text;
    }

    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim())
}
