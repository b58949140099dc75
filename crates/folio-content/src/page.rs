//! Document page record and its ordering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use folio_renderer::TocEntry;
use serde::{Deserialize, Serialize};

/// Title used when front matter has none.
pub const UNTITLED: &str = "Untitled";

/// One parsed content file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// Identifier derived from the source path (e.g., "guides/setup").
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendered HTML.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Date string exactly as written in front matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Estimated reading time in minutes.
    pub reading_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Relative source path with extension (e.g., "guides/setup.md").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub toc: Vec<TocEntry>,
}

impl DocumentPage {
    /// The page date as a point in time, if present and parseable.
    ///
    /// Accepts RFC 3339 date-times, `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`.
    /// Dates without an offset are taken as UTC.
    #[must_use]
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date)
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Listing order: dated pages newest first, then undated pages by title.
///
/// A date that fails to parse counts as undated. Pages with equal dates
/// compare equal, so a stable sort keeps their scan order.
pub(crate) fn listing_order(a: &DocumentPage, b: &DocumentPage) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_titles(&a.title, &b.title),
    }
}

/// Case-insensitive title comparison.
///
/// Titles differing only in case put the lower-case form first, as locale
/// collation does.
pub(crate) fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
pub(crate) fn test_page(slug: &str, title: &str) -> DocumentPage {
    DocumentPage {
        slug: slug.to_owned(),
        title: title.to_owned(),
        description: None,
        content: String::new(),
        category: None,
        date: None,
        excerpt: None,
        reading_time: 1,
        order: None,
        file_path: Some(format!("{slug}.md")),
        toc: Vec::new(),
    }
}
