//! Slug derivation from relative source paths.

/// Derive a page slug from a relative source path.
///
/// Strips a trailing `.md` / `.mdx`, normalizes `\` to `/` and trims leading
/// and trailing slashes:
///
/// ```
/// use folio_content::slug_from_file_path;
///
/// assert_eq!(slug_from_file_path("guides/setup.md"), "guides/setup");
/// assert_eq!(slug_from_file_path("guides\\notes.mdx"), "guides/notes");
/// assert_eq!(slug_from_file_path("/intro.md/"), "intro.md");
/// ```
#[must_use]
pub fn slug_from_file_path(path: &str) -> String {
    let stem = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".mdx"))
        .unwrap_or(path);
    stem.replace('\\', "/").trim_matches('/').to_owned()
}

/// Base name of a path without its last extension (`guides/setup.md` → `setup`).
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Directory part of a slug (`guides/setup` → `guides`, `intro` → ``).
pub(crate) fn slug_dir(slug: &str) -> &str {
    slug.rsplit_once('/').map_or("", |(dir, _)| dir)
}
