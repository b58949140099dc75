//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::{AlertKind, RenderBackend};
use crate::state::escape_html;

/// URL prefix for rendered document pages.
pub const DOCS_PREFIX: &str = "/docs";

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - headings wrapped in a self-link (`<a class="anchor-link">`)
/// - `<pre><code class="hljs language-x">` for code blocks
/// - `<div class="alert">` for GFM alerts
/// - relative `.md` / `.mdx` links rewritten to `/docs/<slug>`
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn heading(level: u8, id: &str, inner_html: &str, out: &mut String) {
        let _ = write!(
            out,
            r##"<h{level} id="{id}"><a class="anchor-link" href="#{id}">{inner_html}</a></h{level}>"##,
            id = escape_html(id),
        );
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        match lang {
            Some(lang) => {
                let _ = write!(
                    out,
                    r#"<pre><code class="hljs language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(content)
                );
            }
            None => {
                let _ = write!(
                    out,
                    r#"<pre><code class="hljs">{}</code></pre>"#,
                    escape_html(content)
                );
            }
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        let (class, title) = match kind {
            AlertKind::Note => ("note", "Note"),
            AlertKind::Tip => ("tip", "Tip"),
            AlertKind::Important => ("important", "Important"),
            AlertKind::Warning => ("warning", "Warning"),
            AlertKind::Caution => ("caution", "Caution"),
        };
        let _ = write!(
            out,
            r#"<div class="alert alert-{class}"><p class="alert-title">{title}</p>"#
        );
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        let _ = write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        );
    }

    fn transform_link<'a>(url: &'a str, base_path: Option<&str>) -> Cow<'a, str> {
        match base_path {
            Some(base) => resolve_link(url, base),
            None => Cow::Borrowed(url),
        }
    }
}

/// Resolve a markdown link URL against the directory of the current page.
///
/// Rewrites links to other markdown sources into the `/docs/<slug>` scheme:
/// - `./sibling.md` → `/docs/<base>/sibling`
/// - `../parent.mdx` → `/docs/<base-parent>/parent`
/// - `/guides/setup.md#install` → `/docs/guides/setup#install`
///
/// External links, fragment-only links, and non-markdown links are returned
/// unchanged.
fn resolve_link<'a>(url: &'a str, base_path: &str) -> Cow<'a, str> {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
    {
        return Cow::Borrowed(url);
    }

    let (path_part, fragment) = match url.find('#') {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    };

    let Some(stem) = strip_markdown_extension(path_part) else {
        return Cow::Borrowed(url);
    };

    let resolved = if let Some(absolute) = stem.strip_prefix('/') {
        resolve_relative_path(absolute, "")
    } else {
        resolve_relative_path(stem, base_path)
    };

    Cow::Owned(format!("{DOCS_PREFIX}/{resolved}{fragment}"))
}

/// Strip a trailing `.md` / `.mdx`, or `None` if the path has neither.
fn strip_markdown_extension(path: &str) -> Option<&str> {
    path.strip_suffix(".md")
        .or_else(|| path.strip_suffix(".mdx"))
        .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
}

/// Resolve a relative path against a base directory.
///
/// Handles `.` (current) and `..` (parent); `..` at the root is ignored.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_wraps_anchor() {
        let mut out = String::new();
        HtmlBackend::heading(2, "setup", "Setup", &mut out);
        assert_eq!(
            out,
            r##"<h2 id="setup"><a class="anchor-link" href="#setup">Setup</a></h2>"##
        );
    }

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="hljs language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "a < b", &mut out);
        assert_eq!(out, r#"<pre><code class="hljs">a &lt; b</code></pre>"#);
    }

    #[test]
    fn test_blockquote() {
        let mut out = String::new();
        HtmlBackend::blockquote_start(&mut out);
        out.push_str("content");
        HtmlBackend::blockquote_end(&mut out);
        assert_eq!(out, "<blockquote>content</blockquote>");
    }

    #[test]
    fn test_alert_warning() {
        let mut out = String::new();
        HtmlBackend::alert_start(AlertKind::Warning, &mut out);
        out.push_str("<p>Careful</p>");
        HtmlBackend::alert_end(AlertKind::Warning, &mut out);
        assert_eq!(
            out,
            r#"<div class="alert alert-warning"><p class="alert-title">Warning</p><p>Careful</p></div>"#
        );
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "Image title", &mut out);
        assert_eq!(
            out,
            r#"<img src="image.png" title="Image title" alt="Alt text">"#
        );
    }

    #[test]
    fn test_resolve_link_sibling() {
        assert_eq!(resolve_link("./other.md", "guides"), "/docs/guides/other");
        assert_eq!(resolve_link("other.mdx", "guides"), "/docs/guides/other");
    }

    #[test]
    fn test_resolve_link_parent_clamped_at_root() {
        assert_eq!(resolve_link("../intro.md", "guides"), "/docs/intro");
        assert_eq!(resolve_link("../../intro.md", ""), "/docs/intro");
    }

    #[test]
    fn test_resolve_link_absolute() {
        assert_eq!(
            resolve_link("/reference/api.md", "guides/advanced"),
            "/docs/reference/api"
        );
    }

    #[test]
    fn test_resolve_link_keeps_fragment() {
        assert_eq!(
            resolve_link("setup.md#install", "guides"),
            "/docs/guides/setup#install"
        );
    }

    #[test]
    fn test_resolve_link_unchanged() {
        assert_eq!(
            resolve_link("https://example.com/a.md", "guides"),
            "https://example.com/a.md"
        );
        assert_eq!(resolve_link("mailto:me@example.com", ""), "mailto:me@example.com");
        assert_eq!(resolve_link("#section", "guides"), "#section");
        assert_eq!(resolve_link("diagram.png", "guides"), "diagram.png");
        assert_eq!(resolve_link("notes.markdown", "guides"), "notes.markdown");
    }

    #[test]
    fn test_transform_link_without_base_path() {
        assert_eq!(HtmlBackend::transform_link("./other.md", None), "./other.md");
    }
}
