//! Render backend trait for format-specific rendering.
//!
//! The generic renderer handles structure (lists, tables, inline formatting)
//! and delegates elements whose markup depends on the target to a backend.

use std::borrow::Cow;

use pulldown_cmark::BlockQuoteKind;

/// GitHub-style alert type (`> [!NOTE]`, `> [!WARNING]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render a heading whose inner HTML is already built.
    fn heading(level: u8, id: &str, inner_html: &str, out: &mut String);

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The raw, unescaped code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    fn blockquote_start(out: &mut String);

    fn blockquote_end(out: &mut String);

    fn alert_start(kind: AlertKind, out: &mut String);

    fn alert_end(kind: AlertKind, out: &mut String);

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Transform a link URL.
    ///
    /// Default implementation returns the URL unchanged.
    #[must_use]
    fn transform_link<'a>(url: &'a str, _base_path: Option<&str>) -> Cow<'a, str> {
        Cow::Borrowed(url)
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
