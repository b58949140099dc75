//! Pluggable processing steps used by the document loader.
//!
//! The loader needs two capabilities per file: split raw text into metadata
//! and body, and turn the body into HTML. Both are traits so tests and
//! embedders can swap in their own implementations.

use folio_renderer::{HtmlBackend, MarkdownRenderer, TocEntry};

use crate::error::ContentError;
use crate::front_matter::{FrontMatter, split_front_matter};
use crate::slug::slug_dir;

/// Splits raw source text into front matter and body.
pub trait FrontMatterParser: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ContentError::FrontMatter`] if the metadata block is invalid.
    fn parse(&self, raw: &str) -> Result<(FrontMatter, String), ContentError>;
}

/// `---`-fenced YAML front matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlFrontMatter;

impl FrontMatterParser for YamlFrontMatter {
    fn parse(&self, raw: &str) -> Result<(FrontMatter, String), ContentError> {
        let (meta, body) = split_front_matter(raw)?;
        Ok((meta, body.to_owned()))
    }
}

/// HTML produced from a page body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedBody {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Renders a page body to HTML.
pub trait BodyRenderer: Send + Sync {
    /// Render `body` for the page at `slug` (used to resolve relative links).
    fn render(&self, body: &str, slug: &str) -> RenderedBody;
}

/// Markdown renderer backed by `folio-renderer`.
#[derive(Clone, Copy, Debug)]
pub struct HtmlBodyRenderer {
    gfm: bool,
}

impl HtmlBodyRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }
}

impl Default for HtmlBodyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyRenderer for HtmlBodyRenderer {
    fn render(&self, body: &str, slug: &str) -> RenderedBody {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.gfm)
            .with_base_path(slug_dir(slug))
            .render_markdown(body);
        RenderedBody {
            html: result.html,
            toc: result.toc,
        }
    }
}
