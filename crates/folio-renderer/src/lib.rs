//! Markdown to HTML renderer for folio document pages.
//!
//! This crate provides a generic [`MarkdownRenderer`] driven by pulldown-cmark
//! events. Format-specific markup is delegated to a [`RenderBackend`]; the
//! [`HtmlBackend`] produces the HTML served under `/docs/`.
//!
//! Rendering includes:
//! - GitHub Flavored Markdown (tables, strikethrough, task lists, alerts)
//! - heading IDs with self-linking anchors and a table of contents
//! - `hljs language-x` classes on fenced code blocks for client-side highlighting
//! - raw HTML passthrough
//!
//! # Example
//!
//! ```
//! use folio_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_base_path("guides")
//!     .render_markdown("## Install\n\nSee [setup](setup.md).");
//!
//! assert_eq!(result.toc[0].id, "install");
//! assert!(result.html.contains(r#"href="/docs/guides/setup""#));
//! ```

mod backend;
mod html;
mod renderer;
mod state;

pub use backend::{AlertKind, RenderBackend};
pub use html::{DOCS_PREFIX, HtmlBackend};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
