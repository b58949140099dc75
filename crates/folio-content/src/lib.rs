//! Document content layer for the folio documentation site.
//!
//! Turns markdown sources from a [`folio_storage::Storage`] backend into
//! [`DocumentPage`] records and derives the site navigation tree from their
//! source paths.
//!
//! # Architecture
//!
//! - [`DocumentLoader`] reads, parses and renders pages, and answers lookups
//!   (all pages, by slug, by category)
//! - [`build_navigation`] folds page paths into a sorted [`NavigationItem`] tree
//! - [`SiteConfig`] and [`validate_site_config`] describe the hand-authored
//!   site configuration
//! - [`FrontMatterParser`] and [`BodyRenderer`] are the seams for swapping
//!   metadata parsing or HTML rendering
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_content::{DocumentLoader, slug_from_file_path};
//! use folio_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("intro.md", "---\ntitle: Intro\norder: 1\n---\nWelcome.")
//!     .with_file("guides/setup.md", "---\ntitle: Setup\n---\nInstall it.");
//! let loader = DocumentLoader::new(Arc::new(storage));
//!
//! assert_eq!(slug_from_file_path("guides/setup.md"), "guides/setup");
//!
//! let nav = loader.navigation();
//! assert_eq!(nav[0].href, "/docs/intro");
//! assert_eq!(nav[1].title, "Guides");
//! ```

mod error;
mod front_matter;
mod loader;
mod navigation;
mod page;
mod pipeline;
mod site_config;
mod slug;
mod text;

pub use error::ContentError;
pub use front_matter::{FrontMatter, split_front_matter};
pub use loader::{DocumentLoader, LoaderConfig};
pub use navigation::{DEFAULT_ORDER, NavigationItem, build_navigation};
pub use page::{DocumentPage, UNTITLED};
pub use pipeline::{
    BodyRenderer, FrontMatterParser, HtmlBodyRenderer, RenderedBody, YamlFrontMatter,
};
pub use site_config::{Author, Footer, SiteConfig, Social, validate_site_config};
pub use slug::{file_stem, slug_from_file_path};
pub use text::{extract_excerpt, reading_time};
