//! Document loading from storage.
//!
//! Provides [`DocumentLoader`], which turns the markdown sources of a
//! [`Storage`] backend into [`DocumentPage`] records.
//!
//! Files are processed one after another. A file that cannot be read or
//! parsed is logged and skipped; it never aborts the batch.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use folio_content::DocumentLoader;
//! use folio_storage::MockStorage;
//!
//! let storage = MockStorage::new()
//!     .with_file("guides/setup.md", "---\ntitle: Setup\n---\nInstall it.");
//! let loader = DocumentLoader::new(Arc::new(storage));
//!
//! let page = loader.page_by_slug("guides/setup").unwrap();
//! assert_eq!(page.title, "Setup");
//! ```

use std::sync::Arc;
use std::time::Instant;

use folio_storage::{MARKDOWN_EXTENSIONS, SourceFile, Storage};

use crate::error::ContentError;
use crate::navigation::{NavigationItem, build_navigation};
use crate::page::{DocumentPage, UNTITLED, listing_order};
use crate::pipeline::{BodyRenderer, FrontMatterParser, HtmlBodyRenderer, YamlFrontMatter};
use crate::slug::slug_from_file_path;
use crate::text::{extract_excerpt, reading_time};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Tunables for page processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Maximum characters in a derived excerpt.
    pub excerpt_length: usize,
    /// Reading speed used for reading time.
    pub words_per_minute: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            excerpt_length: 160,
            words_per_minute: 200,
        }
    }
}

/// Loads document pages from storage.
///
/// The content root is fixed by the storage passed in; the loader never
/// probes the filesystem itself.
pub struct DocumentLoader {
    storage: Arc<dyn Storage>,
    config: LoaderConfig,
    parser: Box<dyn FrontMatterParser>,
    renderer: Box<dyn BodyRenderer>,
}

impl DocumentLoader {
    /// Create a loader with YAML front matter and the HTML renderer.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            config: LoaderConfig::default(),
            parser: Box::new(YamlFrontMatter),
            renderer: Box::new(HtmlBodyRenderer::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the front matter parser.
    #[must_use]
    pub fn with_front_matter_parser(mut self, parser: impl FrontMatterParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replace the body renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl BodyRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every page, sorted for listing.
    ///
    /// Dated pages come first, newest first; undated pages follow in title
    /// order.
    pub fn all_pages(&self) -> Vec<DocumentPage> {
        let start = Instant::now();
        let files = self.scan();

        let mut pages = Vec::with_capacity(files.len());
        for file in &files {
            match self.load_page(&file.path, &slug_from_file_path(&file.path)) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    tracing::warn!(path = %file.path, error = %e, "Failed to process document");
                }
            }
        }

        pages.sort_by(listing_order);

        tracing::info!(
            file_count = files.len(),
            page_count = pages.len(),
            elapsed_ms = elapsed_ms(start),
            "Documents loaded"
        );
        pages
    }

    /// Look up a single page.
    ///
    /// Tries the file whose slug equals `slug`, then the first file whose
    /// base name equals `slug`. Each file is read at most once. The returned
    /// page carries the requested slug. Returns `None` when nothing matches
    /// or every match fails to load.
    pub fn page_by_slug(&self, slug: &str) -> Option<DocumentPage> {
        let mut tried: Vec<String> = Vec::new();

        if let Some(file) = self.exact_source(slug) {
            if let Some(page) = self.try_load(&file, slug) {
                return Some(page);
            }
            tried.push(file.path);
        }

        let files = self.scan();
        let exact = files.iter().find(|f| slug_from_file_path(&f.path) == slug);
        let by_stem = files.iter().find(|f| f.stem() == slug);

        for file in exact.into_iter().chain(by_stem) {
            if tried.contains(&file.path) {
                continue;
            }
            if let Some(page) = self.try_load(file, slug) {
                return Some(page);
            }
            tried.push(file.path.clone());
        }

        tracing::debug!(slug, "Document not found");
        None
    }

    /// Source whose slug is `slug`, found without a full scan when possible.
    fn exact_source(&self, slug: &str) -> Option<SourceFile> {
        MARKDOWN_EXTENSIONS
            .iter()
            .map(|ext| format!("{slug}.{ext}"))
            .find(|path| slug_from_file_path(path) == slug && self.storage.exists(path))
            .map(SourceFile::new)
    }

    fn try_load(&self, file: &SourceFile, slug: &str) -> Option<DocumentPage> {
        match self.load_page(&file.path, slug) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(path = %file.path, error = %e, "Failed to process document");
                None
            }
        }
    }

    /// All pages whose category equals `category` exactly, in listing order.
    pub fn pages_by_category(&self, category: &str) -> Vec<DocumentPage> {
        self.all_pages()
            .into_iter()
            .filter(|page| page.category.as_deref() == Some(category))
            .collect()
    }

    /// Navigation tree for all pages.
    pub fn navigation(&self) -> Vec<NavigationItem> {
        build_navigation(&self.all_pages())
    }

    /// Read and process one source file into a page with the given slug.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the file cannot be read or its front
    /// matter is invalid.
    pub fn load_page(&self, path: &str, slug: &str) -> Result<DocumentPage, ContentError> {
        let raw = self.storage.read(path)?;
        let (meta, body) = self.parser.parse(&raw)?;
        let rendered = self.renderer.render(&body, &slug_from_file_path(path));

        let excerpt = meta
            .excerpt
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| extract_excerpt(&rendered.html, self.config.excerpt_length));

        Ok(DocumentPage {
            slug: slug.to_owned(),
            title: meta
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED.to_owned()),
            description: meta.description,
            content: rendered.html,
            category: meta.category,
            date: meta.date,
            excerpt: Some(excerpt),
            reading_time: reading_time(&body, self.config.words_per_minute),
            order: meta.order,
            file_path: Some(path.to_owned()),
            toc: rendered.toc,
        })
    }

    /// Enumerate sources; a failing scan is logged and yields nothing.
    fn scan(&self) -> Vec<SourceFile> {
        match self.storage.scan() {
            Ok(files) => {
                tracing::debug!(file_count = files.len(), "Storage scan completed");
                files
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to scan storage");
                Vec::new()
            }
        }
    }
}
