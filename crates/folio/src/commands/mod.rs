//! CLI command implementations.

pub(crate) mod nav;
pub(crate) mod page;
pub(crate) mod pages;
pub(crate) mod site;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::{DocumentLoader, HtmlBodyRenderer, LoaderConfig};
use folio_storage::FsStorage;

use crate::error::CliError;

pub(crate) use nav::NavArgs;
pub(crate) use page::PageArgs;
pub(crate) use pages::PagesArgs;
pub(crate) use site::SiteArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Enable verbose output (timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    pub(crate) fn loader(&self) -> Result<DocumentLoader, CliError> {
        Ok(build_loader(&self.load_config()?))
    }
}

/// Build a document loader over the configured content root.
pub(crate) fn build_loader(config: &Config) -> DocumentLoader {
    let root = config.docs_resolved.content_root();
    tracing::debug!(content_root = %root.display(), "Using content root");

    let markdown = &config.markdown;
    DocumentLoader::new(Arc::new(FsStorage::new(root)))
        .with_config(LoaderConfig {
            excerpt_length: markdown.excerpt_length,
            words_per_minute: markdown.words_per_minute,
        })
        .with_renderer(HtmlBodyRenderer::new().with_gfm(markdown.gfm))
}
