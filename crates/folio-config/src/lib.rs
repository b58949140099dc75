//! Configuration management for folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Settings are layered: built-in defaults, then the config file, then
//! [`CliSettings`] applied during load.
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[docs]` section support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! source_dir = "${DOCS_DIR:-docs}"
//! fallback_dir = "content"
//!
//! [markdown]
//! gfm = true
//! excerpt_length = 160
//! words_per_minute = 200
//!
//! [site]
//! name = "My Project"
//! description = "Project documentation"
//! url = "https://docs.example.com"
//! author = { name = "Jane" }
//! navigation = [{ title = "Docs", href = "/docs" }]
//! ```

mod expand;

use std::path::{Path, PathBuf};

use folio_storage::resolve_content_root;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation directories (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Markdown processing settings.
    pub markdown: MarkdownConfig,
    /// Hand-authored site configuration, validated by the consumer.
    pub site: Option<toml::Table>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    fallback_dir: Option<String>,
}

/// Resolved documentation directories.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Preferred content directory.
    pub source_dir: PathBuf,
    /// Directory used when `source_dir` does not exist.
    pub fallback_dir: PathBuf,
}

impl DocsConfig {
    /// The directory pages are loaded from.
    ///
    /// `source_dir` if it is an existing directory, otherwise `fallback_dir`.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        resolve_content_root(&self.source_dir, &self.fallback_dir)
    }
}

/// Markdown processing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Maximum characters in a derived page excerpt.
    pub excerpt_length: usize,
    /// Reading speed for reading time estimates.
    pub words_per_minute: u32,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            excerpt_length: 160,
            words_per_minute: 200,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in the current directory and
    /// parents, falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            site: None,
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                fallback_dir: base.join("content"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a markdown setting is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markdown.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "markdown.excerpt_length must be greater than 0".to_owned(),
            ));
        }
        if self.markdown.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "markdown.words_per_minute must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.fallback_dir {
            self.docs.fallback_dir = Some(expand::expand_env(dir, "docs.fallback_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            fallback_dir: resolve(self.docs.fallback_dir.as_deref(), "content"),
        };
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
