//! folio CLI - documentation content tool.
//!
//! Provides commands for:
//! - `pages`: List all pages, optionally filtered by category
//! - `page`: Show a single page by slug
//! - `nav`: Show the navigation tree
//! - `site`: Show the validated site configuration
//!
//! Every command prints JSON to stdout.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{NavArgs, PageArgs, PagesArgs, SiteArgs};
use output::Output;

/// folio - documentation content tool.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pages, newest first.
    Pages(PagesArgs),
    /// Show a single page.
    Page(PageArgs),
    /// Show the navigation tree.
    Nav(NavArgs),
    /// Show the site configuration.
    Site(SiteArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Pages(args) => args.common.verbose,
            Self::Page(args) => args.common.verbose,
            Self::Nav(args) => args.common.verbose,
            Self::Site(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Pages(args) => args.execute(&output),
        Commands::Page(args) => args.execute(&output),
        Commands::Nav(args) => args.execute(&output),
        Commands::Site(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_pages_with_category() {
        let cli = Cli::try_parse_from(["folio", "pages", "--category", "guides", "-v"]).unwrap();

        let Commands::Pages(args) = cli.command else {
            panic!("expected pages command");
        };
        assert_eq!(args.category.as_deref(), Some("guides"));
        assert!(args.common.verbose);
    }

    #[test]
    fn test_parse_page_with_overrides() {
        let cli = Cli::try_parse_from([
            "folio",
            "page",
            "guides/setup",
            "-c",
            "site/folio.toml",
            "-s",
            "manual",
        ])
        .unwrap();

        assert!(!cli.command.verbose());
        let Commands::Page(args) = cli.command else {
            panic!("expected page command");
        };
        assert_eq!(args.slug, "guides/setup");
        assert_eq!(args.common.config, Some(PathBuf::from("site/folio.toml")));
        assert_eq!(args.common.source_dir, Some(PathBuf::from("manual")));
    }

    #[test]
    fn test_page_requires_slug() {
        assert!(Cli::try_parse_from(["folio", "page"]).is_err());
    }
}
