//! `folio page` command implementation.

use clap::Args;
use folio_content::DocumentPage;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Page slug or file base name (e.g., "guides/setup" or "setup").
    pub slug: String,
}

impl PageArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        output.json(&self.run()?)
    }

    fn run(&self) -> Result<DocumentPage, CliError> {
        self.common
            .loader()?
            .page_by_slug(&self.slug)
            .ok_or_else(|| CliError::PageNotFound(self.slug.clone()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::test_support::project;

    #[test]
    fn test_page_found_by_stem() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = PageArgs {
            common: project(
                temp_dir.path(),
                "",
                &[("guides/setup.md", "---\ntitle: Setup\n---\n")],
            ),
            slug: "setup".to_owned(),
        };

        let page = args.run().unwrap();

        assert_eq!(page.title, "Setup");
        assert_eq!(page.file_path.as_deref(), Some("guides/setup.md"));
    }

    #[test]
    fn test_page_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = PageArgs {
            common: project(temp_dir.path(), "", &[("intro.md", "Hi")]),
            slug: "missing-slug".to_owned(),
        };

        let err = args.run().unwrap_err();

        assert_eq!(err.to_string(), "Page not found: missing-slug");
    }
}
