//! `folio pages` command implementation.

use clap::Args;
use folio_content::DocumentPage;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list pages in this category.
    #[arg(long)]
    pub category: Option<String>,
}

impl PagesArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        output.json(&self.run()?)
    }

    fn run(&self) -> Result<Vec<DocumentPage>, CliError> {
        let loader = self.common.loader()?;
        Ok(match &self.category {
            Some(category) => loader.pages_by_category(category),
            None => loader.all_pages(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::test_support::project;

    #[test]
    fn test_pages_filtered_by_category() {
        let temp_dir = tempfile::tempdir().unwrap();
        let common = project(
            temp_dir.path(),
            "",
            &[
                ("a.md", "---\ntitle: A\ncategory: guides\n---\n"),
                ("b.md", "---\ntitle: B\n---\n"),
            ],
        );

        let all = PagesArgs {
            common,
            category: None,
        };
        assert_eq!(all.run().unwrap().len(), 2);

        let guides = PagesArgs {
            category: Some("guides".to_owned()),
            ..all
        };
        let pages = guides.run().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "A");
    }
}
