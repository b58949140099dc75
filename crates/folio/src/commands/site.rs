//! `folio site` command implementation.

use clap::Args;
use folio_config::Config;
use folio_content::SiteConfig;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the site command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl SiteArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.common.load_config()?;
        if config.site.is_none() {
            output.warning("No [site] section found, using defaults");
        }
        output.json(&site_config(&config)?)
    }
}

/// The validated `[site]` table, or the default site when absent.
fn site_config(config: &Config) -> Result<SiteConfig, CliError> {
    let Some(table) = &config.site else {
        return Ok(SiteConfig::default());
    };
    let value = serde_json::to_value(table)?;
    SiteConfig::from_value(value)
        .ok_or_else(|| CliError::Validation("Invalid site configuration in [site]".to_owned()))
}
