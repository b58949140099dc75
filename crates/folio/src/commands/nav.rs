//! `folio nav` command implementation.

use clap::Args;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl NavArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        output.json(&self.common.loader()?.navigation())
    }
}
