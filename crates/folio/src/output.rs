//! Terminal output utilities.

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

/// Terminal output formatter.
///
/// JSON goes to stdout; diagnostics go to stderr.
pub(crate) struct Output {
    stdout: Term,
    stderr: Term,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print a value as pretty JSON.
    pub(crate) fn json<T: Serialize>(&self, value: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(value)?;
        self.stdout.write_line(&json)?;
        Ok(())
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self
            .stderr
            .write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.red.apply_to(msg).to_string());
    }
}
