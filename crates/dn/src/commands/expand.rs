//! `dn expand` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// HTML file containing widget embeds.
    input: PathBuf,

    /// Write the expanded HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Fail when the file embeds an unregistered widget.
    #[arg(long)]
    strict: bool,
}

impl ExpandArgs {
    /// Execute the expand command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the input cannot be
    /// read, or `--strict` is set and an embed names an unknown widget.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config()?;
        let registry = config.widget_registry()?;

        let html = std::fs::read_to_string(&self.input)?;
        let expansion = registry.expand(&html);

        for warning in &expansion.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        if self.strict && !expansion.warnings.is_empty() {
            return Err(CliError::Validation(format!(
                "{} unknown widget embed(s) in {}",
                expansion.warnings.len(),
                self.input.display()
            )));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, &expansion.html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.data(&expansion.html),
        }

        Ok(())
    }
}
