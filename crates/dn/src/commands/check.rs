//! `dn check` command implementation.

use clap::Args;
use dn_nav::SectionTree;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Treat prefix overlap warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or navigation is invalid, or if
    /// `--strict` is set and the navigation has warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config()?;
        let resolved = &config.navigation_resolved;
        output.info(&format!(
            "Declarations: {}",
            resolved.declarations.display()
        ));
        output.info(&format!("Prefix policy: {}", resolved.prefix_policy));

        let tree = config.build_navigation()?;
        let widgets = config.widget_registry()?;
        let zoom = config.zoom_options()?;

        for warning in tree.warnings() {
            output.warning(&format!("Warning: {warning}"));
        }

        output.success(&summary(&tree));
        output.info(&format!(
            "Zoom: images in .{} (background {})",
            zoom.container(),
            zoom.background()
        ));
        if widgets.is_empty() {
            output.info("Widgets: none");
        } else {
            output.info(&format!(
                "Widgets: {}",
                widgets.names().collect::<Vec<_>>().join(", ")
            ));
        }

        if self.strict && !tree.warnings().is_empty() {
            return Err(CliError::Validation(format!(
                "{} navigation warning(s) with --strict",
                tree.warnings().len()
            )));
        }

        Ok(())
    }
}

fn summary(tree: &SectionTree) -> String {
    format!(
        "Navigation OK: {} section(s), {} page(s), {} fragment(s), {} top nav item(s)",
        tree.sections().len(),
        tree.pages().count(),
        tree.fragment_count(),
        tree.top_nav().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dn_nav::{EntryDecl, GroupDecl, NavTreeBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_counts_shared_pages_once() {
        let mut builder = NavTreeBuilder::new();
        builder
            .register_fragment(
                "shared",
                GroupDecl::new("Shared", false, vec![EntryDecl::page("Home", "/")]),
            )
            .unwrap();
        builder
            .section("/a/", vec![EntryDecl::fragment("shared")])
            .section("/b/", vec![EntryDecl::fragment("shared")]);
        let tree = builder.build().unwrap();

        assert_eq!(
            summary(&tree),
            "Navigation OK: 2 section(s), 1 page(s), 1 fragment(s), 0 top nav item(s)"
        );
    }
}
