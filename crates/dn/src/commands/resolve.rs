//! `dn resolve` command implementation.

use clap::Args;
use dn_nav::SectionTree;
use serde_json::Value;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Route path to resolve, e.g. `/software/spring/intro`.
    path: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or navigation is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config()?;
        let tree = config.build_navigation()?;

        let value = resolution_json(&tree, &self.path)?;
        let json = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        output.data(&json);

        Ok(())
    }
}

/// Resolution for `path` with the page title and active trail added.
fn resolution_json(tree: &SectionTree, path: &str) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(tree.resolve(path))?;
    if let Value::Object(map) = &mut value {
        map.insert("path".to_owned(), Value::from(path));
        map.insert(
            "title".to_owned(),
            tree.page(path)
                .map_or(Value::Null, |page| Value::from(page.title())),
        );
        map.insert(
            "activeTrail".to_owned(),
            Value::from(tree.active_trail(path)),
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dn_nav::{NavDeclarations, NavTreeBuilder};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tree() -> SectionTree {
        let decls = NavDeclarations::from_toml_str(
            r#"
[[top_nav]]
text = "Software"
link = "/software/"

[[sections]]
prefix = "/software/"
items = [
  { title = "Spring", collapsed = true, items = [
    { title = "Intro", path = "/software/spring/intro" },
  ] },
]
"#,
        )
        .unwrap();
        NavTreeBuilder::from_declarations(decls)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolution_json_for_page_in_section() {
        let value = resolution_json(&tree(), "/software/spring/intro.html").unwrap();

        assert_eq!(value["prefix"], json!("/software/"));
        assert_eq!(value["title"], json!("Intro"));
        assert_eq!(value["activeTrail"], json!(["Spring"]));
        assert_eq!(value["sidebar"][0]["text"], json!("Spring"));
        assert_eq!(value["topNav"][0]["link"], json!("/software/"));
    }

    #[test]
    fn test_resolution_json_outside_sections() {
        let value = resolution_json(&tree(), "/").unwrap();

        assert_eq!(value["prefix"], Value::Null);
        assert_eq!(value["title"], Value::Null);
        assert_eq!(value["sidebar"], json!([]));
        assert_eq!(value["activeTrail"], json!([]));
    }
}
