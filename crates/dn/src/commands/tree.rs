//! `dn tree` command implementation.

use clap::Args;
use dn_nav::{NavEntry, TopNavItem};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only print the section whose prefix matches this path.
    #[arg(long)]
    path: Option<String>,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or navigation is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config()?;
        let tree = config.build_navigation()?;

        if self.path.is_none() && !tree.top_nav().is_empty() {
            output.heading("top nav");
            for line in top_nav_lines(tree.top_nav()) {
                output.data(&line);
            }
        }

        let sections: Vec<_> = match &self.path {
            Some(path) => tree.section_for(path).into_iter().collect(),
            None => tree.sections().iter().collect(),
        };
        if sections.is_empty() {
            output.muted("(no sidebar)");
        }
        for section in sections {
            output.heading(section.prefix());
            for line in entry_lines(section.entries()) {
                output.data(&line);
            }
        }

        Ok(())
    }
}

fn top_nav_lines(items: &[TopNavItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        match item {
            TopNavItem::Link(link) => lines.push(format!("  {}  {}", link.text, link.link)),
            TopNavItem::Menu { text, items } => {
                lines.push(format!("  {text}"));
                lines.extend(
                    items
                        .iter()
                        .map(|link| format!("    {}  {}", link.text, link.link)),
                );
            }
        }
    }
    lines
}

/// Indented outline of sidebar entries.
fn entry_lines(entries: &[NavEntry]) -> Vec<String> {
    fn walk(entries: &[NavEntry], depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth + 1);
        for entry in entries {
            match entry {
                NavEntry::Page(page) => {
                    lines.push(format!("{indent}{}  {}", page.title(), page.path()));
                }
                NavEntry::Group(_) | NavEntry::Fragment(_) => {
                    let Some(group) = entry.as_group() else {
                        continue;
                    };
                    let mut label = format!("{indent}{}/", group.title());
                    if group.is_collapsed() {
                        label.push_str(" [collapsed]");
                    }
                    if let NavEntry::Fragment(link) = entry {
                        label.push_str(&format!(" (fragment {})", link.name()));
                    }
                    lines.push(label);
                    walk(group.children(), depth + 1, lines);
                }
            }
        }
    }

    let mut lines = Vec::new();
    walk(entries, 0, &mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use dn_nav::{NavDeclarations, NavTreeBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_lines_marks_fragments_and_collapsed_groups() {
        let decls = NavDeclarations::from_toml_str(
            r#"
[[fragments]]
name = "departments"
title = "Departments"
collapsed = true
items = [{ title = "Hardware", path = "/hardware/" }]

[[sections]]
prefix = "/software/"
items = [
  { title = "Start", path = "/software/start" },
  { title = "Guides", items = [{ title = "Spring", path = "/software/spring" }] },
  { fragment = "departments" },
]
"#,
        )
        .unwrap();
        let tree = NavTreeBuilder::from_declarations(decls)
            .unwrap()
            .build()
            .unwrap();

        let lines = entry_lines(tree.sidebar("/software/start"));

        assert_eq!(
            lines,
            vec![
                "  Start  /software/start",
                "  Guides/",
                "    Spring  /software/spring",
                "  Departments/ [collapsed] (fragment departments)",
                "    Hardware  /hardware/",
            ]
        );
    }

    #[test]
    fn test_top_nav_lines_nests_menu_items() {
        let decls = NavDeclarations::from_toml_str(
            r#"
[[top_nav]]
text = "Home"
link = "/"

[[top_nav]]
text = "Departments"
items = [{ text = "Software", link = "/software/" }]
"#,
        )
        .unwrap();

        let lines = top_nav_lines(&decls.top_nav);

        assert_eq!(
            lines,
            vec!["  Home  /", "  Departments", "    Software  /software/"]
        );
    }
}
