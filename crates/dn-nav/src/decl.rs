//! Declarative navigation input.
//!
//! Declarations are plain data deserialized from TOML. They reference shared
//! fragments by name; [`NavTreeBuilder`](crate::NavTreeBuilder) turns them into
//! the resolved model.
//!
//! # Example
//!
//! ```toml
//! [[fragments]]
//! name = "other-departments"
//! title = "Other departments"
//! collapsed = true
//! items = [{ title = "Hardware", path = "/hardware/" }]
//!
//! [[sections]]
//! prefix = "/software/"
//! items = [
//!   { title = "Getting started", path = "/software/start" },
//!   { fragment = "other-departments" },
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::NavError;
use crate::model::TopNavItem;

/// Complete declarations for one build.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavDeclarations {
    /// Site-wide top navigation bar.
    pub top_nav: Vec<TopNavItem>,
    /// Shared fragments in registration order.
    pub fragments: Vec<FragmentDecl>,
    /// Sections in declaration order.
    pub sections: Vec<SectionDecl>,
}

impl NavDeclarations {
    /// Parse declarations from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, NavError> {
        Ok(toml::from_str(content)?)
    }

    /// Load declarations from a TOML file.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        if !path.exists() {
            return Err(NavError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Sidebar declaration for one route prefix.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionDecl {
    /// Route prefix, e.g. `/software/`.
    pub prefix: String,
    /// Top-level sidebar entries.
    pub items: Vec<EntryDecl>,
}

/// Named fragment declaration.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentDecl {
    /// Registry name.
    pub name: String,
    /// Group title.
    pub title: String,
    /// Collapsed by default.
    #[serde(default)]
    pub collapsed: bool,
    /// Group entries.
    pub items: Vec<EntryDecl>,
}

impl FragmentDecl {
    /// Split into registry name and group.
    #[must_use]
    pub fn into_parts(self) -> (String, GroupDecl) {
        (
            self.name,
            GroupDecl {
                title: self.title,
                collapsed: self.collapsed,
                items: self.items,
            },
        )
    }
}

/// Declared entry: page, group or fragment reference.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntryDecl {
    /// Reference to a registered fragment.
    Fragment(FragmentRef),
    /// Nested group.
    Group(GroupDecl),
    /// Page link.
    Page(PageDecl),
}

impl EntryDecl {
    /// Page entry.
    pub fn page(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Page(PageDecl {
            title: title.into(),
            path: path.into(),
        })
    }

    /// Group entry.
    pub fn group(title: impl Into<String>, collapsed: bool, items: Vec<EntryDecl>) -> Self {
        Self::Group(GroupDecl {
            title: title.into(),
            collapsed,
            items,
        })
    }

    /// Fragment reference.
    pub fn fragment(name: impl Into<String>) -> Self {
        Self::Fragment(FragmentRef {
            fragment: name.into(),
        })
    }
}

/// Reference to a shared fragment by name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentRef {
    /// Fragment name.
    pub fragment: String,
}

/// Declared group.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDecl {
    /// Group title.
    pub title: String,
    /// Collapsed by default.
    #[serde(default)]
    pub collapsed: bool,
    /// Group entries.
    pub items: Vec<EntryDecl>,
}

impl GroupDecl {
    /// Create a group declaration.
    pub fn new(title: impl Into<String>, collapsed: bool, items: Vec<EntryDecl>) -> Self {
        Self {
            title: title.into(),
            collapsed,
            items,
        }
    }

    /// Names of fragments referenced anywhere inside this group.
    pub(crate) fn fragment_refs(&self) -> Vec<&str> {
        fn collect<'a>(items: &'a [EntryDecl], out: &mut Vec<&'a str>) {
            for item in items {
                match item {
                    EntryDecl::Fragment(r) => out.push(&r.fragment),
                    EntryDecl::Group(group) => collect(&group.items, out),
                    EntryDecl::Page(_) => {}
                }
            }
        }

        let mut refs = Vec::new();
        collect(&self.items, &mut refs);
        refs
    }
}

/// Declared page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDecl {
    /// Page title.
    pub title: String,
    /// Site-relative path.
    pub path: String,
}
