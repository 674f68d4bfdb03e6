//! Resolved navigation model.
//!
//! These types are produced by [`NavTreeBuilder`](crate::NavTreeBuilder) and are
//! immutable afterwards. Groups can only be created by the builder, which
//! guarantees that every group in a built tree has at least one child.

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A single addressable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentNode {
    #[serde(rename = "text")]
    title: String,
    #[serde(rename = "link")]
    path: String,
}

impl ContentNode {
    pub(crate) fn new(title: String, path: String) -> Self {
        Self { title, path }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site-relative path as declared (may address an index page).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Titled, ordered, collapsible container of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    #[serde(rename = "text")]
    title: String,
    collapsed: bool,
    #[serde(rename = "items")]
    children: Vec<NavEntry>,
}

impl NavGroup {
    pub(crate) fn new(title: String, collapsed: bool, children: Vec<NavEntry>) -> Self {
        debug_assert!(!children.is_empty(), "groups are validated before construction");
        Self {
            title,
            collapsed,
            children,
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the group is rendered collapsed until opened.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Children in display order. Never empty.
    #[must_use]
    pub fn children(&self) -> &[NavEntry] {
        &self.children
    }
}

/// Shared fragment included by reference.
///
/// Every inclusion of the same fragment points at the registry's single
/// [`NavGroup`] allocation.
#[derive(Clone, Debug)]
pub struct FragmentLink {
    name: String,
    group: Arc<NavGroup>,
}

impl FragmentLink {
    pub(crate) fn new(name: String, group: Arc<NavGroup>) -> Self {
        Self { name, group }
    }

    /// Registered fragment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared group.
    #[must_use]
    pub fn group(&self) -> &Arc<NavGroup> {
        &self.group
    }
}

impl PartialEq for FragmentLink {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && (Arc::ptr_eq(&self.group, &other.group) || self.group == other.group)
    }
}

impl Eq for FragmentLink {}

impl Serialize for FragmentLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FragmentLink", 4)?;
        state.serialize_field("text", self.group.title())?;
        state.serialize_field("collapsed", &self.group.is_collapsed())?;
        state.serialize_field("items", self.group.children())?;
        state.serialize_field("fragment", &self.name)?;
        state.end()
    }
}

/// Entry in a sidebar or group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Direct page link.
    Page(ContentNode),
    /// Nested group owned by its parent.
    Group(NavGroup),
    /// Shared fragment owned by the registry.
    Fragment(FragmentLink),
}

impl NavEntry {
    /// Display title of the entry.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Page(node) => node.title(),
            Self::Group(group) => group.title(),
            Self::Fragment(link) => link.group().title(),
        }
    }

    /// Group view of the entry, following fragment links.
    #[must_use]
    pub fn as_group(&self) -> Option<&NavGroup> {
        match self {
            Self::Page(_) => None,
            Self::Group(group) => Some(group),
            Self::Fragment(link) => Some(link.group()),
        }
    }

    /// Page view of the entry.
    #[must_use]
    pub fn as_page(&self) -> Option<&ContentNode> {
        match self {
            Self::Page(node) => Some(node),
            Self::Group(_) | Self::Fragment(_) => None,
        }
    }
}

/// Single link in the top navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopNavLink {
    /// Link text.
    pub text: String,
    /// Link target.
    pub link: String,
}

/// Item of the site-wide top navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TopNavItem {
    /// Plain link.
    Link(TopNavLink),
    /// Labeled dropdown menu of links.
    Menu {
        /// Menu label.
        text: String,
        /// Menu links in display order.
        items: Vec<TopNavLink>,
    },
}

impl TopNavItem {
    /// Label shown in the bar.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Menu { text, .. } => text,
        }
    }
}
