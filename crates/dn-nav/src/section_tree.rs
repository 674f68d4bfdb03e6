//! Resolved section tree and sidebar lookup.
//!
//! A [`SectionTree`] maps route prefixes to sidebars and carries the site-wide
//! top navigation bar. It is immutable once built and holds no interior state,
//! so lookups are pure and can run concurrently from any number of threads.
//!
//! # Prefix selection
//!
//! Lookups scan the declared prefixes once (O(number of sections)). When more
//! than one prefix matches a path the [`PrefixPolicy`] decides:
//!
//! - [`PrefixPolicy::DeclarationOrder`] picks the first declared match.
//! - [`PrefixPolicy::LongestMatch`] picks the longest match, falling back to
//!   declaration order between equal lengths.
//!
//! A path that matches no prefix has no sidebar. That is a normal outcome for
//! pages such as the home page, not an error.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, PrefixWarning};
use crate::model::{ContentNode, NavEntry, NavGroup, TopNavItem};

/// Rule for choosing between several matching route prefixes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixPolicy {
    /// First declared matching prefix wins.
    #[default]
    DeclarationOrder,
    /// Longest matching prefix wins; ties go to the first declared.
    LongestMatch,
}

impl fmt::Display for PrefixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeclarationOrder => f.write_str("declaration-order"),
            Self::LongestMatch => f.write_str("longest-match"),
        }
    }
}

impl FromStr for PrefixPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "declaration-order" => Ok(Self::DeclarationOrder),
            "longest-match" => Ok(Self::LongestMatch),
            other => Err(format!(
                "unknown prefix policy \"{other}\" (expected declaration-order or longest-match)"
            )),
        }
    }
}

/// Sidebar registered under one route prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    prefix: String,
    entries: Vec<NavEntry>,
}

impl Section {
    pub(crate) fn new(prefix: String, entries: Vec<NavEntry>) -> Self {
        Self { prefix, entries }
    }

    /// Route prefix, always with a leading and a trailing slash.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Top-level sidebar entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Whether a normalized path falls under this prefix.
    ///
    /// `/software` matches `/software/` so section roots linked without the
    /// trailing slash still get their sidebar.
    pub(crate) fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
            || self
                .prefix
                .strip_suffix('/')
                .is_some_and(|bare| !bare.is_empty() && bare == path)
    }
}

/// Result of resolving a page path.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Resolution<'a> {
    /// Prefix of the selected section (None when the page has no sidebar).
    pub prefix: Option<&'a str>,
    /// Sidebar entries, empty when no prefix matched.
    pub sidebar: &'a [NavEntry],
    /// Top navigation bar, returned unconditionally.
    #[serde(rename = "topNav")]
    pub top_nav: &'a [TopNavItem],
}

impl Resolution<'_> {
    /// Whether the page is rendered without a sidebar.
    #[must_use]
    pub fn is_sidebarless(&self) -> bool {
        self.sidebar.is_empty()
    }
}

/// Fully resolved navigation for a site build.
#[derive(Debug)]
pub struct SectionTree {
    sections: Vec<Section>,
    top_nav: Vec<TopNavItem>,
    fragments: HashMap<String, Arc<NavGroup>>,
    pages: Vec<ContentNode>,
    page_index: HashMap<String, usize>,
    policy: PrefixPolicy,
    warnings: Vec<PrefixWarning>,
}

impl SectionTree {
    /// Create a tree from validated parts.
    ///
    /// Only [`NavTreeBuilder::build`](crate::NavTreeBuilder::build) calls this;
    /// `pages` must already be free of duplicate paths.
    pub(crate) fn new(
        sections: Vec<Section>,
        top_nav: Vec<TopNavItem>,
        fragments: HashMap<String, Arc<NavGroup>>,
        pages: Vec<ContentNode>,
        policy: PrefixPolicy,
        warnings: Vec<PrefixWarning>,
    ) -> Self {
        let page_index = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (normalize_path(page.path()), i))
            .collect();

        Self {
            sections,
            top_nav,
            fragments,
            pages,
            page_index,
            policy,
            warnings,
        }
    }

    /// Resolve the sidebar and top navigation for a page path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let section = self.section_for(path);
        Resolution {
            prefix: section.map(Section::prefix),
            sidebar: section.map(Section::entries).unwrap_or_default(),
            top_nav: &self.top_nav,
        }
    }

    /// Sidebar entries for a page path (empty when no prefix matches).
    #[must_use]
    pub fn sidebar(&self, path: &str) -> &[NavEntry] {
        self.resolve(path).sidebar
    }

    /// Section selected for a page path under the tree's [`PrefixPolicy`].
    #[must_use]
    pub fn section_for(&self, path: &str) -> Option<&Section> {
        let path = normalize_path(path);
        let mut candidates = self.sections.iter().filter(|s| s.matches(&path));

        match self.policy {
            PrefixPolicy::DeclarationOrder => candidates.next(),
            PrefixPolicy::LongestMatch => candidates.fold(None, |best: Option<&Section>, s| {
                match best {
                    Some(b) if b.prefix.len() >= s.prefix.len() => Some(b),
                    _ => Some(s),
                }
            }),
        }
    }

    /// Titles of the groups enclosing a page in its sidebar, outermost first.
    ///
    /// Renderers use this to expand collapsed groups on the active page.
    /// Returns an empty list when the page is not in its sidebar.
    #[must_use]
    pub fn active_trail(&self, path: &str) -> Vec<&str> {
        fn search<'a>(entries: &'a [NavEntry], target: &str, trail: &mut Vec<&'a str>) -> bool {
            for entry in entries {
                match entry {
                    NavEntry::Page(page) => {
                        if normalize_path(page.path()) == target {
                            return true;
                        }
                    }
                    NavEntry::Group(_) | NavEntry::Fragment(_) => {
                        let Some(group) = entry.as_group() else {
                            continue;
                        };
                        trail.push(group.title());
                        if search(group.children(), target, trail) {
                            return true;
                        }
                        trail.pop();
                    }
                }
            }
            false
        }

        let target = normalize_path(path);
        let mut trail = Vec::new();
        if search(self.sidebar(path), &target, &mut trail) {
            trail
        } else {
            Vec::new()
        }
    }

    /// Content node registered under a path.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<&ContentNode> {
        self.page_index
            .get(&normalize_path(path))
            .map(|&i| &self.pages[i])
    }

    /// Every distinct content node, shared fragments counted once.
    pub fn pages(&self) -> impl Iterator<Item = &ContentNode> {
        self.pages.iter()
    }

    /// Shared fragment by name.
    pub fn fragment(&self, name: &str) -> Result<&Arc<NavGroup>, NavError> {
        self.fragments
            .get(name)
            .ok_or_else(|| NavError::UnknownFragment(name.to_owned()))
    }

    /// Sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Site-wide top navigation bar.
    #[must_use]
    pub fn top_nav(&self) -> &[TopNavItem] {
        &self.top_nav
    }

    /// Prefix selection rule used by lookups.
    #[must_use]
    pub fn policy(&self) -> PrefixPolicy {
        self.policy
    }

    /// Prefix ambiguities found while building.
    #[must_use]
    pub fn warnings(&self) -> &[PrefixWarning] {
        &self.warnings
    }

    /// Number of shared fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

/// Normalize a page path for prefix matching and page lookup.
///
/// Drops any query or anchor, ensures a leading slash, strips `.md`/`.html`
/// and collapses a trailing `index` to the directory path.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['#', '?']).next().unwrap_or_default();
    let path = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path);
    let path = match path.strip_suffix("index") {
        Some(dir) if dir.is_empty() || dir.ends_with('/') => dir,
        _ => path,
    };

    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Normalize a declared route prefix to carry a leading and a trailing slash.
///
/// Prefixes match on whole path segments, so `/soft` becomes `/soft/` and
/// does not select `/software/x`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        "/".to_owned()
    } else {
        format!("/{prefix}/")
    }
}
