//! Navigation tree builder.
//!
//! Assembles declarations into a [`SectionTree`] in a single pass:
//!
//! 1. Top navigation menus are checked for links.
//! 2. The [`FragmentRegistry`] is frozen into shared groups.
//! 3. Each section is assembled bottom-up, replacing fragment references with
//!    the registry's shared group.
//! 4. Page paths are checked for duplicates, counting each fragment once.
//! 5. Overlapping prefixes are recorded as warnings.
//!
//! Any failure aborts the build; no partial tree is returned.

use std::collections::{HashMap, HashSet};

use crate::assemble::Assembler;
use crate::decl::{EntryDecl, GroupDecl, NavDeclarations, SectionDecl};
use crate::error::{NavError, PrefixWarning};
use crate::fragments::FragmentRegistry;
use crate::model::{ContentNode, NavEntry, TopNavItem};
use crate::section_tree::{PrefixPolicy, Section, SectionTree, normalize_path, normalize_prefix};

/// Builder for [`SectionTree`] instances.
#[derive(Debug, Default)]
pub struct NavTreeBuilder {
    fragments: FragmentRegistry,
    sections: Vec<SectionDecl>,
    top_nav: Vec<TopNavItem>,
    policy: PrefixPolicy,
}

impl NavTreeBuilder {
    /// Create an empty builder using [`PrefixPolicy::DeclarationOrder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from parsed declarations.
    ///
    /// Fragments are registered in declaration order, so registration errors
    /// (duplicates, forward references) surface here.
    pub fn from_declarations(decls: NavDeclarations) -> Result<Self, NavError> {
        let mut builder = Self::new();
        for fragment in decls.fragments {
            let (name, group) = fragment.into_parts();
            builder.register_fragment(name, group)?;
        }
        builder.sections = decls.sections;
        builder.top_nav = decls.top_nav;
        Ok(builder)
    }

    /// Set the prefix selection rule for the built tree.
    #[must_use]
    pub fn with_policy(mut self, policy: PrefixPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a shared fragment.
    pub fn register_fragment(
        &mut self,
        name: impl Into<String>,
        group: GroupDecl,
    ) -> Result<(), NavError> {
        self.fragments.register(name, group)
    }

    /// Registered fragments.
    #[must_use]
    pub fn fragments(&self) -> &FragmentRegistry {
        &self.fragments
    }

    /// Registered fragments, editable until [`build`](Self::build).
    pub fn fragments_mut(&mut self) -> &mut FragmentRegistry {
        &mut self.fragments
    }

    /// Declare a section sidebar.
    pub fn section(&mut self, prefix: impl Into<String>, items: Vec<EntryDecl>) -> &mut Self {
        self.sections.push(SectionDecl {
            prefix: prefix.into(),
            items,
        });
        self
    }

    /// Append an item to the top navigation bar.
    pub fn top_nav(&mut self, item: TopNavItem) -> &mut Self {
        self.top_nav.push(item);
        self
    }

    /// Build the section tree.
    pub fn build(self) -> Result<SectionTree, NavError> {
        let Self {
            fragments,
            sections: section_decls,
            top_nav,
            policy,
        } = self;

        validate_top_nav(&top_nav)?;

        let fragments = fragments.freeze()?;
        let assembler = Assembler::new(&fragments);

        let mut sections = Vec::with_capacity(section_decls.len());
        for decl in section_decls {
            let prefix = normalize_prefix(&decl.prefix);
            let entries = assembler.entries(&decl.items, &prefix)?;
            if entries.is_empty() {
                return Err(NavError::EmptyGroup {
                    title: prefix,
                    scope: "section".to_owned(),
                });
            }
            sections.push(Section::new(prefix, entries));
        }

        let pages = collect_pages(&sections)?;
        let warnings = prefix_warnings(&sections);
        for warning in &warnings {
            tracing::warn!(%warning, %policy, "Ambiguous route prefix");
        }
        for page in &pages {
            let path = normalize_path(page.path());
            if !sections.iter().any(|s| s.matches(&path)) {
                tracing::warn!(path = %page.path(), "Page is outside every route prefix");
            }
        }

        tracing::debug!(
            sections = sections.len(),
            pages = pages.len(),
            fragments = fragments.len(),
            "Built section tree"
        );

        Ok(SectionTree::new(
            sections, top_nav, fragments, pages, policy, warnings,
        ))
    }
}

fn validate_top_nav(items: &[TopNavItem]) -> Result<(), NavError> {
    for item in items {
        if item.text().trim().is_empty() {
            return Err(NavError::EmptyTitle {
                scope: "top navigation".to_owned(),
            });
        }
        if let TopNavItem::Menu { text, items } = item
            && items.is_empty()
        {
            return Err(NavError::EmptyMenu(text.clone()));
        }
    }
    Ok(())
}

/// Collect every distinct content node in declaration order.
///
/// A fragment's pages are visited on its first inclusion only.
fn collect_pages(sections: &[Section]) -> Result<Vec<ContentNode>, NavError> {
    fn walk<'a>(
        entries: &'a [NavEntry],
        visited_fragments: &mut HashSet<&'a str>,
        seen: &mut HashMap<String, &'a ContentNode>,
        pages: &mut Vec<ContentNode>,
    ) -> Result<(), NavError> {
        for entry in entries {
            match entry {
                NavEntry::Page(page) => {
                    let path = normalize_path(page.path());
                    if let Some(first) = seen.get(&path) {
                        return Err(NavError::DuplicatePath {
                            path,
                            first: first.title().to_owned(),
                            second: page.title().to_owned(),
                        });
                    }
                    seen.insert(path, page);
                    pages.push(page.clone());
                }
                NavEntry::Group(group) => walk(group.children(), visited_fragments, seen, pages)?,
                NavEntry::Fragment(link) => {
                    if visited_fragments.insert(link.name()) {
                        walk(link.group().children(), visited_fragments, seen, pages)?;
                    }
                }
            }
        }
        Ok(())
    }

    let mut visited_fragments = HashSet::new();
    let mut seen = HashMap::new();
    let mut pages = Vec::new();
    for section in sections {
        walk(
            section.entries(),
            &mut visited_fragments,
            &mut seen,
            &mut pages,
        )?;
    }
    Ok(pages)
}

fn prefix_warnings(sections: &[Section]) -> Vec<PrefixWarning> {
    let mut warnings = Vec::new();
    for (i, earlier) in sections.iter().enumerate() {
        for later in &sections[i + 1..] {
            let (a, b) = (earlier.prefix(), later.prefix());
            if a == b {
                warnings.push(PrefixWarning::Duplicate(a.to_owned()));
            } else if b.starts_with(a) || a.starts_with(b) {
                warnings.push(PrefixWarning::Shadowed {
                    prefix: a.to_owned(),
                    overlaps: b.to_owned(),
                });
            }
        }
    }
    warnings
}
