//! Recursive descent from declarations to the resolved model.
//!
//! Children are assembled before their parent, so a group is only constructed
//! once every descendant has passed validation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::decl::{EntryDecl, GroupDecl, PageDecl};
use crate::error::NavError;
use crate::model::{ContentNode, FragmentLink, NavEntry, NavGroup};

/// Assembles declarations against a set of frozen fragments.
pub(crate) struct Assembler<'a> {
    fragments: &'a HashMap<String, Arc<NavGroup>>,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(fragments: &'a HashMap<String, Arc<NavGroup>>) -> Self {
        Self { fragments }
    }

    /// Assemble a list of entries declared in `scope`.
    pub(crate) fn entries(
        &self,
        items: &[EntryDecl],
        scope: &str,
    ) -> Result<Vec<NavEntry>, NavError> {
        items.iter().map(|item| self.entry(item, scope)).collect()
    }

    /// Assemble a group, rejecting empty titles and empty children.
    pub(crate) fn group(&self, decl: &GroupDecl, scope: &str) -> Result<NavGroup, NavError> {
        if decl.title.trim().is_empty() {
            return Err(NavError::EmptyTitle {
                scope: scope.to_owned(),
            });
        }

        let inner_scope = format!("{scope} > {}", decl.title);
        let children = self.entries(&decl.items, &inner_scope)?;
        if children.is_empty() {
            return Err(NavError::EmptyGroup {
                title: decl.title.clone(),
                scope: scope.to_owned(),
            });
        }

        Ok(NavGroup::new(decl.title.clone(), decl.collapsed, children))
    }

    fn entry(&self, item: &EntryDecl, scope: &str) -> Result<NavEntry, NavError> {
        match item {
            EntryDecl::Page(page) => Self::page(page, scope).map(NavEntry::Page),
            EntryDecl::Group(group) => self.group(group, scope).map(NavEntry::Group),
            EntryDecl::Fragment(r) => {
                let group = self
                    .fragments
                    .get(&r.fragment)
                    .ok_or_else(|| NavError::UnknownFragment(r.fragment.clone()))?;
                Ok(NavEntry::Fragment(FragmentLink::new(
                    r.fragment.clone(),
                    Arc::clone(group),
                )))
            }
        }
    }

    fn page(decl: &PageDecl, scope: &str) -> Result<ContentNode, NavError> {
        if decl.title.trim().is_empty() {
            return Err(NavError::EmptyTitle {
                scope: scope.to_owned(),
            });
        }
        if decl.path.trim().is_empty() {
            return Err(NavError::EmptyPath {
                title: decl.title.clone(),
                scope: scope.to_owned(),
            });
        }
        Ok(ContentNode::new(decl.title.clone(), decl.path.clone()))
    }
}
