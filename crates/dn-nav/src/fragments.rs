//! Shared fragment registry.
//!
//! Owns named groups that several sections include by reference. During the
//! build phase fragments stay editable through [`FragmentRegistry::resolve_mut`];
//! [`NavTreeBuilder::build`](crate::NavTreeBuilder::build) freezes the registry
//! into one [`Arc<NavGroup>`] per fragment and hands every inclusion site a clone
//! of that `Arc`, so edits made before the build are visible everywhere.
//!
//! A fragment may only reference fragments registered before it, which rules
//! out cycles without a separate check.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assemble::Assembler;
use crate::decl::GroupDecl;
use crate::error::NavError;
use crate::model::NavGroup;

/// Registry of shared fragments for a single build.
#[derive(Debug, Default)]
pub struct FragmentRegistry {
    order: Vec<String>,
    fragments: HashMap<String, GroupDecl>,
}

impl FragmentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fragment.
    ///
    /// Fails with [`NavError::DuplicateFragment`] if `name` is taken, or
    /// [`NavError::UnknownFragment`] if the group references a fragment that is
    /// not registered yet.
    pub fn register(&mut self, name: impl Into<String>, group: GroupDecl) -> Result<(), NavError> {
        let name = name.into();
        if self.fragments.contains_key(&name) {
            return Err(NavError::DuplicateFragment(name));
        }
        if let Some(missing) = group
            .fragment_refs()
            .into_iter()
            .find(|r| !self.fragments.contains_key(*r))
        {
            return Err(NavError::UnknownFragment(missing.to_owned()));
        }

        tracing::debug!(fragment = %name, "Registered fragment");
        self.order.push(name.clone());
        self.fragments.insert(name, group);
        Ok(())
    }

    /// Look up a registered fragment.
    pub fn resolve(&self, name: &str) -> Result<&GroupDecl, NavError> {
        self.fragments
            .get(name)
            .ok_or_else(|| NavError::UnknownFragment(name.to_owned()))
    }

    /// Look up a registered fragment for editing before the build.
    pub fn resolve_mut(&mut self, name: &str) -> Result<&mut GroupDecl, NavError> {
        self.fragments
            .get_mut(name)
            .ok_or_else(|| NavError::UnknownFragment(name.to_owned()))
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Fragment names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no fragment is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve every fragment, in registration order, into shared groups.
    ///
    /// Each fragment sees only the fragments frozen before it, so a reference
    /// introduced through `resolve_mut` that points forward still fails.
    pub(crate) fn freeze(self) -> Result<HashMap<String, Arc<NavGroup>>, NavError> {
        let Self {
            order,
            mut fragments,
        } = self;
        let mut frozen = HashMap::with_capacity(order.len());

        for name in order {
            let Some(decl) = fragments.remove(&name) else {
                continue;
            };
            let scope = format!("fragment {name}");
            let group = Assembler::new(&frozen).group(&decl, &scope)?;
            frozen.insert(name, Arc::new(group));
        }

        Ok(frozen)
    }
}
