//! Hierarchical navigation for docnav sites.
//!
//! This crate provides:
//! - [`NavDeclarations`]: declarative TOML input (sections, fragments, top nav)
//! - [`FragmentRegistry`]: named groups shared by reference across sections
//! - [`NavTreeBuilder`]: single-pass assembly and validation
//! - [`SectionTree`]: immutable prefix-scoped sidebars with pure lookups
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use dn_nav::{NavDeclarations, NavTreeBuilder, PrefixPolicy};
//!
//! let decls = NavDeclarations::load(Path::new("navigation.toml"))?;
//! let tree = NavTreeBuilder::from_declarations(decls)?
//!     .with_policy(PrefixPolicy::DeclarationOrder)
//!     .build()?;
//!
//! let resolution = tree.resolve("/software/start");
//! for entry in resolution.sidebar {
//!     println!("{}", entry.title());
//! }
//! # Ok(())
//! # }
//! ```

mod assemble;
mod builder;
mod decl;
mod error;
mod fragments;
mod model;
mod section_tree;

pub use builder::NavTreeBuilder;
pub use decl::{
    EntryDecl, FragmentDecl, FragmentRef, GroupDecl, NavDeclarations, PageDecl, SectionDecl,
};
pub use error::{NavError, PrefixWarning};
pub use fragments::FragmentRegistry;
pub use model::{ContentNode, FragmentLink, NavEntry, NavGroup, TopNavItem, TopNavLink};
pub use section_tree::{PrefixPolicy, Resolution, Section, SectionTree, normalize_path};
