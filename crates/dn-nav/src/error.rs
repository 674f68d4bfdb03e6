//! Build-time errors and warnings for navigation trees.

use std::path::PathBuf;

/// Error returned when navigation declarations cannot be assembled.
///
/// Every variant aborts the build pass: no partial [`SectionTree`](crate::SectionTree)
/// is produced from invalid input.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Fragment name registered twice in the same build.
    #[error("Fragment already registered: {0}")]
    DuplicateFragment(String),
    /// Reference to a fragment that is not (yet) registered.
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),
    /// Navigation group with zero children.
    #[error("Navigation group \"{title}\" in {scope} has no children")]
    EmptyGroup {
        /// Group title (or section prefix for an empty sidebar).
        title: String,
        /// Where the group was declared.
        scope: String,
    },
    /// Two distinct content nodes share a path.
    #[error("Duplicate page path {path}: \"{first}\" and \"{second}\"")]
    DuplicatePath {
        /// Normalized page path.
        path: String,
        /// Title of the first node declared with this path.
        first: String,
        /// Title of the conflicting node.
        second: String,
    },
    /// Entry declared with an empty title.
    #[error("Entry in {scope} has an empty title")]
    EmptyTitle {
        /// Where the entry was declared.
        scope: String,
    },
    /// Page declared with an empty path.
    #[error("Page \"{title}\" in {scope} has an empty path")]
    EmptyPath {
        /// Page title.
        title: String,
        /// Where the page was declared.
        scope: String,
    },
    /// Top navigation menu without links.
    #[error("Top navigation menu \"{0}\" has no links")]
    EmptyMenu(String),
    /// Declarations file not found.
    #[error("Declarations file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading declarations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Declarations are not valid TOML or do not match the expected shape.
    #[error("Declaration parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Non-fatal route prefix ambiguity detected at build time.
///
/// Ambiguous prefixes are resolved by the configured
/// [`PrefixPolicy`](crate::PrefixPolicy), so they never abort the build.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrefixWarning {
    /// One prefix is a strict prefix of another, so some paths match both.
    #[error("Route prefix {prefix} overlaps {overlaps}")]
    Shadowed {
        /// Prefix declared first.
        prefix: String,
        /// Overlapping prefix declared later.
        overlaps: String,
    },
    /// Identical prefix declared twice; the later section is unreachable.
    #[error("Route prefix {0} is declared more than once")]
    Duplicate(String),
}
