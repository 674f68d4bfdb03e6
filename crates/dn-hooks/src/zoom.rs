//! Image zoom attachment.
//!
//! Enables click-to-zoom for every image inside the configured layout region,
//! without requiring authors to mark images individually.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::page::CommittedPage;
use crate::scan::{PageScan, ScanError, ScanReport};

/// Supported selector form: `.<container-class> img`.
static SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\.([A-Za-z_][-A-Za-z0-9_]*)\s+img\s*$").unwrap());

/// Zoom configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoomOptions {
    container: String,
    background: String,
}

impl ZoomOptions {
    /// Parse a selector of the form `.<class> img` with an overlay background.
    pub fn parse(selector: &str, background: impl Into<String>) -> Result<Self, ScanError> {
        let container = SELECTOR_RE
            .captures(selector)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ScanError::Selector(selector.to_owned()))?
            .as_str()
            .to_owned();

        Ok(Self {
            container,
            background: background.into(),
        })
    }

    /// Container class whose images are zoomable.
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Overlay background (CSS value).
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }
}

/// Idempotent zoom scan.
///
/// Attachments are keyed by commit and image position. A new commit replaces
/// the previous content, so keys from older commits are discarded.
#[derive(Debug)]
pub struct ZoomScan {
    options: ZoomOptions,
    commit_id: Option<u64>,
    attached: HashSet<usize>,
}

impl ZoomScan {
    /// Create a zoom scan.
    #[must_use]
    pub fn new(options: ZoomOptions) -> Self {
        Self {
            options,
            commit_id: None,
            attached: HashSet::new(),
        }
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &ZoomOptions {
        &self.options
    }

    /// Number of images with zoom attached in the current commit.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Whether the image at `index` of commit `commit_id` has zoom attached.
    #[must_use]
    pub fn is_attached(&self, commit_id: u64, index: usize) -> bool {
        self.commit_id == Some(commit_id) && self.attached.contains(&index)
    }
}

impl PageScan for ZoomScan {
    fn scan(&mut self, page: &CommittedPage) -> Result<ScanReport, ScanError> {
        if self.commit_id != Some(page.commit_id) {
            self.commit_id = Some(page.commit_id);
            self.attached.clear();
        }

        let mut report = ScanReport::default();
        let mut malformed = None;

        for (index, image) in page.images.iter().enumerate() {
            if image.container != self.options.container {
                continue;
            }
            if image.src.trim().is_empty() {
                malformed.get_or_insert(index);
                continue;
            }
            if self.attached.insert(index) {
                report.attached += 1;
            } else {
                report.skipped += 1;
            }
        }

        match malformed {
            Some(index) => Err(ScanError::MalformedImage {
                path: page.path.clone(),
                index,
            }),
            None => Ok(report),
        }
    }
}
