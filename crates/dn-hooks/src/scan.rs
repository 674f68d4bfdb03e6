//! Page scan contract.

use crate::page::CommittedPage;

/// Summary of one scan run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Elements that gained the behavior in this run.
    pub attached: usize,
    /// Matching elements that already had it.
    pub skipped: usize,
}

/// Error raised inside a scan.
///
/// [`PresentationHook`](crate::PresentationHook) logs these and keeps running
/// later scans.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Image element without a usable source.
    #[error("Malformed image #{index} on {path}")]
    MalformedImage {
        /// Route path of the page.
        path: String,
        /// Position of the image in the page.
        index: usize,
    },
    /// Selector that the scan cannot interpret.
    #[error("Unsupported selector: {0}")]
    Selector(String),
    /// Scan-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Side-effecting scan over committed page content.
///
/// Implementations must be idempotent: scanning the same commit twice must
/// leave the same state as scanning it once.
pub trait PageScan {
    /// Scan committed content and attach behavior.
    fn scan(&mut self, page: &CommittedPage) -> Result<ScanReport, ScanError>;
}

impl<F> PageScan for F
where
    F: FnMut(&CommittedPage) -> Result<ScanReport, ScanError>,
{
    fn scan(&mut self, page: &CommittedPage) -> Result<ScanReport, ScanError> {
        self(page)
    }
}
