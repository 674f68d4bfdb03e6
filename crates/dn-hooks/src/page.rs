//! Committed page content as seen by page scans.

/// Image element in committed page content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageImage {
    /// Image source URL.
    pub src: String,
    /// Class of the layout region that contains the image (e.g. `main`).
    pub container: String,
}

impl PageImage {
    /// Create an image inside the given container class.
    pub fn new(src: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            container: container.into(),
        }
    }
}

/// Page content after the renderer has committed it.
///
/// `commit_id` identifies one committed render. Re-rendering the same route
/// produces a new id, because the previous elements no longer exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedPage {
    /// Identifier of this commit.
    pub commit_id: u64,
    /// Route path the content was rendered for.
    pub path: String,
    /// Images in document order.
    pub images: Vec<PageImage>,
}

impl CommittedPage {
    /// Create a committed page.
    pub fn new(commit_id: u64, path: impl Into<String>, images: Vec<PageImage>) -> Self {
        Self {
            commit_id,
            path: path.into(),
            images,
        }
    }
}
