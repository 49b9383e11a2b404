//! Result types for publish operations.

use crate::types::Page;

/// What the publish pipeline did to the remote page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// No page with the title existed; one was created.
    Created,
    /// An existing page was updated in place.
    Updated,
    /// The stored content was already identical; nothing was written.
    Unchanged,
}

/// Result of a publish operation.
#[derive(Debug)]
pub struct PublishResult {
    /// The created or updated remote page.
    pub page: Page,
    /// Whether the page was created, updated or left unchanged.
    pub action: PublishAction,
    /// Number of images uploaded and relinked.
    pub images_uploaded: usize,
    /// Original `src` values whose attach response carried no download
    /// link; these were uploaded but not relinked.
    pub images_skipped: Vec<String>,
}
