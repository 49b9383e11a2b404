//! Error types for publish operations.

use adopub_render::XhtmlError;

use crate::error::ConfluenceError;

/// Error during the publish pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),

    /// Rendered document could not be parsed or rewritten.
    #[error("document rewrite error: {0}")]
    Xhtml(#[from] XhtmlError),

    /// IO error (reading image files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
