//! Page publisher for Confluence.
//!
//! This module provides the [`PagePublisher`] struct that encapsulates
//! the publish pipeline for a rendered document:
//!
//! 1. Rename the renderer's header anchor and parse the XHTML
//! 2. Upload embedded images as attachments and relink their `src`
//! 3. Remove the redundant `<h1>` headings and extract the page title
//! 4. Wrap the body fragment in the stylesheet envelope
//! 5. Create the page, or update it if one with the same title exists
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use adopub_confluence::{ConfluenceClient, PagePublisher, PublishConfig};
//!
//! let client = ConfluenceClient::from_config("https://confluence.example.com", "token")?;
//! let config = PublishConfig {
//!     space_key: "DOCS".to_owned(),
//!     parent_page_id: "123".to_owned(),
//!     skip_unchanged: false,
//! };
//! let publisher = PagePublisher::new(&client, config);
//!
//! let xhtml = std::fs::read_to_string("report.xhtml")?;
//! let result = publisher.publish(&xhtml, Path::new("."), "body{color:red}")?;
//! println!("Published page {}", result.page.id);
//! # Ok(())
//! # }
//! ```

mod error;
mod executor;
mod result;

pub use error::PublishError;
pub use executor::PagePublisher;
pub use result::{PublishAction, PublishResult};

/// Configuration for publishing a rendered document.
pub struct PublishConfig {
    /// Target space key.
    pub space_key: String,
    /// Parent page: new pages are created under it, and image
    /// attachments are uploaded to it.
    pub parent_page_id: String,
    /// Skip the update when the stored page body is already identical.
    /// Off by default.
    pub skip_unchanged: bool,
}
