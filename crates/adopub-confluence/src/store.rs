//! Remote page store abstraction.

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{AttachResponse, Page};

/// The four remote operations the publish pipeline consumes.
///
/// [`ConfluenceClient`] is the production implementation; tests inject
/// an in-memory stub so the create-vs-update branch can be exercised
/// without a network.
pub trait RemoteStore {
    /// Look up a page by space key and exact title.
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError>;

    /// Create a page under a parent page, returning the new page.
    fn create_page(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<Page, ConfluenceError>;

    /// Update a page by id with a new title and body.
    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError>;

    /// Attach binary content to a page.
    fn attach_content(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<AttachResponse, ConfluenceError>;
}

impl RemoteStore for ConfluenceClient {
    fn find_page(&self, space_key: &str, title: &str) -> Result<Option<Page>, ConfluenceError> {
        Self::find_page(self, space_key, title)
    }

    fn create_page(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: &str,
    ) -> Result<Page, ConfluenceError> {
        Self::create_page(self, space_key, title, body, parent_id)
    }

    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        Self::update_page(self, page_id, title, body, version)
    }

    fn attach_content(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<AttachResponse, ConfluenceError> {
        Self::attach_content(self, page_id, filename, data, content_type)
    }
}
