//! Confluence page types.

use serde::Deserialize;

/// Confluence page.
///
/// Only includes fields that are actually used. Serde ignores unknown
/// fields from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Page body content (present when requested via `expand`).
    #[serde(default)]
    pub body: Option<Body>,
}

impl Page {
    /// Storage-format body content, if expanded.
    #[must_use]
    pub fn storage_body(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }
}

/// Page version.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
}

/// Response of a page query by space key and title.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQueryResponse {
    /// Matching pages (at most one for an exact-title lookup).
    pub results: Vec<Page>,
}
