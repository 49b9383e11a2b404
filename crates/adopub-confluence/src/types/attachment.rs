//! Confluence attachment types.

use serde::Deserialize;
use serde_json::Value;

/// Confluence attachment.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
}

/// Attachments API response.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
}

/// Shape of an attach-content response.
///
/// The API is not uniform: creating a new attachment returns a bulk-style
/// object with a `results` array, while updating an existing one returns
/// a single attachment object. Either shape may lack a download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachResponse {
    /// Bulk-style response; download link of the first result.
    Bulk(String),
    /// Single-object response with a download link.
    Single(String),
    /// Neither shape carried a download link.
    NoLink,
}

impl AttachResponse {
    /// Classify a raw response body.
    ///
    /// A `results` array takes precedence over the single-object shape.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if let Some(results) = value.get("results") {
            return results
                .get(0)
                .and_then(|first| first.pointer("/_links/download"))
                .and_then(Value::as_str)
                .map_or(Self::NoLink, |link| Self::Bulk(link.to_owned()));
        }

        value
            .pointer("/_links/download")
            .and_then(Value::as_str)
            .map_or(Self::NoLink, |link| Self::Single(link.to_owned()))
    }

    /// Download link, if the response carried one.
    #[must_use]
    pub fn download_link(&self) -> Option<&str> {
        match self {
            Self::Bulk(link) | Self::Single(link) => Some(link),
            Self::NoLink => None,
        }
    }
}
