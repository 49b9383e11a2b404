//! Wire types for the Confluence REST API.

mod attachment;
mod page;

pub use attachment::{AttachResponse, Attachment, AttachmentsResponse};
pub use page::{Body, Page, PageQueryResponse, Storage, Version};
