//! Confluence integration for adopub.
//!
//! This crate provides the remote half of the publish pipeline:
//! - [`ConfluenceClient`]: token-authenticated REST API client
//! - [`RemoteStore`]: trait seam over the four remote operations, so the
//!   pipeline can be exercised against an in-memory stub
//! - [`PagePublisher`](publisher::PagePublisher): create-or-update
//!   workflow with image attachment upload and relinking
//!
//! # API client
//!
//! ```ignore
//! use adopub_confluence::ConfluenceClient;
//!
//! let client = ConfluenceClient::from_config("https://confluence.example.com", "token")?;
//! let page = client.find_page("DOCS", "My Report")?;
//! ```

// API client
mod client;
pub use client::ConfluenceClient;

// Remote store seam
mod store;
pub use store::RemoteStore;

// Types (exposed via result structs and the store trait)
mod types;
pub use types::{AttachResponse, Page};

// Publish pipeline
pub mod publisher;
pub use publisher::{PagePublisher, PublishAction, PublishConfig, PublishError, PublishResult};

// Errors
mod error;
pub use error::ConfluenceError;
