//! Document rendering for adopub.
//!
//! Invokes the external `asciidoctor` converter to produce an XHTML
//! rendering of an AsciiDoc source file, and rewrites the rendered
//! markup for Confluence: header anchor renaming, redundant `<h1>`
//! removal, title extraction and image reference collection.

pub mod asciidoctor;
mod error;
pub mod xhtml;

pub use error::{ConvertError, XhtmlError};
pub use xhtml::{Document, ImageHandle, rename_header_anchor};
