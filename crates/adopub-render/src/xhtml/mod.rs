//! XHTML parsing and rewriting.
//!
//! The rendered document is parsed into an explicit [`TreeNode`] tree,
//! rewritten in place (image relinking, heading removal) and serialized
//! back to an XHTML body fragment.

mod parser;
mod rewrite;
mod serializer;
mod tree;

pub use rewrite::{Document, ImageHandle, rename_header_anchor, title_case};
pub use tree::TreeNode;
