//! Rewrite pass over the rendered document.
//!
//! Covers the Confluence-bound transformations: header anchor renaming,
//! image reference collection and relinking, redundant `<h1>` removal,
//! title extraction and body serialization.

use tracing::info;

use super::parser;
use super::serializer::serialize_fragment;
use super::tree::TreeNode;
use crate::error::XhtmlError;

/// Anchor id emitted by asciidoctor for the document header.
const HEADER_ANCHOR: &str = "header";

/// Replacement anchor id that does not collide with Confluence's own
/// `#header` element.
const RENAMED_ANCHOR: &str = "header-adoc";

/// Rename the renderer's header anchor on the raw document text.
///
/// Both the `id="header"` attribute and every `#header` occurrence
/// (fragment links and embedded CSS selectors) are renamed. This runs on
/// raw text before parsing because it targets attribute values and
/// stylesheet text, not tags.
#[must_use]
pub fn rename_header_anchor(xhtml: &str) -> String {
    xhtml
        .replace(
            &format!(r#"id="{HEADER_ANCHOR}""#),
            &format!(r#"id="{RENAMED_ANCHOR}""#),
        )
        .replace(
            &format!("#{HEADER_ANCHOR}"),
            &format!("#{RENAMED_ANCHOR}"),
        )
}

/// Handle addressing an `<img>` element by its position among all
/// `<img>` elements in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(usize);

/// A parsed rendered document, mutable in place.
#[derive(Debug)]
pub struct Document {
    root: TreeNode,
}

impl Document {
    /// Parse rendered XHTML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML.
    pub fn parse(xhtml: &str) -> Result<Self, XhtmlError> {
        Ok(Self {
            root: parser::parse(xhtml)?,
        })
    }

    /// Collect every image `src` in document order.
    ///
    /// Each entry pairs the `src` value with a handle that addresses the
    /// element for a later [`set_image_src`](Self::set_image_src) call.
    /// Images without a `src` attribute are not collected.
    #[must_use]
    pub fn image_refs(&self) -> Vec<(ImageHandle, String)> {
        let mut refs = Vec::new();
        let mut index = 0;
        visit_images(&self.root, &mut |node| {
            if let Some(src) = node.attr("src") {
                refs.push((ImageHandle(index), src.to_owned()));
            }
            index += 1;
        });
        refs
    }

    /// Rewrite an image's `src` attribute in place.
    pub fn set_image_src(&mut self, handle: ImageHandle, url: &str) {
        let mut index = 0;
        visit_images_mut(&mut self.root, &mut |node| {
            if index == handle.0 {
                node.set_attr("src", url);
            }
            index += 1;
        });
    }

    /// Remove every `<h1>` element from the document.
    ///
    /// The rendering duplicates the page title as a leading heading;
    /// Confluence displays the title itself. Tail text of a removed
    /// heading is preserved in the surrounding content.
    pub fn remove_headings(&mut self) {
        let removed = remove_tagged(&mut self.root, "h1");
        if removed > 0 {
            info!("Removed {} heading element(s)", removed);
        }
    }

    /// Extract the page title from the `<title>` element.
    ///
    /// The text is trimmed and title-cased.
    ///
    /// # Errors
    ///
    /// Returns [`XhtmlError::MissingTitle`] if the document has no
    /// `<title>` element.
    pub fn title(&self) -> Result<String, XhtmlError> {
        let node = find_first(&self.root, "title").ok_or(XhtmlError::MissingTitle)?;
        Ok(title_case(node.text_content().trim()))
    }

    /// Serialize the contents of the `<body>` element.
    ///
    /// # Errors
    ///
    /// Returns [`XhtmlError::MissingBody`] if the document has no
    /// `<body>` element.
    pub fn body_fragment(&self) -> Result<String, XhtmlError> {
        let body = find_first(&self.root, "body").ok_or(XhtmlError::MissingBody)?;
        Ok(serialize_fragment(body))
    }
}

/// Visit every `<img>` element in document order.
fn visit_images(node: &TreeNode, visit: &mut impl FnMut(&TreeNode)) {
    for child in &node.children {
        if child.tag == "img" {
            visit(child);
        }
        visit_images(child, visit);
    }
}

fn visit_images_mut(node: &mut TreeNode, visit: &mut impl FnMut(&mut TreeNode)) {
    for child in &mut node.children {
        if child.tag == "img" {
            visit(child);
        }
        visit_images_mut(child, visit);
    }
}

/// Find the first element with the given tag, depth-first.
fn find_first<'a>(node: &'a TreeNode, tag: &str) -> Option<&'a TreeNode> {
    for child in &node.children {
        if child.tag == tag {
            return Some(child);
        }
        if let Some(found) = find_first(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Remove every element with the given tag, preserving tail text.
///
/// Returns the number of removed elements.
fn remove_tagged(node: &mut TreeNode, tag: &str) -> usize {
    let mut removed = 0;
    let children = std::mem::take(&mut node.children);

    for mut child in children {
        if child.tag == tag {
            removed += 1;
            // Keep the removed element's tail in the document flow
            let tail = std::mem::take(&mut child.tail);
            append_tail(node, &tail);
        } else {
            removed += remove_tagged(&mut child, tag);
            node.children.push(child);
        }
    }

    removed
}

/// Append text after the last kept child, or to the node's own text.
fn append_tail(node: &mut TreeNode, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = node.children.last_mut() {
        last.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Title-case a string: a letter following a non-letter is uppercased,
/// every other letter is lowercased.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}
