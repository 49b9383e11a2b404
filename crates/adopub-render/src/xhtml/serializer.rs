//! XHTML serializer for rewritten trees.

use super::tree::TreeNode;

/// Serialize the contents of a node (text and children, without the
/// node's own tag or tail) back to XHTML.
#[must_use]
pub fn serialize_fragment(node: &TreeNode) -> String {
    let mut out = String::with_capacity(4096);

    if !node.text.is_empty() {
        out.push_str(&escape_text(&node.text));
    }
    for child in &node.children {
        serialize_node(child, &mut out);
    }

    out
}

/// Serialize a single node recursively.
fn serialize_node(node: &TreeNode, out: &mut String) {
    // Opening tag
    out.push('<');
    out.push_str(&node.tag);

    // Attributes
    for (key, value) in &node.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if node.children.is_empty() && node.text.is_empty() {
        // Self-closing tag
        out.push_str(" />");
    } else {
        out.push('>');

        // Text content
        if !node.text.is_empty() {
            out.push_str(&escape_text(&node.text));
        }

        // Children
        for child in &node.children {
            serialize_node(child, out);
        }

        // Closing tag
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    // Tail text
    if !node.tail.is_empty() {
        out.push_str(&escape_text(&node.tail));
    }
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

/// Escape XML special characters.
fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}
