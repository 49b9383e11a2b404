//! XHTML parser for rendered documents.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::tree::TreeNode;
use crate::error::XhtmlError;

/// Parse rendered XHTML into a [`TreeNode`] tree.
///
/// The document is wrapped in a synthetic root element so both full
/// documents and fragments parse into a single tree. DOCTYPE, XML
/// declarations and comments are ignored.
///
/// # Errors
///
/// Returns an error if the text cannot be parsed as well-formed XML.
pub fn parse(xhtml: &str) -> Result<TreeNode, XhtmlError> {
    let wrapped = format!("<root>{xhtml}</root>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut root = parse_children(&mut reader, "root")?;
    root.tag = "root".to_owned();
    Ok(root)
}

fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent_tag: &str,
) -> Result<TreeNode, XhtmlError> {
    let mut buf = Vec::new();
    let mut node = TreeNode::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child_tag = decode_tag(reader, &e);
                let child_attrs = decode_attrs(reader, &e);
                let mut child = parse_children(reader, &child_tag)?;
                child.tag = child_tag;
                child.attrs = child_attrs;
                node.children.push(child);
            }
            Event::Empty(e) => {
                // Self-closing element
                let child = TreeNode {
                    tag: decode_tag(reader, &e),
                    attrs: decode_attrs(reader, &e),
                    ..Default::default()
                };
                node.children.push(child);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &text);
            }
            Event::GeneralRef(e) => {
                // Entity references (e.g. &lt; &#8217; &nbsp;)
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut node, &text);
            }
            Event::End(e) => {
                let end_tag = decode_tag_bytes(reader, e.name().as_ref());
                if end_tag == parent_tag {
                    return Ok(node);
                }
                // Mismatched end tag - continue
            }
            Event::Eof => {
                return Ok(node);
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn decode_tag<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> String {
    decode_tag_bytes(reader, e.name().as_ref())
}

fn decode_tag_bytes<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );

        // Skip namespace declarations
        if key.starts_with("xmlns") {
            continue;
        }

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );

        attrs.push((key, value));
    }
    attrs
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut TreeNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Common named HTML entities emitted by asciidoctor
        "nbsp" => "\u{00a0}".to_owned(),
        "ndash" => "\u{2013}".to_owned(),
        "mdash" => "\u{2014}".to_owned(),
        "lsquo" => "\u{2018}".to_owned(),
        "rsquo" => "\u{2019}".to_owned(),
        "ldquo" => "\u{201c}".to_owned(),
        "rdquo" => "\u{201d}".to_owned(),
        "hellip" => "\u{2026}".to_owned(),
        "copy" => "\u{00a9}".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
