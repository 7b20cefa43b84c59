//! Streaming XML rendering and parsing for [`Node`] trees.
//!
//! Documents are written without an XML declaration and indented with two
//! spaces per nesting level. An element carrying only text renders inline
//! (`<x>3</x>`), an element with neither text nor children renders as an
//! empty element (`<x/>`).
//!
//! Parsing is the inverse: whitespace between child elements is dropped,
//! character data of childless elements is kept exactly as written, and
//! elements mixing non-whitespace text with children are rejected.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str;
use std::io;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{Node, TreeError};

/// Renders `node` as an XML document into `writer`.
pub fn to_writer<W: io::Write>(node: &Node, writer: W) -> Result<(), TreeError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    write_node(&mut writer, node)
}

/// Renders `node` as an XML document string.
///
/// # Example
///
/// ```
/// use xylo_tree::{Node, xml};
///
/// let node = Node::new("greeting").with_text("hello");
/// assert_eq!(xml::to_string(&node)?, "<greeting>hello</greeting>");
/// # Ok::<(), xylo_tree::TreeError>(())
/// ```
pub fn to_string(node: &Node) -> Result<String, TreeError> {
    let mut buf = Vec::new();
    to_writer(node, &mut buf)?;
    String::from_utf8(buf).map_err(|err| TreeError::Utf8(err.utf8_error()))
}

/// Parses an XML document from `reader` into a [`Node`] tree.
///
/// Comments, processing instructions and a leading XML declaration are
/// tolerated and skipped.
pub fn from_reader<R: io::BufRead>(reader: R) -> Result<Node, TreeError> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => stack.push(element(&start)?),
            Event::Empty(start) => {
                let node = element(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    return Err(TreeError::UnexpectedEnd);
                };
                attach(&mut stack, &mut root, seal(node)?)?;
            }
            Event::Text(text) => {
                let raw = str::from_utf8(text.as_ref())?;
                append_text(&mut stack, &unescape(raw)?)?;
            }
            Event::CData(data) => {
                let raw = str::from_utf8(data.as_ref())?.to_string();
                append_text(&mut stack, &raw)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(TreeError::UnclosedElement { tag: open.tag });
    }
    root.ok_or(TreeError::NoRoot)
}

/// Parses an XML document from a string slice.
pub fn from_str(source: &str) -> Result<Node, TreeError> {
    from_reader(source.as_bytes())
}

fn write_node<W: io::Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), TreeError> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (name, value) in &node.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let text = node.text.as_deref().unwrap_or_default();
    if text.is_empty() && node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn element(start: &BytesStart<'_>) -> Result<Node, TreeError> {
    let tag = str::from_utf8(start.name().as_ref())?.to_string();
    let mut node = Node::new(tag);
    for attr in start.attributes() {
        let attr = attr?;
        let name = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = unescape(str::from_utf8(&attr.value)?)?;
        node.attributes.insert(name, value.into_owned());
    }
    Ok(node)
}

fn attach(stack: &mut Vec<Node>, root: &mut Option<Node>, node: Node) -> Result<(), TreeError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(TreeError::MultipleRoots);
    } else {
        *root = Some(node);
    }
    Ok(())
}

fn append_text(stack: &mut [Node], text: &str) -> Result<(), TreeError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.get_or_insert_default().push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TreeError::StrayText),
    }
}

/// Resolves the text/children conflict when an element closes.
///
/// Indentation between child elements arrives as whitespace text and is
/// dropped. Any other text next to children is mixed content.
fn seal(mut node: Node) -> Result<Node, TreeError> {
    if !node.children.is_empty() {
        match &node.text {
            Some(text) if !text.trim().is_empty() => {
                return Err(TreeError::MixedContent { tag: node.tag });
            }
            _ => node.text = None,
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn sample() -> Node {
        Node::new("config")
            .with_attr("version", "1")
            .with_child(
                Node::new("servers")
                    .with_child(Node::new("server").with_text("alpha"))
                    .with_child(Node::new("server").with_text("beta")),
            )
            .with_child(Node::new("empty"))
    }

    #[test]
    fn renders_indented_without_declaration() {
        let rendered = to_string(&sample()).unwrap();
        assert_eq!(
            rendered,
            "<config version=\"1\">\n  <servers>\n    <server>alpha</server>\n    \
             <server>beta</server>\n  </servers>\n  <empty/>\n</config>"
        );
    }

    #[test]
    fn parses_back_what_it_renders() {
        let rendered = to_string(&sample()).unwrap();
        assert_eq!(from_str(&rendered).unwrap(), sample());
    }

    #[test]
    fn text_only_element_renders_inline() {
        let node = Node::new("x").with_text("3");
        assert_eq!(to_string(&node).unwrap(), "<x>3</x>");
    }

    #[test]
    fn empty_element_is_self_closing() {
        assert_eq!(to_string(&Node::new("x")).unwrap(), "<x/>");
        assert_eq!(from_str("<x/>").unwrap(), Node::new("x"));
        assert_eq!(from_str("<x></x>").unwrap(), Node::new("x"));
    }

    #[test]
    fn escapes_markup_in_text_and_attributes() {
        let node = Node::new("n")
            .with_attr("note", "a<b & \"c\"")
            .with_text("1 < 2 && 3 > 2");

        let rendered = to_string(&node).unwrap();
        assert!(rendered.contains("&lt;"));
        assert!(rendered.contains("&amp;"));
        assert_eq!(from_str(&rendered).unwrap(), node);
    }

    #[test]
    fn whitespace_text_survives_in_childless_elements() {
        let node = from_str("<pad>  </pad>").unwrap();
        assert_eq!(node.text.as_deref(), Some("  "));
    }

    #[test]
    fn interelement_whitespace_is_dropped() {
        let node = from_str("<a>\n  <b/>\n</a>").unwrap();
        assert_eq!(node.text, None);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn rejects_mixed_content() {
        let err = from_str("<a>text<b/></a>").unwrap_err();
        assert!(matches!(err, TreeError::MixedContent { tag } if tag == "a"));
    }

    #[test]
    fn tolerates_declaration_and_comments() {
        let node = from_str("<?xml version=\"1.0\"?><!-- note --><a/>").unwrap();
        assert_eq!(node.tag, "a");
    }

    #[test]
    fn rejects_degenerate_documents() {
        assert!(matches!(from_str(""), Err(TreeError::NoRoot)));
        assert!(matches!(from_str("<a/><b/>"), Err(TreeError::MultipleRoots)));
        assert!(matches!(from_str("junk<a/>"), Err(TreeError::StrayText)));
        assert!(from_str("<a>").is_err());
        assert!(from_str("</a>").is_err());
    }
}
