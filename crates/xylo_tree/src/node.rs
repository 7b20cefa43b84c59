use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A single element of a document tree.
///
/// A node carries a tag name, a sorted attribute map, optional character
/// data and an ordered list of child nodes. Attributes are kept in a
/// [`BTreeMap`] so a tree always renders with a deterministic attribute
/// order.
///
/// Text and children are exclusive when rendering round-trips are
/// expected: the parser rejects elements that mix non-whitespace text
/// with child elements.
///
/// # Example
///
/// ```
/// use xylo_tree::Node;
///
/// let node = Node::new("entry")
///     .with_attr("index", "0")
///     .with_child(Node::new("key").with_text("name"));
///
/// assert_eq!(node.attr("index"), Some("0"));
/// assert_eq!(node.child("key").and_then(|key| key.text.as_deref()), Some("name"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an empty node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Returns the value of the attribute `name`, if present.
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Inserts or replaces the attribute `name`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Replaces the character data of this node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Appends `child` to the end of the child list.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Returns the first child whose tag equals `tag`.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Iterates over every child whose tag equals `tag`.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`set_text`](Self::set_text).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`push_child`](Self::push_child).
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_are_sorted() {
        let node = Node::new("n")
            .with_attr("refId", "3")
            .with_attr("classpath", "i32")
            .with_attr("index", "0");

        let keys: Vec<&str> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["classpath", "index", "refId"]);
    }

    #[test]
    fn child_returns_first_match() {
        let node = Node::new("map")
            .with_child(Node::new("entry").with_attr("index", "0"))
            .with_child(Node::new("entry").with_attr("index", "1"));

        assert_eq!(node.child("entry").and_then(|entry| entry.attr("index")), Some("0"));
        assert_eq!(node.children_tagged("entry").count(), 2);
        assert!(node.child("missing").is_none());
    }
}
