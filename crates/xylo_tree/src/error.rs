use alloc::string::String;
use core::str::Utf8Error;
use core::{error, fmt};
use std::io;

use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;

/// An enumeration of all error outcomes that might happen while
/// rendering a [`Node`](crate::Node) tree or parsing one back.
#[derive(Debug)]
pub enum TreeError {
    /// The underlying parser rejected the document.
    Xml(quick_xml::Error),
    /// An attribute could not be parsed.
    Attr(AttrError),
    /// An entity or character reference could not be resolved.
    Escape(EscapeError),
    /// The document contained invalid UTF-8.
    Utf8(Utf8Error),
    /// Reading from or writing to the underlying stream failed.
    Io(io::Error),
    /// An element mixed non-whitespace text with child elements.
    MixedContent { tag: String },
    /// A closing tag appeared without a matching opening tag.
    UnexpectedEnd,
    /// An element was still open when the document ended.
    UnclosedElement { tag: String },
    /// The document contained more than one top-level element.
    MultipleRoots,
    /// The document contained no element at all.
    NoRoot,
    /// Non-whitespace text appeared outside the top-level element.
    StrayText,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(err) => write!(f, "malformed document: {err}"),
            Self::Attr(err) => write!(f, "malformed attribute: {err}"),
            Self::Escape(err) => write!(f, "unresolvable reference: {err}"),
            Self::Utf8(err) => write!(f, "invalid utf-8: {err}"),
            Self::Io(err) => write!(f, "io failure: {err}"),
            Self::MixedContent { tag } => {
                write!(f, "element `{tag}` mixes text with child elements")
            }
            Self::UnexpectedEnd => f.write_str("closing tag without a matching opening tag"),
            Self::UnclosedElement { tag } => write!(f, "element `{tag}` is never closed"),
            Self::MultipleRoots => f.write_str("document has more than one top-level element"),
            Self::NoRoot => f.write_str("document has no top-level element"),
            Self::StrayText => f.write_str("text outside the top-level element"),
        }
    }
}

impl error::Error for TreeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            Self::Attr(err) => Some(err),
            Self::Escape(err) => Some(err),
            Self::Utf8(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for TreeError {
    #[inline]
    fn from(value: quick_xml::Error) -> Self {
        Self::Xml(value)
    }
}

impl From<AttrError> for TreeError {
    #[inline]
    fn from(value: AttrError) -> Self {
        Self::Attr(value)
    }
}

impl From<EscapeError> for TreeError {
    #[inline]
    fn from(value: EscapeError) -> Self {
        Self::Escape(value)
    }
}

impl From<Utf8Error> for TreeError {
    #[inline]
    fn from(value: Utf8Error) -> Self {
        Self::Utf8(value)
    }
}

impl From<io::Error> for TreeError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
