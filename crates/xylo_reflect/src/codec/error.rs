use alloc::string::String;
use core::{error, fmt};
use std::io;

use xylo_tree::TreeError;

use crate::scalar::ScalarParseError;

/// An enumeration of all error outcomes that might happen while encoding
/// a reflected value into a document.
///
/// Variants that point into the value graph carry an `at` path such as
/// `Depot.wagons.entry[2].label` naming the value that failed.
#[derive(Debug)]
pub enum WriteError {
    /// Two structs of one ancestry chain declare the same field name.
    DuplicateField {
        at: String,
        name: &'static str,
        first: &'static str,
        second: &'static str,
    },
    /// A shared value was mutably borrowed while being encoded.
    HandleInUse { at: String, path: &'static str },
    /// The value kind cannot be encoded in this position.
    Unsupported { at: String, path: &'static str },
    /// The root value is absent and no document can represent it.
    UnsupportedRoot,
    /// Rendering the document failed.
    Tree(TreeError),
    /// Writing to the underlying stream failed.
    Io(io::Error),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField {
                at,
                name,
                first,
                second,
            } => write!(
                f,
                "field `{name}` is declared by both `{first}` and `{second}` at `{at}`"
            ),
            Self::HandleInUse { at, path } => {
                write!(f, "shared value of `{path}` is mutably borrowed at `{at}`")
            }
            Self::Unsupported { at, path } => {
                write!(f, "a value of `{path}` cannot be encoded at `{at}`")
            }
            Self::UnsupportedRoot => f.write_str("the root value is absent and cannot be encoded"),
            Self::Tree(err) => write!(f, "document error: {err}"),
            Self::Io(err) => write!(f, "io failure: {err}"),
        }
    }
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for WriteError {
    #[inline]
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<io::Error> for WriteError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

// -----------------------------------------------------------------------------
// ReadError

/// An enumeration of all error outcomes that might happen while decoding
/// a document back into a reflected value.
///
/// Variants that point into the document carry an `at` path such as
/// `Depot.wagons.entry[2].label` naming the node that failed.
#[derive(Debug)]
pub enum ReadError {
    /// Parsing the document failed.
    Tree(TreeError),
    /// Reading from the underlying stream failed.
    Io(io::Error),
    /// Element text could not be parsed as the expected primitive.
    Scalar { at: String, source: ScalarParseError },
    /// A node names a type path no registry knows.
    UnknownType { at: String, path: String },
    /// A node holds a different type than its position expects.
    TypeMismatch {
        at: String,
        expected: &'static str,
        received: &'static str,
    },
    /// A node refers back to an id no shared value was registered under.
    UnresolvedRef { at: String, id: u32 },
    /// A value is required but the document has none.
    AbsentValue { at: String, expected: &'static str },
    /// A struct node lacks the attribute naming its ancestry.
    MissingSuperclass { at: String, path: &'static str },
    /// A struct node names an ancestor the expected type does not have.
    UnknownAncestor {
        at: String,
        path: &'static str,
        superclass: String,
    },
    /// Two structs of one ancestry chain declare the same field name.
    DuplicateField {
        at: String,
        name: &'static str,
        first: &'static str,
        second: &'static str,
    },
    /// A sequence entry names a position outside the sequence.
    IndexOutOfRange { at: String, index: usize, len: usize },
    /// A node violates the document shape in some other way.
    Malformed { at: String, detail: String },
    /// A shared value was mutably borrowed while being decoded into.
    HandleInUse { at: String, path: &'static str },
    /// The value kind cannot be decoded in this position.
    Unsupported { at: String, path: &'static str },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "document error: {err}"),
            Self::Io(err) => write!(f, "io failure: {err}"),
            Self::Scalar { at, source } => write!(f, "{source} at `{at}`"),
            Self::UnknownType { at, path } => {
                write!(f, "no registered type has path `{path}` at `{at}`")
            }
            Self::TypeMismatch {
                at,
                expected,
                received,
            } => write!(
                f,
                "expected a value of `{expected}`, found `{received}` at `{at}`"
            ),
            Self::UnresolvedRef { at, id } => {
                write!(
                    f,
                    "no shared value is registered under reference id {id} at `{at}`"
                )
            }
            Self::AbsentValue { at, expected } => write!(
                f,
                "a value of `{expected}` is required but the document has none at `{at}`"
            ),
            Self::MissingSuperclass { at, path } => {
                write!(f, "missing the `superclass` attribute for `{path}` at `{at}`")
            }
            Self::UnknownAncestor {
                at,
                path,
                superclass,
            } => write!(f, "`{superclass}` is not an ancestor of `{path}` at `{at}`"),
            Self::DuplicateField {
                at,
                name,
                first,
                second,
            } => write!(
                f,
                "field `{name}` is declared by both `{first}` and `{second}` at `{at}`"
            ),
            Self::IndexOutOfRange { at, index, len } => write!(
                f,
                "index {index} is outside a sequence of length {len} at `{at}`"
            ),
            Self::Malformed { at, detail } => write!(f, "{detail} at `{at}`"),
            Self::HandleInUse { at, path } => {
                write!(f, "shared value of `{path}` is mutably borrowed at `{at}`")
            }
            Self::Unsupported { at, path } => {
                write!(f, "a value of `{path}` cannot be decoded at `{at}`")
            }
        }
    }
}

impl error::Error for ReadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Scalar { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TreeError> for ReadError {
    #[inline]
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<io::Error> for ReadError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
