//! Location tracking for engine errors.
//!
//! Both engines keep a [`Trace`] of where in the value graph they are.
//! When an operation fails the trace is rendered into the error, so a
//! failure deep inside a document names the path that reached it, e.g.
//! `Depot.wagons.entry[2].label`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// One step of the path from the document root to the current value.
#[derive(Debug, Clone)]
pub(super) enum Frame {
    /// The root node, named by its tag.
    Root(String),
    /// A named struct field.
    Field(&'static str),
    /// A map entry or sequence element at the given position.
    Entry(usize),
    /// The key side of a map entry.
    Key,
    /// The value side of a map entry.
    Value,
}

#[derive(Debug, Default)]
pub(super) struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    pub(super) fn root(tag: &str) -> Self {
        Self {
            frames: alloc::vec![Frame::Root(String::from(tag))],
        }
    }

    pub(super) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(super) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Renders the current path, dot separated.
    pub(super) fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            if !out.is_empty() {
                out.push('.');
            }
            match frame {
                Frame::Root(tag) => out.push_str(tag),
                Frame::Field(name) => out.push_str(name),
                // The write cannot fail on a String.
                Frame::Entry(index) => {
                    let _ = write!(out, "entry[{index}]");
                }
                Frame::Key => out.push_str("key"),
                Frame::Value => out.push_str("value"),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_dotted_path() {
        let mut trace = Trace::root("Depot");
        trace.push(Frame::Field("wagons"));
        trace.push(Frame::Entry(2));
        trace.push(Frame::Key);
        assert_eq!(trace.render(), "Depot.wagons.entry[2].key");

        trace.pop();
        trace.push(Frame::Value);
        assert_eq!(trace.render(), "Depot.wagons.entry[2].value");
    }
}
