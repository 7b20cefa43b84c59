//! The encoding engine.
//!
//! [`to_node`] walks a reflected value and builds the [`Node`] tree
//! described in the crate docs. Shared values are encoded once and
//! referred back to by id afterwards, which is what lets cyclic graphs
//! terminate.

use alloc::string::ToString;
use std::collections::HashMap;

use xylo_tree::Node;

use crate::Reflect;
use crate::codec::WriteError;
use crate::codec::chain::{ChainIssue, chain_of, duplicate_field};
use crate::codec::markup;
use crate::codec::trace::{Frame, Trace};
use crate::info::StructInfo;
use crate::ops::{Map, ReflectRef, Seq, Struct};

/// Builds the document for `value` and every value reachable from it.
pub(super) fn to_node(value: &dyn Reflect) -> Result<Node, WriteError> {
    // Optional and dynamic layers never form nodes of their own, so the
    // root tag comes from the first value that does.
    let mut root = value;
    loop {
        match root.reflect_ref() {
            ReflectRef::Opt(opt) => match opt.get() {
                Some(inner) => root = inner,
                None => return Err(WriteError::UnsupportedRoot),
            },
            ReflectRef::Dynamic(dynamic) => root = dynamic.get(),
            _ => break,
        }
    }

    let tag = markup::root_tag(root.reflect_type_ident());
    let mut encoder = Encoder::new(tag);
    match encoder.encode(root, tag)? {
        Some(node) => Ok(node),
        // Absent layers were unwrapped above.
        None => Err(WriteError::UnsupportedRoot),
    }
}

struct Encoder {
    /// Shared-value addresses already encoded, by their assigned id.
    ids: HashMap<usize, u32>,
    next_id: u32,
    trace: Trace,
}

impl Encoder {
    fn new(root_tag: &str) -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 0,
            trace: Trace::root(root_tag),
        }
    }

    fn claim_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Encodes one value as a node tagged `tag`.
    ///
    /// Absent values produce no node at all, hence the `Option`.
    fn encode(&mut self, value: &dyn Reflect, tag: &str) -> Result<Option<Node>, WriteError> {
        match value.reflect_ref() {
            ReflectRef::Opt(opt) => {
                return match opt.get() {
                    Some(inner) => self.encode(inner, tag),
                    None => Ok(None),
                };
            }
            ReflectRef::Dynamic(dynamic) => return self.encode(dynamic.get(), tag),
            _ => {}
        }

        let mut node = Node::new(tag);
        node.set_attr(markup::ATTR_CLASSPATH, value.reflect_type_path());

        match value.reflect_ref() {
            // Primitives carry no id, their text is the whole story.
            ReflectRef::Scalar(scalar) => {
                node.set_text(scalar.to_string());
                return Ok(Some(node));
            }
            ReflectRef::Handle(handle) => {
                if let Some(id) = self.ids.get(&handle.address()) {
                    node.set_attr(markup::ATTR_SEE_REF_ID, id.to_string());
                    return Ok(Some(node));
                }
                // The id must be claimed before descending, or a cycle
                // through this handle would never find it.
                let id = self.claim_id();
                self.ids.insert(handle.address(), id);
                node.set_attr(markup::ATTR_REF_ID, id.to_string());
                let inner = handle.borrow_inner().map_err(|_| WriteError::HandleInUse {
                    at: self.trace.render(),
                    path: value.reflect_type_path(),
                })?;
                self.encode_body(&*inner, &mut node)?;
                return Ok(Some(node));
            }
            _ => {}
        }

        let id = self.claim_id();
        node.set_attr(markup::ATTR_REF_ID, id.to_string());
        self.encode_body(value, &mut node)?;
        Ok(Some(node))
    }

    /// Fills `node` with the content of `value`, which already owns it.
    fn encode_body(&mut self, value: &dyn Reflect, node: &mut Node) -> Result<(), WriteError> {
        match value.reflect_ref() {
            ReflectRef::Scalar(scalar) => node.set_text(scalar.to_string()),
            ReflectRef::Text(text) => {
                if !text.is_empty() {
                    node.set_text(text);
                }
            }
            ReflectRef::Token(token) => node.set_text(token.path()),
            ReflectRef::Opt(opt) => {
                if let Some(inner) = opt.get() {
                    self.encode_body(inner, node)?;
                }
            }
            ReflectRef::Dynamic(dynamic) => {
                let inner = dynamic.get();
                // The node must name the runtime type, not the wrapper.
                node.set_attr(markup::ATTR_CLASSPATH, inner.reflect_type_path());
                self.encode_body(inner, node)?;
            }
            ReflectRef::Handle(_) => {
                return Err(WriteError::Unsupported {
                    at: self.trace.render(),
                    path: value.reflect_type_path(),
                });
            }
            ReflectRef::Seq(seq) => self.encode_seq(seq, node)?,
            ReflectRef::Map(map) => self.encode_map(map, node)?,
            ReflectRef::Struct(fields) => self.encode_struct(fields, node)?,
        }
        Ok(())
    }

    fn encode_seq(&mut self, seq: &dyn Seq, node: &mut Node) -> Result<(), WriteError> {
        for index in 0..seq.len() {
            let Some(item) = seq.item(index) else {
                continue;
            };
            self.trace.push(Frame::Entry(index));
            match self.encode(item, markup::TAG_ENTRY)? {
                Some(mut child) => {
                    child.set_attr(markup::ATTR_INDEX, index.to_string());
                    node.push_child(child);
                }
                // An absent element still claims its position; the
                // element count has to survive the trip.
                None => {
                    node.push_child(
                        Node::new(markup::TAG_ENTRY).with_attr(markup::ATTR_INDEX, index.to_string()),
                    );
                }
            }
            self.trace.pop();
        }
        Ok(())
    }

    fn encode_map(&mut self, map: &dyn Map, node: &mut Node) -> Result<(), WriteError> {
        for (index, (key, value)) in map.iter().enumerate() {
            self.trace.push(Frame::Entry(index));
            let mut entry = Node::new(markup::TAG_ENTRY);
            self.trace.push(Frame::Key);
            if let Some(child) = self.encode(key, markup::TAG_KEY)? {
                entry.push_child(child);
            }
            self.trace.pop();
            self.trace.push(Frame::Value);
            if let Some(child) = self.encode(value, markup::TAG_VALUE)? {
                entry.push_child(child);
            }
            self.trace.pop();
            node.push_child(entry);
            self.trace.pop();
        }
        Ok(())
    }

    fn encode_struct(&mut self, value: &dyn Struct, node: &mut Node) -> Result<(), WriteError> {
        let info = match value.reflect_type_info().as_struct() {
            Ok(info) => info,
            Err(_) => {
                return Err(WriteError::Unsupported {
                    at: self.trace.render(),
                    path: value.reflect_type_path(),
                });
            }
        };
        let levels = chain_of(info, None).map_err(|issue| self.chain_error(issue, info))?;
        if let Some((name, first, second)) = duplicate_field(&levels) {
            return Err(WriteError::DuplicateField {
                at: self.trace.render(),
                name,
                first,
                second,
            });
        }
        if let Some(deepest) = levels.last() {
            node.set_attr(markup::ATTR_SUPERCLASS, deepest.type_path());
        }
        self.encode_levels(value, &levels, node)
    }

    /// Encodes the fields declared by `levels[0]` on `value`, then
    /// descends into the base value for the remaining levels.
    fn encode_levels(
        &mut self,
        value: &dyn Struct,
        levels: &[&'static StructInfo],
        node: &mut Node,
    ) -> Result<(), WriteError> {
        let Some((level, rest)) = levels.split_first() else {
            return Ok(());
        };
        for field in level.iter() {
            if field.is_skipped() || field.is_base() {
                continue;
            }
            let name = field.name();
            let Some(slot) = value.field(name) else {
                continue;
            };
            self.trace.push(Frame::Field(name));
            if let Some(child) = self.encode(slot, &markup::swap_reserved(name))? {
                node.push_child(child);
            }
            self.trace.pop();
        }
        if rest.is_empty() {
            return Ok(());
        }
        let Some(base) = level.base() else {
            return Ok(());
        };
        let Some(base_value) = value.field(base.name()) else {
            return Ok(());
        };
        match base_value.reflect_ref() {
            ReflectRef::Struct(base_struct) => self.encode_levels(base_struct, rest, node),
            _ => Err(WriteError::Unsupported {
                at: self.trace.render(),
                path: base_value.reflect_type_path(),
            }),
        }
    }

    fn chain_error(&self, issue: ChainIssue, info: &'static StructInfo) -> WriteError {
        let path = match issue {
            ChainIssue::UnreflectableBase { owner } => owner,
            // Cannot occur without a stop path.
            ChainIssue::MissingAncestor => info.type_path(),
        };
        WriteError::Unsupported {
            at: self.trace.render(),
            path,
        }
    }
}
