//! The decoding engine.
//!
//! A [`Decoder`] turns a [`Node`] tree back into reflected values. It is
//! driven by expected type information: every position in the value
//! being rebuilt names a [`TypeInfo`], and the node found there is
//! interpreted against it. Shared values register themselves by id on
//! first sight, so later back-references alias the same allocation.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::TypeId;
use std::collections::HashMap;

use xylo_tree::Node;

use crate::Reflect;
use crate::codec::ReadError;
use crate::codec::chain::{ChainIssue, chain_of, duplicate_field};
use crate::codec::markup;
use crate::codec::trace::{Frame, Trace};
use crate::impls::{DynamicValue, TypeToken};
use crate::info::{MapInfo, NamedField, StructInfo, TypeInfo};
use crate::ops::{ErasedHandle, Map, ReflectMut, Seq, Struct};
use crate::registry::{Factory, GetTypeMeta, TypeMeta, TypeRegistry};
use crate::scalar::{ScalarKind, ScalarValue};

pub(super) struct Decoder<'a> {
    /// Caller-supplied registry, consulted first.
    primary: Option<&'a TypeRegistry>,
    /// The expected root type and everything it pulls in.
    local: TypeRegistry,
    /// Shared values decoded so far, by their document id.
    refs: HashMap<u32, ErasedHandle>,
    trace: Trace,
}

impl<'a> Decoder<'a> {
    pub(super) fn new<T: GetTypeMeta>(primary: Option<&'a TypeRegistry>, root_tag: &str) -> Self {
        let mut local = TypeRegistry::empty();
        local.register::<T>();
        Self {
            primary,
            local,
            refs: HashMap::new(),
            trace: Trace::root(root_tag),
        }
    }

    // ------------------------------------------------------------------
    // Registry access

    /// Looks a path up in the caller's registry, then the local one,
    /// then the global one.
    fn resolve(&self, path: &str) -> Option<TypeMeta> {
        if let Some(primary) = self.primary {
            if let Some(meta) = primary.get_with_type_path(path) {
                return Some(meta.clone());
            }
        }
        if let Some(meta) = self.local.get_with_type_path(path) {
            return Some(meta.clone());
        }
        crate::registry::global().get_with_type_path(path).cloned()
    }

    /// Same lookup order as [`Decoder::resolve`], by id.
    fn meta_by_id(&self, id: TypeId) -> Option<TypeMeta> {
        if let Some(primary) = self.primary {
            if let Some(meta) = primary.get(id) {
                return Some(meta.clone());
            }
        }
        if let Some(meta) = self.local.get(id) {
            return Some(meta.clone());
        }
        crate::registry::global().get(id).cloned()
    }

    fn factory_by_id(&self, id: TypeId) -> Option<Factory> {
        self.meta_by_id(id).and_then(|meta| meta.factory().cloned())
    }

    /// Builds the value decoding starts from for `info`.
    fn blank_of(&self, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, ReadError> {
        match self.meta_by_id(info.ty_id()).and_then(|meta| meta.blank()) {
            Some(blank) => Ok(blank),
            None => Err(self.unsupported(info.type_path())),
        }
    }

    // ------------------------------------------------------------------
    // Errors

    fn unsupported(&self, path: &'static str) -> ReadError {
        ReadError::Unsupported {
            at: self.trace.render(),
            path,
        }
    }

    fn mismatch(&self, expected: &'static str, received: &'static str) -> ReadError {
        ReadError::TypeMismatch {
            at: self.trace.render(),
            expected,
            received,
        }
    }

    fn malformed(&self, detail: String) -> ReadError {
        ReadError::Malformed {
            at: self.trace.render(),
            detail,
        }
    }

    // ------------------------------------------------------------------
    // Node classification

    /// Whether `node` stands for no value at all when a value of
    /// `expected` is wanted there.
    ///
    /// Scalar nodes may omit their classpath, so for them absence means
    /// a node with no content whatsoever. Everything else is present
    /// exactly when it names a type or refers back to one.
    fn denotes_absent(&self, node: &Node, expected: &'static TypeInfo) -> bool {
        if node.attr(markup::ATTR_SEE_REF_ID).is_some() {
            return false;
        }
        match expected {
            TypeInfo::Scalar(_) => {
                node.attr(markup::ATTR_CLASSPATH).is_none()
                    && node.text.is_none()
                    && node.children.is_empty()
            }
            _ => node.attr(markup::ATTR_CLASSPATH).is_none(),
        }
    }

    /// Whether the body of a node decoded in place holds no value.
    fn body_absent(node: &Node) -> bool {
        node.text.as_deref().is_none_or(|text| text.trim().is_empty())
            && node.children.is_empty()
            && node.attr(markup::ATTR_SUPERCLASS).is_none()
    }

    // ------------------------------------------------------------------
    // Decoding

    /// Decodes the value for one position of the graph.
    ///
    /// `node` is the element found there, if any. Optional positions
    /// absorb a missing or empty node as their absent value; everything
    /// else requires one.
    pub(super) fn decode_slot(
        &mut self,
        node: Option<&Node>,
        expected: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        if let TypeInfo::Opt(opt_info) = expected {
            let inner = opt_info.inner_info();
            let mut blank = self.blank_of(expected)?;
            if let Some(node) = node {
                if !self.denotes_absent(node, inner) {
                    let value = self.decode_present(node, inner)?;
                    let ReflectMut::Opt(opt) = blank.reflect_mut() else {
                        return Err(self.unsupported(expected.type_path()));
                    };
                    if let Err(value) = opt.set_some(value) {
                        return Err(self.mismatch(inner.type_path(), value.reflect_type_path()));
                    }
                }
            }
            return Ok(blank);
        }
        match node {
            Some(node) if !self.denotes_absent(node, expected) => {
                self.decode_present(node, expected)
            }
            _ => Err(ReadError::AbsentValue {
                at: self.trace.render(),
                expected: expected.type_path(),
            }),
        }
    }

    /// Decodes a node that was judged present for `expected`.
    fn decode_present(
        &mut self,
        node: &Node,
        expected: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        if matches!(expected, TypeInfo::Opt(_)) {
            // Nested options shed one layer per round.
            return self.decode_slot(Some(node), expected);
        }

        if let Some(raw) = node.attr(markup::ATTR_SEE_REF_ID) {
            return self.decode_reference(raw, expected);
        }

        if let TypeInfo::Scalar(scalar_info) = expected {
            if let Some(classpath) = node.attr(markup::ATTR_CLASSPATH) {
                if classpath != expected.type_path() {
                    let received = match self.resolve(classpath) {
                        Some(meta) => meta.type_path(),
                        None => {
                            return Err(ReadError::UnknownType {
                                at: self.trace.render(),
                                path: classpath.to_string(),
                            });
                        }
                    };
                    return Err(self.mismatch(expected.type_path(), received));
                }
            }
            let value = self.parse_scalar(node, scalar_info.scalar_kind())?;
            return Ok(value.into_reflect());
        }

        let Some(classpath) = node.attr(markup::ATTR_CLASSPATH) else {
            return Err(ReadError::AbsentValue {
                at: self.trace.render(),
                expected: expected.type_path(),
            });
        };
        let Some(meta) = self.resolve(classpath) else {
            return Err(ReadError::UnknownType {
                at: self.trace.render(),
                path: classpath.to_string(),
            });
        };

        if matches!(expected, TypeInfo::Dynamic(_)) {
            // The node names the runtime type, the wrapper is implied.
            let inner = self.decode_resolved(node, meta.type_info())?;
            return Ok(Box::new(DynamicValue::from_boxed(inner)));
        }

        if meta.ty_id() != expected.ty_id() {
            return Err(self.mismatch(expected.type_path(), meta.type_path()));
        }
        self.decode_resolved(node, expected)
    }

    /// Follows a back-reference to an already decoded shared value.
    fn decode_reference(
        &mut self,
        raw: &str,
        expected: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        let id: u32 = raw
            .trim()
            .parse()
            .map_err(|_| self.malformed(format!("reference id `{raw}` is not numeric")))?;
        let Some(erased) = self.refs.get(&id).cloned() else {
            return Err(ReadError::UnresolvedRef {
                at: self.trace.render(),
                id,
            });
        };
        match expected {
            TypeInfo::Handle(_) => {
                let Some(alias) = erased.to_reflect() else {
                    return Err(self.mismatch(expected.type_path(), erased.inner_path()));
                };
                if alias.ty_id() != expected.ty_id() {
                    return Err(self.mismatch(expected.type_path(), alias.reflect_type_path()));
                }
                Ok(alias)
            }
            TypeInfo::Dynamic(_) => {
                let Some(alias) = erased.to_reflect() else {
                    return Err(self.mismatch(expected.type_path(), erased.inner_path()));
                };
                Ok(Box::new(DynamicValue::from_boxed(alias)))
            }
            _ => Err(self.malformed(format!(
                "a back-reference cannot stand in for a value of `{}`",
                expected.type_path()
            ))),
        }
    }

    /// Decodes a node whose concrete type is already settled.
    fn decode_resolved(
        &mut self,
        node: &Node,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        match info {
            TypeInfo::Scalar(scalar_info) => {
                let value = self.parse_scalar(node, scalar_info.scalar_kind())?;
                Ok(value.into_reflect())
            }
            TypeInfo::Text(_) => Ok(Box::new(String::from(
                node.text.as_deref().unwrap_or_default(),
            ))),
            TypeInfo::Token(_) => Ok(Box::new(self.decode_token(node)?)),
            TypeInfo::Dynamic(_) => Err(self.unsupported(info.type_path())),
            TypeInfo::Handle(_) => self.decode_handle(node, info),
            _ => {
                let mut blank = self.blank_of(info)?;
                self.decode_body(node, &mut *blank)?;
                Ok(blank)
            }
        }
    }

    /// Decodes the first occurrence of a shared value.
    fn decode_handle(
        &mut self,
        node: &Node,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        let mut blank = self.blank_of(info)?;
        let ReflectMut::Handle(handle) = blank.reflect_mut() else {
            return Err(self.unsupported(info.type_path()));
        };
        // The alias must be registered before the interior is decoded,
        // or references back to this handle from inside it would find
        // nothing.
        if let Some(raw) = node.attr(markup::ATTR_REF_ID) {
            let id: u32 = raw
                .trim()
                .parse()
                .map_err(|_| self.malformed(format!("reference id `{raw}` is not numeric")))?;
            self.refs.insert(id, handle.erased());
        }
        let mut inner = handle.borrow_inner_mut().map_err(|_| ReadError::HandleInUse {
            at: self.trace.render(),
            path: info.type_path(),
        })?;
        self.decode_body(node, &mut *inner)?;
        drop(inner);
        Ok(blank)
    }

    /// Decodes the body of `node` into an existing value.
    ///
    /// This is how handle interiors and freshly made blanks are filled:
    /// the value already exists, the node only supplies its content.
    fn decode_body(&mut self, node: &Node, dst: &mut dyn Reflect) -> Result<(), ReadError> {
        let info = dst.reflect_type_info();
        match dst.reflect_mut() {
            ReflectMut::Scalar(slot) => {
                let kind = match info.as_scalar() {
                    Ok(scalar_info) => scalar_info.scalar_kind(),
                    Err(_) => return Err(self.unsupported(info.type_path())),
                };
                let value = self.parse_scalar(node, kind)?;
                if let Err(value) = slot.set(value.into_reflect()) {
                    return Err(self.mismatch(info.type_path(), value.reflect_type_path()));
                }
            }
            ReflectMut::Text(text) => {
                *text = String::from(node.text.as_deref().unwrap_or_default());
            }
            ReflectMut::Token(token) => *token = self.decode_token(node)?,
            ReflectMut::Opt(opt) => {
                if Self::body_absent(node) {
                    opt.set_none();
                } else {
                    let inner = match info.as_opt() {
                        Ok(opt_info) => opt_info.inner_info(),
                        Err(_) => return Err(self.unsupported(info.type_path())),
                    };
                    let value = self.decode_body_boxed(node, inner)?;
                    if let Err(value) = opt.set_some(value) {
                        return Err(self.mismatch(inner.type_path(), value.reflect_type_path()));
                    }
                }
            }
            ReflectMut::Dynamic(_) | ReflectMut::Handle(_) => {
                return Err(self.unsupported(info.type_path()));
            }
            ReflectMut::Seq(seq) => self.decode_seq(node, seq)?,
            ReflectMut::Map(map) => self.decode_map(node, map)?,
            ReflectMut::Struct(fields) => self.decode_struct(node, fields)?,
        }
        Ok(())
    }

    /// Like [`Decoder::decode_resolved`], for values nested inside a
    /// body. Identities cannot be rebuilt from a body alone, the node's
    /// attributes belong to the enclosing value.
    fn decode_body_boxed(
        &mut self,
        node: &Node,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ReadError> {
        match info {
            TypeInfo::Handle(_) | TypeInfo::Dynamic(_) => Err(self.unsupported(info.type_path())),
            _ => self.decode_resolved(node, info),
        }
    }

    // ------------------------------------------------------------------
    // Containers

    fn decode_seq(&mut self, node: &Node, seq: &mut dyn Seq) -> Result<(), ReadError> {
        let info = seq.reflect_type_info();
        let seq_info = match info.as_seq() {
            Ok(seq_info) => seq_info,
            Err(_) => return Err(self.unsupported(info.type_path())),
        };
        let item_info = seq_info.item_info();
        let entries: Vec<&Node> = node.children_tagged(markup::TAG_ENTRY).collect();

        let Some(factory) = self.factory_by_id(seq_info.item_id()) else {
            return self.decode_seq_pushed(&entries, seq, item_info);
        };

        let len = match seq_info.fixed_len() {
            Some(fixed) => fixed,
            None => entries.len(),
        };
        seq.prepare(len, &mut || factory.make())
            .map_err(|err| self.malformed(format!("cannot prepare the sequence: {err}")))?;

        for entry in &entries {
            let index = self.entry_index(entry)?;
            self.trace.push(Frame::Entry(index));
            let result = self.decode_seq_entry(entry, index, seq, item_info);
            self.trace.pop();
            result?;
        }
        Ok(())
    }

    fn decode_seq_entry(
        &mut self,
        entry: &Node,
        index: usize,
        seq: &mut dyn Seq,
        item_info: &'static TypeInfo,
    ) -> Result<(), ReadError> {
        if index >= seq.len() {
            return Err(ReadError::IndexOutOfRange {
                at: self.trace.render(),
                index,
                len: seq.len(),
            });
        }
        // An absent element leaves its slot at the blank.
        if self.denotes_absent(entry, item_info) {
            return Ok(());
        }
        let value = self.decode_slot(Some(entry), item_info)?;
        let Some(slot) = seq.item_mut(index) else {
            return Err(self.malformed(format!("no element at index {index}")));
        };
        if let Err(value) = slot.set(value) {
            return Err(self.mismatch(item_info.type_path(), value.reflect_type_path()));
        }
        Ok(())
    }

    /// Rebuilds a sequence whose item type has no factory by pushing
    /// the decoded elements in index order. The indices must cover the
    /// whole range, there are no blanks to leave in place here.
    fn decode_seq_pushed(
        &mut self,
        entries: &[&Node],
        seq: &mut dyn Seq,
        item_info: &'static TypeInfo,
    ) -> Result<(), ReadError> {
        let mut ordered = Vec::with_capacity(entries.len());
        for entry in entries {
            ordered.push((self.entry_index(entry)?, *entry));
        }
        ordered.sort_by_key(|(index, _)| *index);

        for (position, (index, entry)) in ordered.iter().enumerate() {
            if *index != position {
                return Err(self.malformed(format!(
                    "entry indices do not cover 0..{} exactly",
                    ordered.len()
                )));
            }
            self.trace.push(Frame::Entry(*index));
            let result = self.decode_seq_push_entry(entry, seq, item_info);
            self.trace.pop();
            result?;
        }
        Ok(())
    }

    fn decode_seq_push_entry(
        &mut self,
        entry: &Node,
        seq: &mut dyn Seq,
        item_info: &'static TypeInfo,
    ) -> Result<(), ReadError> {
        let value = self.decode_slot(Some(entry), item_info)?;
        seq.push(value)
            .map_err(|err| self.malformed(format!("cannot append an element: {err}")))
    }

    fn decode_map(&mut self, node: &Node, map: &mut dyn Map) -> Result<(), ReadError> {
        let info = map.reflect_type_info();
        let map_info = match info.as_map() {
            Ok(map_info) => map_info,
            Err(_) => return Err(self.unsupported(info.type_path())),
        };
        map.clear();
        let entries: Vec<&Node> = node.children_tagged(markup::TAG_ENTRY).collect();
        for (position, entry) in entries.into_iter().enumerate() {
            self.trace.push(Frame::Entry(position));
            let result = self.decode_map_entry(entry, map, map_info);
            self.trace.pop();
            result?;
        }
        Ok(())
    }

    fn decode_map_entry(
        &mut self,
        entry: &Node,
        map: &mut dyn Map,
        map_info: &'static MapInfo,
    ) -> Result<(), ReadError> {
        self.trace.push(Frame::Key);
        let key = self.decode_slot(entry.child(markup::TAG_KEY), map_info.key_info());
        self.trace.pop();
        let key = key?;

        self.trace.push(Frame::Value);
        let value = self.decode_slot(entry.child(markup::TAG_VALUE), map_info.value_info());
        self.trace.pop();
        let value = value?;

        // Replacing an equal key is allowed, the later entry wins.
        if let Err((key, value)) = map.try_insert(key, value) {
            let (expected, received) = if key.ty_id() != map_info.key_id() {
                (map_info.key_info().type_path(), key.reflect_type_path())
            } else {
                (map_info.value_info().type_path(), value.reflect_type_path())
            };
            return Err(self.mismatch(expected, received));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Structs

    fn decode_struct(&mut self, node: &Node, dst: &mut dyn Struct) -> Result<(), ReadError> {
        let info = dst.reflect_type_info();
        let struct_info = match info.as_struct() {
            Ok(struct_info) => struct_info,
            Err(_) => return Err(self.unsupported(info.type_path())),
        };
        let Some(superclass) = node.attr(markup::ATTR_SUPERCLASS) else {
            return Err(ReadError::MissingSuperclass {
                at: self.trace.render(),
                path: struct_info.type_path(),
            });
        };
        let levels = chain_of(struct_info, Some(superclass)).map_err(|issue| match issue {
            ChainIssue::MissingAncestor => ReadError::UnknownAncestor {
                at: self.trace.render(),
                path: struct_info.type_path(),
                superclass: superclass.to_string(),
            },
            ChainIssue::UnreflectableBase { owner } => self.unsupported(owner),
        })?;
        if let Some((name, first, second)) = duplicate_field(&levels) {
            return Err(ReadError::DuplicateField {
                at: self.trace.render(),
                name,
                first,
                second,
            });
        }
        self.decode_levels(node, dst, &levels)
    }

    /// Decodes the fields declared by `levels[0]` into `dst`, then
    /// descends into the base value for the remaining levels.
    fn decode_levels(
        &mut self,
        node: &Node,
        dst: &mut dyn Struct,
        levels: &[&'static StructInfo],
    ) -> Result<(), ReadError> {
        let Some((level, rest)) = levels.split_first() else {
            return Ok(());
        };
        for field in level.iter() {
            if field.is_skipped() || field.is_base() {
                continue;
            }
            self.trace.push(Frame::Field(field.name()));
            let result = self.decode_field(node, dst, field);
            self.trace.pop();
            result?;
        }
        if rest.is_empty() {
            return Ok(());
        }
        let Some(base) = level.base() else {
            return Ok(());
        };
        let Some(base_value) = dst.field_mut(base.name()) else {
            return Ok(());
        };
        let base_path = base_value.reflect_type_path();
        match base_value.reflect_mut() {
            ReflectMut::Struct(base_struct) => self.decode_levels(node, base_struct, rest),
            _ => Err(self.unsupported(base_path)),
        }
    }

    fn decode_field(
        &mut self,
        node: &Node,
        dst: &mut dyn Struct,
        field: &NamedField,
    ) -> Result<(), ReadError> {
        let name = field.name();
        let Some(expected) = field.type_info() else {
            return Ok(());
        };
        let tag = markup::swap_reserved(name);
        match node.child(&tag) {
            Some(child) if !self.denotes_absent(child, expected) => {
                let value = self.decode_slot(Some(child), expected)?;
                let Some(slot) = dst.field_mut(name) else {
                    return Err(self.unsupported(expected.type_path()));
                };
                if let Err(value) = slot.set(value) {
                    return Err(self.mismatch(expected.type_path(), value.reflect_type_path()));
                }
            }
            _ => {
                // An absent field clears an optional slot and leaves
                // any other slot at its blank.
                if let Some(slot) = dst.field_mut(name) {
                    if let ReflectMut::Opt(opt) = slot.reflect_mut() {
                        opt.set_none();
                    }
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Leaves

    fn parse_scalar(&self, node: &Node, kind: ScalarKind) -> Result<ScalarValue, ReadError> {
        let text = node.text.as_deref().unwrap_or_default().trim();
        kind.parse(text).map_err(|source| ReadError::Scalar {
            at: self.trace.render(),
            source,
        })
    }

    /// Reads a type token from node text. Primitive names resolve
    /// through the fixed scalar table first, everything else through
    /// the registries.
    fn decode_token(&self, node: &Node) -> Result<TypeToken, ReadError> {
        let text = node.text.as_deref().unwrap_or_default().trim();
        if let Some(kind) = ScalarKind::from_path(text) {
            return Ok(TypeToken::from_scalar(kind));
        }
        if let Some(meta) = self.resolve(text) {
            return Ok(TypeToken::from_type(meta.ty()));
        }
        Err(ReadError::UnknownType {
            at: self.trace.render(),
            path: text.to_string(),
        })
    }

    fn entry_index(&self, entry: &Node) -> Result<usize, ReadError> {
        let Some(raw) = entry.attr(markup::ATTR_INDEX) else {
            return Err(self.malformed(String::from("entry without an `index` attribute")));
        };
        raw.trim()
            .parse()
            .map_err(|_| self.malformed(format!("entry index `{raw}` is not numeric")))
    }
}
