//! Object graphs as element trees.
//!
//! Any [`Reflect`] value can be encoded into a [`Node`] tree and turned
//! back into a value later. Each element carries the value's type path
//! in a `classpath` attribute, struct fields become child elements,
//! sequences and maps become `entry` children, and scalars ride along
//! as element text. Shared values are written once and referred back to
//! by id afterwards, so aliasing and cycles survive the trip.
//!
//! Decoding is driven by the expected type: the target type is
//! registered together with everything it transitively contains, and
//! every `classpath` met along the way must resolve to a registered
//! type. Values reached only through [`DynamicValue`](crate::DynamicValue)
//! slots are not part of that closure, so they come from the caller's
//! registry or from [global registration](crate::registry::global).
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use xylo_reflect::Reflect;
//! use xylo_reflect::codec;
//!
//! #[derive(Reflect, Debug, Default, PartialEq)]
//! struct Depot {
//!     name: String,
//!     stock: BTreeMap<String, u32>,
//! }
//!
//! let mut depot = Depot::default();
//! depot.name = String::from("north yard");
//! depot.stock.insert(String::from("bolts"), 40);
//!
//! let node = codec::to_node(&depot)?;
//! let back: Depot = codec::from_node(&node)?;
//! assert_eq!(back, depot);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::{self, Write as _};
use std::path::Path;

use xylo_tree::{Node, xml};

use crate::Reflect;
use crate::registry::{GetTypeMeta, TypeRegistry};

mod chain;
mod error;
mod markup;
mod reader;
mod trace;
mod writer;

pub use error::{ReadError, WriteError};

use reader::Decoder;

/// Encodes a value into an element tree.
///
/// Option and dynamic wrappers around the root are shed first; an
/// absent root has no element to become and is rejected.
pub fn to_node(value: &dyn Reflect) -> Result<Node, WriteError> {
    writer::to_node(value)
}

/// Encodes a value and writes it out as an XML document.
pub fn serialize<W: io::Write>(value: &dyn Reflect, writer: W) -> Result<(), WriteError> {
    let node = to_node(value)?;
    xml::to_writer(&node, writer)?;
    Ok(())
}

/// Encodes a value into an XML file at `path`.
pub fn write<P: AsRef<Path>>(value: &dyn Reflect, path: P) -> Result<(), WriteError> {
    let file = File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    serialize(value, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Decodes a value of `T` from an element tree.
///
/// `T` and every type it transitively contains are registered for the
/// duration of the call. Types that only appear behind dynamic slots
/// must be [globally registered](crate::registry::global); use
/// [`from_node_with`] to supply them explicitly instead.
pub fn from_node<T: Reflect + GetTypeMeta>(node: &Node) -> Result<T, ReadError> {
    decode_root::<T>(node, None)
}

/// Decodes a value of `T`, resolving type paths through `registry`
/// before the built-in lookup.
pub fn from_node_with<T: Reflect + GetTypeMeta>(
    node: &Node,
    registry: &TypeRegistry,
) -> Result<T, ReadError> {
    decode_root::<T>(node, Some(registry))
}

/// Decodes a value of `T` from an XML document.
pub fn deserialize<T: Reflect + GetTypeMeta, R: io::BufRead>(reader: R) -> Result<T, ReadError> {
    let node = xml::from_reader(reader)?;
    from_node(&node)
}

/// Decodes a value of `T` from an XML document, resolving type paths
/// through `registry` before the built-in lookup.
pub fn deserialize_with<T: Reflect + GetTypeMeta, R: io::BufRead>(
    reader: R,
    registry: &TypeRegistry,
) -> Result<T, ReadError> {
    let node = xml::from_reader(reader)?;
    from_node_with(&node, registry)
}

/// Decodes a value of `T` from an XML file at `path`.
pub fn read<T: Reflect + GetTypeMeta, P: AsRef<Path>>(path: P) -> Result<T, ReadError> {
    let file = File::open(path)?;
    deserialize(io::BufReader::new(file))
}

/// Decodes a value of `T` from an XML file at `path`, resolving type
/// paths through `registry` before the built-in lookup.
pub fn read_with<T: Reflect + GetTypeMeta, P: AsRef<Path>>(
    path: P,
    registry: &TypeRegistry,
) -> Result<T, ReadError> {
    let file = File::open(path)?;
    deserialize_with(io::BufReader::new(file), registry)
}

fn decode_root<T: Reflect + GetTypeMeta>(
    node: &Node,
    registry: Option<&TypeRegistry>,
) -> Result<T, ReadError> {
    let mut decoder = Decoder::new::<T>(registry, &node.tag);
    let value = decoder.decode_slot(Some(node), T::type_info())?;
    value.take::<T>().map_err(|value| ReadError::TypeMismatch {
        at: node.tag.clone(),
        expected: T::type_info().type_path(),
        received: value.reflect_type_path(),
    })
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::marker::PhantomData;
    use std::collections::BTreeMap;

    use xylo_tree::{Node, xml};

    use super::*;
    use crate::Reflect;
    use crate::impls::{DynamicValue, Shared, TypeToken};
    use crate::info::TypePath;
    use crate::registry::TypeRegistry;

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Probe {
        id: u32,
        gain: f32,
        label: String,
        armed: bool,
    }

    fn probe() -> Probe {
        Probe {
            id: 7,
            gain: 2.5,
            label: String::from("probe-a"),
            armed: true,
        }
    }

    #[test]
    fn scalars_round_trip_through_a_struct() {
        let original = probe();
        let node = to_node(&original).unwrap();

        assert_eq!(node.tag, "Probe");
        assert_eq!(node.attr("classpath"), Some(Probe::type_path()));
        assert_eq!(node.attr("refId"), Some("0"));
        assert_eq!(node.attr("superclass"), Some(Probe::type_path()));
        assert_eq!(node.children.len(), 4);

        let id = node.child("id").unwrap();
        assert_eq!(id.attr("classpath"), Some("u32"));
        assert_eq!(id.attr("refId"), None);
        assert_eq!(id.text.as_deref(), Some("7"));

        let label = node.child("label").unwrap();
        assert_eq!(label.attr("refId"), Some("1"));
        assert_eq!(label.text.as_deref(), Some("probe-a"));

        let decoded: Probe = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Profile {
        nickname: Option<String>,
        age: Option<u16>,
    }

    #[test]
    fn optional_fields_come_and_go() {
        let original = Profile {
            nickname: Some(String::from("zed")),
            age: None,
        };
        let mut node = to_node(&original).unwrap();
        assert!(node.child("nickname").is_some());
        assert!(node.child("age").is_none());

        let decoded: Profile = from_node(&node).unwrap();
        assert_eq!(decoded, original);

        node.children.clear();
        let bare: Profile = from_node(&node).unwrap();
        assert_eq!(bare, Profile::default());
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Batch {
        samples: Vec<i64>,
        window: [u8; 3],
    }

    #[test]
    fn sequences_round_trip() {
        let original = Batch {
            samples: vec![-4, 9, 0],
            window: [1, 2, 3],
        };
        let node = to_node(&original).unwrap();

        let samples = node.child("samples").unwrap();
        let indices: Vec<_> = samples
            .children_tagged("entry")
            .map(|entry| entry.attr("index").unwrap())
            .collect();
        assert_eq!(indices, ["0", "1", "2"]);

        let decoded: Batch = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Roster {
        seats: BTreeMap<Option<String>, Option<u32>>,
    }

    #[test]
    fn maps_round_trip_with_optional_keys_and_values() {
        let mut original = Roster::default();
        original.seats.insert(None, Some(7));
        original.seats.insert(Some(String::from("ada")), None);
        original.seats.insert(Some(String::from("bo")), Some(2));

        let node = to_node(&original).unwrap();
        let seats = node.child("seats").unwrap();
        let entries: Vec<_> = seats.children_tagged("entry").collect();
        assert_eq!(entries.len(), 3);
        // The `None` key sorts first and writes no key child.
        assert!(entries[0].child("key").is_none());
        assert_eq!(entries[0].child("value").unwrap().text.as_deref(), Some("7"));
        assert!(entries[1].child("value").is_none());

        let decoded: Roster = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Note {
        body: String,
    }

    #[test]
    fn string_content_is_escaped_on_the_wire() {
        let original = Note {
            body: String::from("a <b> & \"c\" 'd'"),
        };
        let document = xml::to_string(&to_node(&original).unwrap()).unwrap();
        let decoded: Note = deserialize(document.as_bytes()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn empty_text_round_trips() {
        let original = Note::default();
        let node = to_node(&original).unwrap();
        assert_eq!(node.child("body").unwrap().text, None);
        let decoded: Note = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn the_wire_shape_of_a_list_of_text() {
        let values = vec![String::from("hi"), String::from("there")];
        let node = to_node(&values).unwrap();

        assert_eq!(node.tag, "Vec");
        assert_eq!(node.attr("classpath"), Some(<Vec<String>>::type_path()));
        assert_eq!(node.attr("refId"), Some("0"));

        let first = &node.children[0];
        assert_eq!(first.tag, "entry");
        assert_eq!(first.attr("classpath"), Some("alloc::string::String"));
        assert_eq!(first.attr("index"), Some("0"));
        assert_eq!(first.attr("refId"), Some("1"));
        assert_eq!(first.text.as_deref(), Some("hi"));

        let second = &node.children[1];
        assert_eq!(second.attr("index"), Some("1"));
        assert_eq!(second.attr("refId"), Some("2"));
        assert_eq!(second.text.as_deref(), Some("there"));

        let mut buf = Vec::new();
        serialize(&values, &mut buf).unwrap();
        let reparsed = xml::from_str(&String::from_utf8(buf).unwrap()).unwrap();
        assert_eq!(reparsed, node);

        let decoded: Vec<String> = from_node(&node).unwrap();
        assert_eq!(decoded, values);
    }

    #[derive(Reflect, Debug, Default)]
    struct Meter {
        reading: i32,
    }

    #[derive(Reflect, Debug, Default)]
    struct Panel {
        left: Shared<Meter>,
        right: Shared<Meter>,
    }

    #[test]
    fn shared_values_keep_their_identity() {
        let meter = Shared::new(Meter { reading: 9 });
        let original = Panel {
            left: meter.clone(),
            right: meter,
        };
        let node = to_node(&original).unwrap();

        let left = node.child("left").unwrap();
        assert_eq!(left.attr("refId"), Some("1"));
        let right = node.child("right").unwrap();
        assert_eq!(right.attr("seeRefId"), Some("1"));
        assert_eq!(right.attr("refId"), None);

        let decoded: Panel = from_node(&node).unwrap();
        assert!(decoded.left.ptr_eq(&decoded.right));
        decoded.left.borrow_mut().reading = 11;
        assert_eq!(decoded.right.borrow().reading, 11);
    }

    #[derive(Reflect, Debug, Default)]
    struct Link {
        name: String,
        next: Option<Shared<Link>>,
    }

    #[test]
    fn cycles_round_trip() {
        let first = Shared::new(Link {
            name: String::from("a"),
            next: None,
        });
        let second = Shared::new(Link {
            name: String::from("b"),
            next: Some(first.clone()),
        });
        first.borrow_mut().next = Some(second.clone());

        let node = to_node(&first).unwrap();
        assert_eq!(node.attr("refId"), Some("0"));
        assert_eq!(node.child("name").unwrap().attr("refId"), Some("1"));
        let onward = node.child("next").unwrap();
        assert_eq!(onward.attr("refId"), Some("2"));
        assert_eq!(onward.child("name").unwrap().attr("refId"), Some("3"));
        let back = onward.child("next").unwrap();
        assert_eq!(back.attr("seeRefId"), Some("0"));
        assert_eq!(back.attr("refId"), None);
        assert_eq!(back.attr("classpath"), Some(<Shared<Link>>::type_path()));

        let decoded: Shared<Link> = from_node(&node).unwrap();
        assert_eq!(decoded.borrow().name, "a");
        let onward = decoded.borrow().next.clone().expect("second link");
        assert_eq!(onward.borrow().name, "b");
        let back = onward.borrow().next.clone().expect("link back");
        assert!(back.ptr_eq(&decoded));
    }

    #[test]
    fn a_shared_map_can_contain_itself() {
        let bag: Shared<BTreeMap<String, DynamicValue>> = Shared::new(BTreeMap::new());
        bag.borrow_mut()
            .insert(String::from("me"), DynamicValue::new(bag.clone()));

        let node = to_node(&bag).unwrap();
        let entry = node.children_tagged("entry").next().unwrap();
        assert_eq!(entry.child("value").unwrap().attr("seeRefId"), Some("0"));

        let decoded: Shared<BTreeMap<String, DynamicValue>> = from_node(&node).unwrap();
        let inner = decoded.borrow();
        let alias = inner
            .get("me")
            .and_then(|value| value.downcast_ref::<Shared<BTreeMap<String, DynamicValue>>>())
            .expect("the map holds itself");
        assert!(decoded.ptr_eq(alias));
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Chassis {
        axles: u8,
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Wagon {
        #[reflect(base)]
        chassis: Chassis,
        label: String,
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Tanker {
        #[reflect(base)]
        wagon: Wagon,
        volume: f32,
    }

    #[test]
    fn base_chains_flatten_into_one_element() {
        let original = Tanker {
            wagon: Wagon {
                chassis: Chassis { axles: 4 },
                label: String::from("grain"),
            },
            volume: 88.5,
        };
        let node = to_node(&original).unwrap();

        assert_eq!(node.attr("superclass"), Some(Chassis::type_path()));
        let tags: Vec<_> = node.children.iter().map(|child| child.tag.as_str()).collect();
        assert_eq!(tags, ["volume", "label", "axles"]);

        let decoded: Tanker = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default)]
    struct Flatbed {
        #[reflect(base)]
        chassis: Chassis,
        axles: u8,
    }

    #[test]
    fn colliding_chain_fields_are_rejected() {
        let err = to_node(&Flatbed::default()).unwrap_err();
        assert!(matches!(err, WriteError::DuplicateField { name: "axles", .. }));

        let node = Node::new("Flatbed")
            .with_attr("classpath", Flatbed::type_path())
            .with_attr("refId", "0")
            .with_attr("superclass", Chassis::type_path());
        let err = from_node::<Flatbed>(&node).unwrap_err();
        assert!(matches!(err, ReadError::DuplicateField { name: "axles", .. }));
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Cache {
        hits: u32,
        #[reflect(ignore)]
        scratch: Vec<u8>,
        marker: PhantomData<fn()>,
    }

    #[test]
    fn ignored_and_marker_fields_stay_off_the_wire() {
        let original = Cache {
            hits: 3,
            scratch: vec![9, 9, 9],
            marker: PhantomData,
        };
        let node = to_node(&original).unwrap();
        assert!(node.child("scratch").is_none());
        assert!(node.child("marker").is_none());

        let decoded: Cache = from_node(&node).unwrap();
        assert_eq!(decoded.hits, 3);
        assert!(decoded.scratch.is_empty());
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Selector {
        r#type: String,
    }

    #[test]
    fn raw_identifier_fields_swap_their_hash() {
        let original = Selector {
            r#type: String::from("narrow"),
        };
        let node = to_node(&original).unwrap();
        assert!(node.child("r.type").is_some());

        let decoded: Selector = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Plug {
        shape: Option<TypeToken>,
        unit: Option<TypeToken>,
    }

    #[test]
    fn type_tokens_round_trip() {
        let original = Plug {
            shape: Some(TypeToken::of::<u32>()),
            unit: Some(TypeToken::of::<String>()),
        };
        let node = to_node(&original).unwrap();
        assert_eq!(node.child("shape").unwrap().text.as_deref(), Some("u32"));

        let decoded: Plug = from_node(&node).unwrap();
        assert_eq!(decoded, original);
    }

    #[derive(Reflect, Debug, Default)]
    struct Pack {
        extras: BTreeMap<String, DynamicValue>,
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Badge {
        stars: u8,
    }

    #[test]
    fn dynamic_values_decode_through_a_caller_registry() {
        let mut original = Pack::default();
        original
            .extras
            .insert(String::from("badge"), DynamicValue::new(Badge { stars: 2 }));
        original
            .extras
            .insert(String::from("count"), DynamicValue::new(3_i64));
        let node = to_node(&original).unwrap();

        // `Badge` hides behind a dynamic slot, so decoding cannot find
        // it on its own.
        let err = from_node::<Pack>(&node).err().expect("unregistered type");
        assert!(matches!(err, ReadError::UnknownType { .. }));

        let mut registry = TypeRegistry::new();
        registry.register::<Badge>();
        let decoded: Pack = from_node_with(&node, &registry).unwrap();
        let badge = decoded
            .extras
            .get("badge")
            .and_then(|value| value.downcast_ref::<Badge>())
            .expect("badge entry");
        assert_eq!(badge.stars, 2);
        let count = decoded
            .extras
            .get("count")
            .and_then(|value| value.downcast_ref::<i64>())
            .expect("count entry");
        assert_eq!(*count, 3);
    }

    #[cfg(feature = "auto_register")]
    #[derive(Reflect, Debug, Default, PartialEq)]
    #[reflect(auto_register)]
    struct Stamp {
        code: u32,
    }

    #[cfg(feature = "auto_register")]
    #[derive(Reflect, Debug, Default)]
    struct Wrap {
        payload: Option<DynamicValue>,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_registered_types_resolve_globally() {
        let original = Wrap {
            payload: Some(DynamicValue::new(Stamp { code: 7 })),
        };
        let node = to_node(&original).unwrap();
        let decoded: Wrap = from_node(&node).unwrap();
        let stamp = decoded
            .payload
            .as_ref()
            .and_then(|value| value.downcast_ref::<Stamp>())
            .expect("stamp payload");
        assert_eq!(stamp.code, 7);
    }

    #[derive(Reflect, Debug, Default, PartialEq)]
    struct Trio {
        cells: [i16; 3],
    }

    #[test]
    fn absent_sequence_entries_keep_the_blank() {
        let mut node = to_node(&Trio { cells: [4, 5, 6] }).unwrap();
        let cells = node
            .children
            .iter_mut()
            .find(|child| child.tag == "cells")
            .unwrap();
        cells.children[1] = Node::new("entry").with_attr("index", "1");

        let decoded: Trio = from_node(&node).unwrap();
        assert_eq!(decoded.cells, [4, 0, 6]);
    }

    #[test]
    fn out_of_range_entries_are_rejected() {
        let mut node = to_node(&Trio { cells: [4, 5, 6] }).unwrap();
        let cells = node
            .children
            .iter_mut()
            .find(|child| child.tag == "cells")
            .unwrap();
        cells.children[2].set_attr("index", "9");

        let err = from_node::<Trio>(&node).unwrap_err();
        assert!(matches!(
            err,
            ReadError::IndexOutOfRange { index: 9, len: 3, .. }
        ));
    }

    #[test]
    fn a_bare_root_is_absent() {
        let node = Node::new("Probe");
        let err = from_node::<Probe>(&node).unwrap_err();
        assert!(matches!(err, ReadError::AbsentValue { .. }));
    }

    #[test]
    fn unknown_classpaths_are_reported() {
        let node = Node::new("Probe")
            .with_attr("classpath", "depot::Ghost")
            .with_attr("refId", "0");
        let err = from_node::<Probe>(&node).unwrap_err();
        match err {
            ReadError::UnknownType { path, .. } => assert_eq!(path, "depot::Ghost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dangling_references_are_rejected() {
        let node = Node::new("Shared").with_attr("seeRefId", "5");
        let err = from_node::<Shared<Meter>>(&node).unwrap_err();
        assert!(matches!(err, ReadError::UnresolvedRef { id: 5, .. }));
    }

    #[test]
    fn parse_failures_carry_their_location() {
        let mut node = to_node(&probe()).unwrap();
        let gain = node
            .children
            .iter_mut()
            .find(|child| child.tag == "gain")
            .unwrap();
        gain.text = Some(String::from("wide"));

        let err = from_node::<Probe>(&node).unwrap_err();
        match err {
            ReadError::Scalar { at, .. } => assert_eq!(at, "Probe.gain"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn borrowed_handles_cannot_encode() {
        let shared = Shared::new(Meter { reading: 1 });
        let held = shared.borrow_mut();
        let err = to_node(&shared).unwrap_err();
        assert!(matches!(err, WriteError::HandleInUse { .. }));
        drop(held);
    }

    #[test]
    fn files_round_trip() {
        let original = probe();
        let path = std::env::temp_dir().join(format!("xylo-codec-{}.xml", std::process::id()));
        write(&original, &path).unwrap();
        let decoded: Probe = read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(decoded, original);
    }
}
