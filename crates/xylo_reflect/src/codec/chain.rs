//! Ancestry chains of base-embedding structs.
//!
//! A struct may embed one field marked as its base. Encoded documents
//! flatten the whole chain into a single node, so both engines need the
//! ordered list of levels and a check that no two levels declare the
//! same field name.

use alloc::vec::Vec;
use std::collections::HashMap;

use crate::info::{StructInfo, TypeInfo};

/// Why an ancestry chain could not be assembled.
#[derive(Debug)]
pub(super) enum ChainIssue {
    /// The requested ancestor never appears on the chain.
    MissingAncestor,
    /// A base field's type does not describe itself as a struct.
    UnreflectableBase { owner: &'static str },
}

/// Collects a struct and its ancestors, most derived first.
///
/// With `stop_at` the walk ends at the named ancestor, which is still
/// included in the returned levels.
pub(super) fn chain_of(
    info: &'static StructInfo,
    stop_at: Option<&str>,
) -> Result<Vec<&'static StructInfo>, ChainIssue> {
    let mut levels = Vec::new();
    let mut current = info;
    loop {
        levels.push(current);
        if stop_at.is_some_and(|stop| current.type_path() == stop) {
            return Ok(levels);
        }
        let Some(base) = current.base() else {
            return match stop_at {
                Some(_) => Err(ChainIssue::MissingAncestor),
                None => Ok(levels),
            };
        };
        match base.type_info() {
            Some(TypeInfo::Struct(next)) => current = next,
            _ => {
                return Err(ChainIssue::UnreflectableBase {
                    owner: current.type_path(),
                });
            }
        }
    }
}

/// Finds a field name declared by two levels of the chain, if any.
///
/// Returns the name together with the paths of both declaring levels.
/// Skipped fields and the base links themselves do not participate.
pub(super) fn duplicate_field(
    levels: &[&'static StructInfo],
) -> Option<(&'static str, &'static str, &'static str)> {
    let mut owners: HashMap<&'static str, &'static str> = HashMap::new();
    for level in levels {
        for field in level.iter() {
            if field.is_skipped() || field.is_base() {
                continue;
            }
            if let Some(first) = owners.insert(field.name(), level.type_path()) {
                return Some((field.name(), first, level.type_path()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[derive(Reflect, Default)]
    struct Chassis {
        axles: u8,
    }

    #[derive(Reflect, Default)]
    struct Wagon {
        #[reflect(base)]
        chassis: Chassis,
        label: String,
    }

    #[derive(Reflect, Default)]
    struct Tanker {
        #[reflect(base)]
        wagon: Wagon,
        volume: f32,
    }

    #[derive(Reflect, Default)]
    struct Flatbed {
        #[reflect(base)]
        chassis: Chassis,
        axles: u8,
    }

    fn struct_info_of<T: Typed>() -> &'static StructInfo {
        T::type_info().as_struct().unwrap()
    }

    #[test]
    fn walks_to_the_root_ancestor() {
        let levels = chain_of(struct_info_of::<Tanker>(), None).unwrap();
        let idents: Vec<&str> = levels.iter().map(|info| info.type_ident()).collect();
        assert_eq!(idents, ["Tanker", "Wagon", "Chassis"]);
    }

    #[test]
    fn stops_at_the_named_ancestor() {
        let levels = chain_of(struct_info_of::<Tanker>(), Some(Wagon::type_path())).unwrap();
        assert_eq!(levels.len(), 2);

        let levels = chain_of(struct_info_of::<Tanker>(), Some(Tanker::type_path())).unwrap();
        assert_eq!(levels.len(), 1);

        assert!(matches!(
            chain_of(struct_info_of::<Tanker>(), Some("depot::Shed")),
            Err(ChainIssue::MissingAncestor)
        ));
    }

    #[test]
    fn reports_colliding_field_names() {
        let levels = chain_of(struct_info_of::<Tanker>(), None).unwrap();
        assert!(duplicate_field(&levels).is_none());

        let levels = chain_of(struct_info_of::<Flatbed>(), None).unwrap();
        let (name, first, second) = duplicate_field(&levels).unwrap();
        assert_eq!(name, "axles");
        assert_eq!(first, Flatbed::type_path());
        assert_eq!(second, Chassis::type_path());
    }
}
