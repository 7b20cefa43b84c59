use crate::Reflect;

/// A trait for named-field struct access.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) for
/// structs with named fields. Field names, order and per-field flags come
/// from the matching [`StructInfo`](crate::info::StructInfo); this trait
/// only resolves names to values.
///
/// Fields marked `#[reflect(ignore)]` are not reachable through this
/// trait.
///
/// # Example
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::ops::Struct;
///
/// #[derive(Reflect, Default)]
/// struct Lamp {
///     lit: bool,
/// }
///
/// let lamp = Lamp { lit: true };
/// let view: &dyn Struct = lamp.reflect_ref().as_struct().unwrap();
/// assert!(view.field("lit").unwrap().is::<bool>());
/// assert!(view.field("watts").is_none());
/// ```
pub trait Struct: Reflect {
    /// Returns the field named `name`, if the struct declares it and it
    /// participates in reflection.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Mutable form of [`field`](Struct::field).
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;
}
