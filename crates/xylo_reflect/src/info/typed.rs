use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect), allowing
/// access to a type's [`TypeInfo`] without an instance of the type.
///
/// # Example
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Probe {
///     value: i32,
/// }
///
/// let info = <Probe as Typed>::type_info();
/// assert_eq!(info.type_ident(), "Probe");
/// ```
///
/// Manual implementations should route construction through
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) or
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell) so the info is
/// built once and leaked to `'static`.
pub trait Typed: TypePath {
    /// Returns the compile-time info of this type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch over [`Typed`].
///
/// Auto-implemented for every type that implements [`Typed`]; a supertrait
/// of [`Reflect`](crate::Reflect), so type info stays reachable behind
/// `dyn Reflect`.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
