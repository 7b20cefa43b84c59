use alloc::string::String;
use core::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;

use crate::TypeToken;
use crate::info::TypeInfo;
use crate::registry::{Factory, GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// This is the central store of type information. [Registering] a type
/// generates a [`TypeMeta`] entry from its [`GetTypeMeta`] implementation
/// (derived by [`#[derive(Reflect)]`](crate::derive::Reflect)), and
/// decoding resolves the type paths found in documents against these
/// entries.
///
/// # Example
///
/// ```
/// use xylo_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// let meta = registry.get_with_type_path("alloc::string::String").unwrap();
/// let blank = meta.blank().unwrap();
/// assert_eq!(blank.take::<String>().unwrap(), "");
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: HashMap<TypeId, TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: HashMap::new(),
            type_path_to_id: HashMap::new(),
        }
    }

    /// Creates a registry with default registrations for basic types.
    ///
    /// - `bool` `char`
    /// - `u8` - `u128`, `usize`
    /// - `i8` - `i128`, `isize`
    /// - `f32` `f64`
    /// - `String`, [`TypeToken`]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<TypeToken>();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
    ) {
        let ty = type_meta.ty();
        // For a new type, the full path cannot be duplicated.
        type_path_to_id.insert(ty.path(), ty.id());
    }

    // - If the key `TypeId` already exists, do nothing and return `false`.
    // - If it does not, insert the value and return `true`.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        match self.type_meta_table.entry(type_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let meta = get_type_meta();
                Self::add_new_type_indices(&meta, &mut self.type_path_to_id);
                entry.insert(meta);
                true
            }
        }
    }

    /// Try to add, or do nothing.
    ///
    /// - If the key [`TypeId`] already exists, do nothing and return
    ///   `false`.
    /// - If it does not, insert the value and return `true`.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its
    /// dependencies.
    #[inline(always)]
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.register_internal(type_meta.ty_id(), || type_meta)
    }

    /// Insert or **overwrite**.
    ///
    /// Unlike [`try_insert_type_meta`](Self::try_insert_type_meta), an
    /// existing entry for the same type is replaced. This is how a caller
    /// swaps in a customized [`TypeMeta`], for example one whose factory
    /// does not go through `Default`.
    ///
    /// This method will _not_ register type dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains_key(&type_meta.ty_id()) {
            Self::add_new_type_indices(&type_meta, &mut self.type_path_to_id);
        }
        self.type_meta_table.insert(type_meta.ty_id(), type_meta);
    }

    /// Attempts to register the type `T` if it has not been registered
    /// already.
    ///
    /// This also recursively registers the type dependencies specified by
    /// [`GetTypeMeta::register_dependencies`]; when deriving `Reflect`,
    /// these are the participating field types. If `T` is already present,
    /// neither it nor its dependencies are registered again.
    ///
    /// # Example
    ///
    /// ```
    /// use core::any::TypeId;
    /// use xylo_reflect::Reflect;
    /// use xylo_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Reflect, Default)]
    /// struct Sensor {
    ///     label: Option<String>,
    ///     value: f64,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Sensor>();
    ///
    /// // The type itself.
    /// assert!(registry.contains(TypeId::of::<Sensor>()));
    ///
    /// // Its dependencies.
    /// assert!(registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(registry.contains(TypeId::of::<f64>()));
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers `T` if needed, then replaces its [`Factory`].
    ///
    /// This is for types whose `Default` value is not the blank a decoder
    /// should start from, or that have no `Default` at all.
    ///
    /// # Example
    ///
    /// ```
    /// use xylo_reflect::Reflect;
    /// use xylo_reflect::registry::{Factory, TypeRegistry};
    ///
    /// #[derive(Reflect, Default)]
    /// struct Counter {
    ///     start: u32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.overwrite_factory::<Counter>(Factory::new(|| {
    ///     Box::new(Counter { start: 1 })
    /// }));
    ///
    /// let blank = registry
    ///     .get(core::any::TypeId::of::<Counter>())
    ///     .and_then(|meta| meta.blank())
    ///     .unwrap();
    /// assert_eq!(blank.downcast_ref::<Counter>().unwrap().start, 1);
    /// ```
    pub fn overwrite_factory<T: GetTypeMeta>(&mut self, factory: Factory) {
        self.register::<T>();
        if let Some(meta) = self.get_mut(TypeId::of::<T>()) {
            meta.set_factory(factory);
        }
    }

    /// Applies every pending [`auto_register!`](crate::auto_register)
    /// submission to this registry.
    ///
    /// Returns the number of submissions seen. With the `auto_register`
    /// feature disabled, or on platforms without constructor support,
    /// this is `0`. Repeated calls are cheap; duplicates are not
    /// inserted.
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            let mut seen = 0_usize;
            for entry in inventory::iter::<crate::registry::AutoRegistration> {
                entry.apply(self);
                seen += 1;
            }
            seen
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    /// Whether the type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains_key(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`].
    ///
    /// If the type has not been registered, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [`TypeId`]
    /// mutably.
    ///
    /// If the type has not been registered, returns `None`.
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [type path].
    ///
    /// If no type with the given path has been registered, returns `None`.
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        // Manual inline
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the [`TypeInfo`] of the type with the given [`TypeId`].
    ///
    /// If the type has not been registered, returns `None`.
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// Global registry

/// Returns the process-wide registry.
///
/// Built on first use: the default registrations of
/// [`TypeRegistry::new`], plus every
/// [`auto_register!`](crate::auto_register) submission. Decoding falls
/// back to this registry when no caller-supplied one resolves a type
/// path.
pub fn global() -> &'static TypeRegistry {
    static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
    GLOBAL.get_or_init(|| {
        let mut registry = TypeRegistry::new();
        registry.auto_register();
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_covers_the_basic_types() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<bool>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("i32").is_some());
        assert!(registry.get_with_type_path("xylo_reflect::TypeToken").is_some());
        assert!(registry.get_with_type_path("no::such::Type").is_none());
    }

    #[test]
    fn register_recurses_into_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<u8>>>();

        assert!(registry.contains(TypeId::of::<Vec<Option<u8>>>()));
        assert!(registry.contains(TypeId::of::<Option<u8>>()));
        assert!(registry.contains(TypeId::of::<u8>()));
    }

    #[test]
    fn lookup_by_path_follows_registration() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<String>>();

        let meta = registry
            .get_with_type_path("alloc::vec::Vec<alloc::string::String>")
            .unwrap();
        let blank = meta.blank().unwrap();
        assert!(blank.is::<Vec<String>>());
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let mut registry = TypeRegistry::new();
        let before = registry.iter().len();
        registry.register::<String>();
        assert_eq!(registry.iter().len(), before);
    }
}
