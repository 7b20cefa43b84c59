#[cfg(feature = "auto_register")]
use crate::registry::{GetTypeMeta, TypeRegistry};

/// One pending type registration, collected at link time.
///
/// Submitted by [`auto_register!`](crate::auto_register) (directly or via
/// `#[reflect(auto_register)]`) and applied by
/// [`TypeRegistry::auto_register`].
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    register: fn(&mut TypeRegistry),
}

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    /// Creates the registration of type `T`.
    pub const fn of<T: GetTypeMeta>() -> Self {
        Self {
            register: |registry| registry.register::<T>(),
        }
    }

    pub(crate) fn apply(&self, registry: &mut TypeRegistry) {
        (self.register)(registry);
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

/// Submits a type for automatic registration.
///
/// Every submitted type is picked up by
/// [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register)
/// and therefore by the [global registry](crate::registry::global). The
/// usual way to submit is `#[reflect(auto_register)]` on the derive; this
/// macro is the escape hatch for types where the attribute cannot be
/// placed, such as monomorphizations of generic containers.
///
/// With the `auto_register` feature disabled the macro expands to
/// nothing.
///
/// # Example
///
/// ```
/// use xylo_reflect::auto_register;
///
/// auto_register!(Vec<Option<String>>);
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration::of::<$ty>()
        }
    };
}

/// Submits a type for automatic registration.
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {};
}

#[cfg(all(test, feature = "auto_register"))]
mod tests {
    use core::any::TypeId;

    use crate::registry::TypeRegistry;

    crate::auto_register!(Vec<u16>);

    #[test]
    fn submissions_reach_the_registry() {
        let mut registry = TypeRegistry::empty();
        let seen = registry.auto_register();

        assert!(seen >= 1);
        assert!(registry.contains(TypeId::of::<Vec<u16>>()));
        // Dependencies ride along.
        assert!(registry.contains(TypeId::of::<u16>()));
    }
}
