use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use core::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use core::fmt;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{HandleInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ErasedHandle, Handle, HandleError};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

/// A shared, interiorly mutable slot in an object graph.
///
/// `Shared<T>` is the one way a value can be referenced from several
/// places at once, including cyclically. Clones alias the same
/// allocation, and the codec preserves that aliasing: a value reachable
/// through two handles is encoded once and decoded back into two handles
/// pointing at one allocation.
///
/// # Example
///
/// ```
/// use xylo_reflect::Shared;
///
/// let first = Shared::new(String::from("together"));
/// let second = first.clone();
///
/// second.borrow_mut().push('!');
/// assert_eq!(*first.borrow(), "together!");
/// assert!(first.ptr_eq(&second));
/// ```
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Moves `value` into a fresh shared allocation.
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Returns `true` when both handles alias the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the value for reading.
    ///
    /// # Panics
    ///
    /// Panics while a mutable borrow is outstanding. Use
    /// [`try_borrow`](Self::try_borrow) to handle that case.
    #[inline]
    #[track_caller]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrows the value for writing.
    ///
    /// # Panics
    ///
    /// Panics while any other borrow is outstanding. Use
    /// [`try_borrow_mut`](Self::try_borrow_mut) to handle that case.
    #[inline]
    #[track_caller]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Fallible form of [`borrow`](Self::borrow).
    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    /// Fallible form of [`borrow_mut`](Self::borrow_mut).
    #[inline]
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, T>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    /// Replaces the value, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics while any borrow is outstanding.
    #[inline]
    #[track_caller]
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }
}

/// Clones alias the allocation, so no `T: Clone` bound.
impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

impl<T: TypePath> TypePath for Shared<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["xylo_reflect::Shared<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Shared<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "Shared"
    }

    fn module_path() -> Option<&'static str> {
        Some("xylo_reflect")
    }
}

impl<T: Reflect + Typed> Typed for Shared<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Handle(HandleInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Shared<T> {
    impl_reflect_cast_fn!(Handle);
}

impl<T: Reflect + Typed> Handle for Shared<T> {
    #[inline]
    fn address(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    fn borrow_inner(&self) -> Result<Ref<'_, dyn Reflect>, BorrowError> {
        let inner = self.0.try_borrow()?;
        Ok(Ref::map(inner, |value| value as &dyn Reflect))
    }

    fn borrow_inner_mut(&self) -> Result<RefMut<'_, dyn Reflect>, BorrowMutError> {
        let inner = self.0.try_borrow_mut()?;
        Ok(RefMut::map(inner, |value| value as &mut dyn Reflect))
    }

    fn erased(&self) -> ErasedHandle {
        fn remake<T: Reflect + Typed>(rc: Rc<dyn Any>) -> Option<Box<dyn Reflect>> {
            let rc = rc.downcast::<RefCell<T>>().ok()?;
            Some(Box::new(Shared(rc)))
        }
        ErasedHandle::new(Rc::clone(&self.0) as Rc<dyn Any>, remake::<T>, T::type_path())
    }

    fn adopt(&mut self, erased: &ErasedHandle) -> Result<(), HandleError> {
        let mismatch = || HandleError {
            expected: T::type_path(),
            received: erased.inner_path(),
        };
        let handle = erased.to_reflect().ok_or_else(mismatch)?;
        match handle.take::<Self>() {
            Ok(shared) => {
                *self = shared;
                Ok(())
            }
            Err(_) => Err(mismatch()),
        }
    }
}

impl<T: Reflect + Typed + GetTypeMeta + Default> GetTypeMeta for Shared<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_factory::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_one_address() {
        let first = Shared::new(7_u32);
        let second = first.clone();
        let other = Shared::new(7_u32);

        assert_eq!(Handle::address(&first), Handle::address(&second));
        assert_ne!(Handle::address(&first), Handle::address(&other));
    }

    #[test]
    fn erased_handles_adopt_back() {
        let source = Shared::new(String::from("origin"));
        let erased = source.erased();

        let mut target: Shared<String> = Shared::default();
        target.adopt(&erased).unwrap();

        assert!(source.ptr_eq(&target));
        assert_eq!(*target.borrow(), "origin");
    }

    #[test]
    fn adopt_rejects_a_foreign_inner_type() {
        let source = Shared::new(1_u8);
        let erased = source.erased();

        let mut target: Shared<String> = Shared::default();
        let err = target.adopt(&erased).unwrap_err();

        assert_eq!(err.expected, "alloc::string::String");
        assert_eq!(err.received, "u8");
    }

    #[test]
    fn inner_borrows_respect_the_cell() {
        let shared = Shared::new(5_i32);
        let write = shared.borrow_mut();
        assert!(shared.borrow_inner().is_err());
        drop(write);
        assert!(shared.borrow_inner().is_ok());
    }
}
