use alloc::boxed::Box;
use core::any::{Any, TypeId};

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`xylo_reflect`].
///
/// A `Reflect` value can report its [kind](ReflectKind), expose a typed
/// [view](ReflectRef) of itself, and be assigned from a boxed value of the
/// same concrete type. This is what the codec walks when encoding a value
/// into a document tree and when decoding one back.
///
/// It's strongly recommended to use
/// [the derive macro](crate::derive::Reflect) rather than implementing this
/// trait manually; the macro also implements the companion traits
/// ([`TypePath`], [`Typed`], [`Struct`], [`GetTypeMeta`]).
///
/// # Type identification
///
/// `Reflect` extends [`Any`], but note that [`Any::type_id`] called on a
/// `Box<dyn Reflect>` returns the id of the box, not of the value inside.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// use core::any::{Any, TypeId};
/// use xylo_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>()); // the box itself
/// assert!(x.ty_id() == TypeId::of::<i32>());   // the value inside
/// ```
///
/// # Views and downcasting
///
/// Use [`reflect_ref`]/[`reflect_mut`] to reach the kind-specific
/// operation traits, and `downcast_ref`/`downcast_mut`/`downcast`/`take`
/// for concrete types:
///
/// ```
/// use xylo_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = 10_i32.into_boxed_reflect();
/// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
/// assert_eq!(x.take::<i32>().ok(), Some(10));
/// ```
///
/// [`xylo_reflect`]: crate
/// [`TypePath`]: crate::info::TypePath
/// [`Typed`]: crate::info::Typed
/// [`Struct`]: crate::ops::Struct
/// [`GetTypeMeta`]: crate::registry::GetTypeMeta
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`Any::type_id`]: core::any::Any::type_id
pub trait Reflect: DynamicTypePath + DynamicTyped + Any {
    /// Casts this type to a fully-reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a fully-reflected value.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// Unlike [`Any::type_id`] this sees through boxes and references to
    /// the concrete value.
    ///
    /// [`Any::type_id`]: core::any::Any::type_id
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value.
    ///
    /// Fails with the value handed back if the concrete types differ.
    ///
    /// # Example
    ///
    /// ```
    /// use xylo_reflect::Reflect;
    ///
    /// let mut target = 0_i32;
    /// target.set(7_i32.into_boxed_reflect()).unwrap();
    /// assert_eq!(target, 7);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [kind](ReflectKind) of this type.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable kind-specific view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable kind-specific view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use xylo_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = 10_i32.into_boxed_reflect();
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            // TODO: replace with `downcast_unchecked` once it is stable.
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait
    /// object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if self.is::<T>() {
            // TODO: replace with `downcast_unchecked` once it is stable.
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { *<Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }
}

/// Formats as the kind and type path of the underlying value.
impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.reflect_kind(), self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `set`, `reflect_kind`, `reflect_ref` and `reflect_mut` for
/// kinds whose view is the value itself.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
