use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use core::cell::{BorrowError, BorrowMutError, Ref, RefMut};
use core::error::Error;
use core::fmt;

use crate::Reflect;

/// A trait for shared, interiorly mutable references.
///
/// Handles are how one value can appear in several places of an object
/// graph at once. Two handles are aliases exactly when their
/// [`address`](Handle::address) values are equal, and the codec uses
/// that identity to encode each shared value once and refer back to it
/// from every other occurrence.
pub trait Handle: Reflect {
    /// Returns the address of the shared allocation.
    ///
    /// Aliasing handles return equal addresses for as long as both are
    /// alive.
    fn address(&self) -> usize;

    /// Borrows the inner value for reading.
    ///
    /// Fails while a mutable borrow is outstanding.
    fn borrow_inner(&self) -> Result<Ref<'_, dyn Reflect>, BorrowError>;

    /// Borrows the inner value for writing.
    ///
    /// Fails while any other borrow is outstanding.
    fn borrow_inner_mut(&self) -> Result<RefMut<'_, dyn Reflect>, BorrowMutError>;

    /// Returns a type-erased alias of this handle.
    ///
    /// The erased form shares the same allocation, so it keeps the
    /// value alive and can later be adopted by any handle of the same
    /// inner type.
    fn erased(&self) -> ErasedHandle;

    /// Re-points this handle at the allocation behind `erased`.
    ///
    /// Fails when `erased` was taken from a handle with a different
    /// inner type.
    fn adopt(&mut self, erased: &ErasedHandle) -> Result<(), HandleError>;
}

/// A type-erased alias of a [`Handle`].
///
/// Decoding resolves back-references through these: the first
/// occurrence of a shared value registers an erased alias, and every
/// later reference adopts it.
#[derive(Clone)]
pub struct ErasedHandle {
    rc: Rc<dyn Any>,
    make: fn(Rc<dyn Any>) -> Option<Box<dyn Reflect>>,
    inner_path: &'static str,
}

impl ErasedHandle {
    /// Creates an erased handle over a shared allocation.
    ///
    /// `make` must fail on any `Rc` whose concrete type it does not
    /// expect; concrete handles rely on that check in
    /// [`Handle::adopt`].
    pub fn new(
        rc: Rc<dyn Any>,
        make: fn(Rc<dyn Any>) -> Option<Box<dyn Reflect>>,
        inner_path: &'static str,
    ) -> Self {
        Self {
            rc,
            make,
            inner_path,
        }
    }

    /// Returns the address of the shared allocation.
    ///
    /// Matches [`Handle::address`] of every alias of the same
    /// allocation.
    #[must_use]
    pub fn address(&self) -> usize {
        Rc::as_ptr(&self.rc).cast::<()>() as usize
    }

    /// Returns the type path of the value behind the handle.
    #[inline]
    #[must_use]
    pub fn inner_path(&self) -> &'static str {
        self.inner_path
    }

    /// Builds a fresh concrete handle aliasing the same allocation.
    ///
    /// Returns [`None`] when the allocation does not hold the type the
    /// handle was erased from. That only happens when an `ErasedHandle`
    /// is constructed by hand with a mismatched `make`.
    #[must_use]
    pub fn to_reflect(&self) -> Option<Box<dyn Reflect>> {
        (self.make)(Rc::clone(&self.rc))
    }
}

impl fmt::Debug for ErasedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedHandle")
            .field("inner_path", &self.inner_path)
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

// ----
// HandleError

/// The error returned when [`Handle::adopt`] receives a handle of a
/// foreign inner type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleError {
    /// Type path the adopting handle points at.
    pub expected: &'static str,
    /// Type path the erased handle points at.
    pub received: &'static str,
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot adopt a handle to `{}` into a handle to `{}`",
            self.received, self.expected
        )
    }
}

impl Error for HandleError {}
