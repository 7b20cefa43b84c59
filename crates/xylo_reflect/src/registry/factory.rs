use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;

/// Manufactures blank values of one type.
///
/// Decoding is fill-in-place: it starts from a blank value and assigns
/// into it. For statically typed slots the blank already exists; for
/// slots resolved through the registry, the registered `Factory`
/// produces it.
///
/// # Example
///
/// ```
/// use xylo_reflect::registry::Factory;
///
/// let factory = Factory::of::<String>();
/// let blank = factory.make();
/// assert_eq!(blank.take::<String>().unwrap(), "");
/// ```
#[derive(Clone)]
pub struct Factory {
    func: fn() -> Box<dyn Reflect>,
}

impl Factory {
    /// Creates a factory from a bare function.
    #[inline]
    pub const fn new(func: fn() -> Box<dyn Reflect>) -> Self {
        Self { func }
    }

    /// Creates a factory producing `T::default()`.
    #[inline]
    pub fn of<T: Reflect + Default>() -> Self {
        Self::new(|| Box::<T>::default())
    }

    /// Produces one blank value.
    ///
    /// The factory carries no type flag, but the function inside is type
    /// specific.
    #[inline(always)]
    pub fn make(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory").finish_non_exhaustive()
    }
}
