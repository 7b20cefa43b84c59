use alloc::boxed::Box;

use crate::Reflect;

/// A trait for optional values.
///
/// Optionals model absence: an absent value encodes as nothing at all,
/// and decoding from an absent slot resolves to [`set_none`](Opt::set_none).
///
/// # Example
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::ops::Opt;
///
/// let mut slot: Option<i32> = None;
/// let view: &mut dyn Opt = slot.reflect_mut().as_opt().unwrap();
///
/// view.set_some(5_i32.into_boxed_reflect()).unwrap();
/// assert_eq!(slot, Some(5));
/// ```
pub trait Opt: Reflect {
    /// Returns `true` when a value is present.
    fn is_some(&self) -> bool;

    /// Returns the contained value, if present.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Mutable form of [`get`](Opt::get).
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Clears the value.
    fn set_none(&mut self);

    /// Stores `value`, replacing any present value.
    ///
    /// Fails with the box handed back when `value` is not of the inner
    /// type.
    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}
