use alloc::boxed::Box;

use crate::Reflect;

/// A trait for key-value map access.
///
/// Iteration order follows the underlying map, so `HashMap` yields an
/// unspecified order while `BTreeMap` yields key order.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use xylo_reflect::Reflect;
/// use xylo_reflect::ops::Map;
///
/// let mut scores = BTreeMap::new();
/// scores.insert(String::from("ada"), 3_i64);
///
/// let view: &dyn Map = scores.reflect_ref().as_map().unwrap();
/// assert_eq!(view.len(), 1);
/// ```
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries as reflected key-value pairs.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Inserts a reflected key-value pair.
    ///
    /// Returns the previous value under that key, if any. Fails with both
    /// boxes handed back when either is not of the map's key or value
    /// type.
    fn try_insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)>;
}
