use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Seq;

/// Compile-time info for sequence types such as `Vec<T>` and `[T; N]`.
///
/// # Example
///
/// ```
/// use xylo_reflect::info::Typed;
///
/// let info = <Vec<u8> as Typed>::type_info().as_seq().unwrap();
/// assert!(info.item_is::<u8>());
/// assert_eq!(info.fixed_len(), None);
///
/// let info = <[u8; 4] as Typed>::type_info().as_seq().unwrap();
/// assert_eq!(info.fixed_len(), Some(4));
/// ```
#[derive(Clone, Debug)]
pub struct SeqInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on first access; a function pointer delays it.
    item_info: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
}

impl SeqInfo {
    impl_type_fn!(ty);

    /// Create a new [`SeqInfo`] for a sequence `TSeq` holding `TItem`
    /// values. `fixed_len` is `Some` for arrays, `None` for growable
    /// sequences.
    pub const fn new<TSeq, TItem>(fixed_len: Option<usize>) -> Self
    where
        TSeq: Seq + TypePath,
        TItem: Reflect + Typed,
    {
        Self {
            ty: Type::of::<TSeq>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            fixed_len,
        }
    }

    /// Returns the `TypeId` of the item type.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Check if the given type matches the item type.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the item type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the fixed length for arrays, `None` for growable sequences.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    /// Returns `true` when the sequence can change length.
    #[inline]
    pub const fn is_resizable(&self) -> bool {
        self.fixed_len.is_none()
    }
}
