use alloc::boxed::Box;
use core::{error, fmt};

use crate::Reflect;

// -----------------------------------------------------------------------------
// Seq

/// A trait for sequence access, covering both growable sequences
/// (`Vec<T>`) and fixed-size arrays (`[T; N]`).
///
/// Decoding fills a sequence in two shapes: [`prepare`](Seq::prepare) plus
/// [`item_mut`](Seq::item_mut) when blank items can be manufactured, or
/// repeated [`push`](Seq::push) when items are only known once decoded.
pub trait Seq: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`, if in bounds.
    fn item(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable form of [`item`](Seq::item).
    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Resets the sequence to `len` blank items produced by `make_blank`.
    ///
    /// Growable sequences take any length. Arrays accept `len` up to their
    /// capacity and reset every slot, so slots past `len` stay blank.
    fn prepare(
        &mut self,
        len: usize,
        make_blank: &mut dyn FnMut() -> Box<dyn Reflect>,
    ) -> Result<(), SeqPrepareError>;

    /// Appends `item` to the end of the sequence.
    ///
    /// Fails for fixed-size sequences, and when `item` is not of the item
    /// type.
    fn push(&mut self, item: Box<dyn Reflect>) -> Result<(), SeqPushError>;
}

// -----------------------------------------------------------------------------
// Errors

/// Error returned by [`Seq::prepare`].
#[derive(Debug)]
pub enum SeqPrepareError {
    /// The requested length exceeds a fixed capacity.
    Capacity { capacity: usize, requested: usize },
    /// A manufactured blank was not of the item type.
    ItemType,
}

impl fmt::Display for SeqPrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity {
                capacity,
                requested,
            } => write!(
                f,
                "requested {requested} items in a sequence of fixed capacity {capacity}"
            ),
            Self::ItemType => f.write_str("blank value does not match the item type"),
        }
    }
}

impl error::Error for SeqPrepareError {}

/// Error returned by [`Seq::push`].
#[derive(Debug)]
pub enum SeqPushError {
    /// The sequence has a fixed length.
    Fixed,
    /// The pushed value was not of the item type.
    ItemType,
}

impl fmt::Display for SeqPushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.write_str("cannot push into a fixed-size sequence"),
            Self::ItemType => f.write_str("pushed value does not match the item type"),
        }
    }
}

impl error::Error for SeqPushError {}
