//! Read access shared by the typed and erased arrays.

use crate::id::ArrayId;

/// Positional read access to the logical part of an array.
///
/// Implemented by [`DynArray`](crate::DynArray) (slots are `T`) and
/// [`ErasedArray`](crate::ErasedArray) (slots are `[u8]` blocks of the
/// element size). [`Cursor`](crate::Cursor) traverses anything implementing
/// this trait.
pub trait SlotSource {
    /// What one slot reads as.
    type Slot: ?Sized;

    /// Identity of this array instance.
    fn id(&self) -> ArrayId;

    /// Logical length: one past the highest written index.
    fn len(&self) -> usize;

    /// Whether the logical length is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slot at `index`, or `None` if `index >= len()`.
    fn slot(&self, index: usize) -> Option<&Self::Slot>;
}
