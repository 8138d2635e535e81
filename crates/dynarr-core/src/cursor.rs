//! Detached, checked cursors over a live array.
//!
//! A [`Cursor`] does not borrow the array between steps. Each call to
//! [`Cursor::next`] re-reads the array's current length, so writes made
//! between steps are observed. The cursor records the [`ArrayId`] of the
//! array it was created for, which turns the two ways of misusing a
//! non-owning iterator into errors instead of bad reads:
//!
//! - advancing it against another array → [`ArrayError::ForeignCursor`]
//! - advancing it after the array was shrunk below its position →
//!   [`ArrayError::StaleCursor`]

use crate::error::ArrayError;
use crate::id::ArrayId;
use crate::traits::SlotSource;

/// A position into one specific array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    array: ArrayId,
    position: usize,
}

impl Cursor {
    /// Create a cursor at position 0 for the array with the given id.
    pub(crate) fn new(array: ArrayId) -> Self {
        Self { array, position: 0 }
    }

    /// The id of the array this cursor is bound to.
    pub fn array_id(&self) -> ArrayId {
        self.array
    }

    /// Index of the slot the next call will return.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Return the slot at the cursor and advance, or `Ok(None)` once the
    /// cursor has reached the array's current length.
    ///
    /// Reaching the end does not fuse the cursor: if the array grows later,
    /// the following call returns the new slots.
    pub fn next<'a, A>(&mut self, array: &'a A) -> Result<Option<&'a A::Slot>, ArrayError>
    where
        A: SlotSource + ?Sized,
    {
        if array.id() != self.array {
            return Err(ArrayError::ForeignCursor);
        }
        let len = array.len();
        if self.position > len {
            return Err(ArrayError::StaleCursor {
                position: self.position,
                len,
            });
        }
        match array.slot(self.position) {
            Some(slot) => {
                self.position += 1;
                Ok(Some(slot))
            }
            None => Ok(None),
        }
    }

    /// Move the cursor back to position 0.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}
