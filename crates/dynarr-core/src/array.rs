//! The typed growable array and its borrowed iterator.
//!
//! A [`DynArray`] separates physical capacity (allocated slots) from logical
//! length (one past the highest index ever written). Writes past the capacity
//! grow the buffer by the cushion policy in [`crate::growth`]; explicit
//! [`DynArray::resize`] calls may also shrink it, truncating the length.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::config::ArrayConfig;
use crate::cursor::Cursor;
use crate::error::ArrayError;
use crate::growth;
use crate::id::ArrayId;
use crate::traits::SlotSource;

/// A growable array of `T` with explicit length bookkeeping.
///
/// Every allocated slot holds a valid `T`: growth fills new slots with
/// `T::default()`. Slots between the logical length and the capacity, and
/// holes skipped over by [`set`](Self::set), therefore read as the default
/// value rather than uninitialised memory.
pub struct DynArray<T> {
    /// Backing storage. `data.len()` is the capacity.
    data: Vec<T>,
    /// Logical length. Always `<= data.len()`.
    len: usize,
    config: ArrayConfig,
    id: ArrayId,
}

impl<T: Copy + Default> DynArray<T> {
    /// Create an empty array with no allocated slots.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            config: ArrayConfig::default(),
            id: ArrayId::next(),
        }
    }

    /// Create an empty array with exactly `capacity` allocated slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::new(capacity))
    }

    /// Create an empty array from a full configuration.
    ///
    /// Fails if the initial capacity is above the configured maximum, if its
    /// byte size overflows, or if the allocation fails.
    pub fn with_config(config: ArrayConfig) -> Result<Self, ArrayError> {
        let initial_capacity = config.initial_capacity;
        let mut array = Self {
            data: Vec::new(),
            len: 0,
            config,
            id: ArrayId::next(),
        };
        array.resize(initial_capacity)?;
        Ok(array)
    }

    /// Create an array holding a copy of `values`, with capacity equal to
    /// their count.
    pub fn from_slice(values: &[T]) -> Result<Self, ArrayError> {
        let mut array = Self::with_capacity(values.len())?;
        array.data.copy_from_slice(values);
        array.len = values.len();
        Ok(array)
    }

    /// Reallocate to exactly `new_capacity` slots.
    ///
    /// Contents up to `min(old, new)` capacity are preserved. Shrinking below
    /// the logical length truncates the length to `new_capacity`. On error
    /// the array is unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        let old_capacity = self.data.len();
        if new_capacity == old_capacity {
            return Ok(());
        }
        self.config
            .check_limit(new_capacity)
            .and_then(|()| growth::byte_size(new_capacity, size_of::<T>()))
            .and_then(|bytes| {
                if new_capacity > old_capacity {
                    self.data
                        .try_reserve_exact(new_capacity - old_capacity)
                        .map_err(|_| ArrayError::AllocationFailed {
                            requested_bytes: bytes,
                        })?;
                    self.data.resize(new_capacity, T::default());
                } else {
                    self.data.truncate(new_capacity);
                    self.data.shrink_to_fit();
                    self.len = self.len.min(new_capacity);
                }
                Ok(())
            })
            .inspect_err(|e| {
                warn!(array = %self.id, old_capacity, new_capacity, error = %e, "resize rejected");
            })?;
        debug!(array = %self.id, old_capacity, new_capacity, len = self.len, "resized");
        Ok(())
    }

    /// Write `value` at `index`, growing the buffer if `index` is beyond the
    /// capacity.
    ///
    /// Growth targets `capacity + index + 1` slots, clamped to the configured
    /// maximum when `index` itself still fits under it. Writing at or past
    /// the logical length extends it to `index + 1`; writing below it is a
    /// plain overwrite.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        if index >= self.data.len() {
            let target =
                growth::target_for_index(&self.config, self.data.len(), index, size_of::<T>())?;
            self.resize(target)?;
        }
        self.data[index] = value;
        if index >= self.len {
            self.len = index + 1;
            trace!(array = %self.id, len = self.len, "length extended");
        }
        Ok(())
    }

    /// Append `value` one past the logical end. Equivalent to
    /// `set(self.len(), value)`.
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        self.set(self.len, value)
    }

    /// Sort the logical part of the array with a caller-supplied ordering.
    ///
    /// Slots at or past the logical length are not touched. The sort is
    /// stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.data[..self.len].sort_by(compare);
    }

    /// Sort the logical part of the array by `T`'s natural order.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }
}

impl<T> DynArray<T> {
    /// Identity of this array instance.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// Logical length: one past the highest written index.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet (or everything was truncated).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        size_of::<T>()
    }

    /// Memory used by the allocated slots, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * size_of::<T>()
    }

    /// The configuration this array was created with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// The element at `index`, or `None` past the logical length.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// The logical part of the array, `[0, len)`.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// Borrowing iterator over `[0, len)`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            array: self,
            position: 0,
        }
    }

    /// A detached cursor at position 0, bound to this array.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.id)
    }
}

impl<T> SlotSource for DynArray<T> {
    type Slot = T;

    fn id(&self) -> ArrayId {
        self.id
    }

    fn len(&self) -> usize {
        self.len
    }

    fn slot(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T: Copy + Default> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            len: self.len,
            config: self.config.clone(),
            id: ArrayId::next(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("id", &self.id)
            .field("len", &self.len)
            .field("capacity", &self.data.len())
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing forward iterator over a [`DynArray`].
///
/// Holds the array by shared reference, so the array cannot change while the
/// iterator is alive. Once it returns `None` it keeps returning `None`.
pub struct Iter<'a, T> {
    array: &'a DynArray<T>,
    position: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.array.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
