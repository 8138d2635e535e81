//! Type-erased array of fixed-size byte blocks.
//!
//! [`ErasedArray`] is the runtime-sized counterpart of
//! [`DynArray`](crate::DynArray): the element size is declared at creation
//! and every element is an opaque block of exactly that many bytes, copied
//! in and out by value. It backs the C ABI, where element types are not
//! known to Rust. Length, growth and truncation rules are identical to the
//! typed array.

use std::cmp::Ordering;
use std::fmt;
use std::slice::ChunksExact;

use tracing::{debug, trace, warn};

use crate::config::ArrayConfig;
use crate::cursor::Cursor;
use crate::error::ArrayError;
use crate::growth;
use crate::id::ArrayId;
use crate::traits::SlotSource;

/// A growable array of `element_size`-byte blocks.
///
/// New slots are zero-filled.
pub struct ErasedArray {
    /// Backing storage, `capacity * element_size` bytes.
    data: Vec<u8>,
    element_size: usize,
    capacity: usize,
    /// Logical length in elements. Always `<= capacity`.
    len: usize,
    config: ArrayConfig,
    id: ArrayId,
}

impl ErasedArray {
    /// Create an empty array of `element_size`-byte elements with no
    /// allocated slots.
    pub fn new(element_size: usize) -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::default(), element_size)
    }

    /// Create an empty array with exactly `capacity` allocated slots.
    pub fn with_capacity(capacity: usize, element_size: usize) -> Result<Self, ArrayError> {
        Self::with_config(ArrayConfig::new(capacity), element_size)
    }

    /// Create an empty array from a full configuration.
    ///
    /// Fails with [`ArrayError::ZeroElementSize`] if `element_size` is zero,
    /// and otherwise for the same reasons as [`resize`](Self::resize).
    pub fn with_config(config: ArrayConfig, element_size: usize) -> Result<Self, ArrayError> {
        if element_size == 0 {
            return Err(ArrayError::ZeroElementSize);
        }
        let initial_capacity = config.initial_capacity;
        let mut array = Self {
            data: Vec::new(),
            element_size,
            capacity: 0,
            len: 0,
            config,
            id: ArrayId::next(),
        };
        array.resize(initial_capacity)?;
        Ok(array)
    }

    /// Reallocate to exactly `new_capacity` slots.
    ///
    /// Same contract as [`DynArray::resize`](crate::DynArray::resize).
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        let old_capacity = self.capacity;
        if new_capacity == old_capacity {
            return Ok(());
        }
        self.config
            .check_limit(new_capacity)
            .and_then(|()| growth::byte_size(new_capacity, self.element_size))
            .and_then(|bytes| {
                if new_capacity > old_capacity {
                    self.data
                        .try_reserve_exact(bytes - self.data.len())
                        .map_err(|_| ArrayError::AllocationFailed {
                            requested_bytes: bytes,
                        })?;
                    self.data.resize(bytes, 0);
                } else {
                    self.data.truncate(bytes);
                    self.data.shrink_to_fit();
                    self.len = self.len.min(new_capacity);
                }
                self.capacity = new_capacity;
                Ok(())
            })
            .inspect_err(|e| {
                warn!(array = %self.id, old_capacity, new_capacity, error = %e, "resize rejected");
            })?;
        debug!(array = %self.id, old_capacity, new_capacity, len = self.len, "resized");
        Ok(())
    }

    /// Copy `element` into slot `index`, growing the buffer if needed.
    ///
    /// `element` must be exactly [`element_size`](Self::element_size) bytes.
    /// Same growth and length rules as [`DynArray::set`](crate::DynArray::set).
    pub fn set(&mut self, index: usize, element: &[u8]) -> Result<(), ArrayError> {
        if element.len() != self.element_size {
            return Err(ArrayError::ElementSizeMismatch {
                expected: self.element_size,
                actual: element.len(),
            });
        }
        if index >= self.capacity {
            let target =
                growth::target_for_index(&self.config, self.capacity, index, self.element_size)?;
            self.resize(target)?;
        }
        let start = index * self.element_size;
        self.data[start..start + self.element_size].copy_from_slice(element);
        if index >= self.len {
            self.len = index + 1;
            trace!(array = %self.id, len = self.len, "length extended");
        }
        Ok(())
    }

    /// Append `element` one past the logical end.
    pub fn push(&mut self, element: &[u8]) -> Result<(), ArrayError> {
        self.set(self.len, element)
    }

    /// Sort the logical part of the array by comparing element blocks.
    ///
    /// Slots at or past the logical length are not touched. The sort is
    /// stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        let size = self.element_size;
        let logical = &self.data[..self.len * size];
        let block = move |i: usize| &logical[i * size..(i + 1) * size];

        let mut order: Vec<usize> = (0..self.len).collect();
        order.sort_by(|&a, &b| compare(block(a), block(b)));
        let sorted: Vec<u8> = order.iter().flat_map(|&i| block(i)).copied().collect();

        self.data[..sorted.len()].copy_from_slice(&sorted);
    }

    /// Identity of this array instance.
    pub fn id(&self) -> ArrayId {
        self.id
    }

    /// Logical length in elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Memory used by the allocated slots, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }

    /// The configuration this array was created with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// The element block at `index`, or `None` past the logical length.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len {
            return None;
        }
        let start = index * self.element_size;
        Some(&self.data[start..start + self.element_size])
    }

    /// Bytes of the logical part of the array.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len * self.element_size]
    }

    /// Borrowing iterator over the element blocks in `[0, len)`.
    pub fn iter(&self) -> ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.element_size)
    }

    /// A detached cursor at position 0, bound to this array.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.id)
    }
}

impl SlotSource for ErasedArray {
    type Slot = [u8];

    fn id(&self) -> ArrayId {
        self.id
    }

    fn len(&self) -> usize {
        self.len
    }

    fn slot(&self, index: usize) -> Option<&[u8]> {
        self.get(index)
    }
}

impl Clone for ErasedArray {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            element_size: self.element_size,
            capacity: self.capacity,
            len: self.len,
            config: self.config.clone(),
            id: ArrayId::next(),
        }
    }
}

impl fmt::Debug for ErasedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedArray")
            .field("id", &self.id)
            .field("element_size", &self.element_size)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}
