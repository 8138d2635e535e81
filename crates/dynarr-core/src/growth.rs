//! Growth policy and checked byte sizing.
//!
//! An out-of-bounds write at `index` grows the array to
//! `capacity + index + 1` slots: a cushion equal to the current capacity on
//! top of the room the write needs. The `+ 1` makes a write at index 0 into
//! an empty array allocate one slot.

use crate::config::ArrayConfig;
use crate::error::ArrayError;

/// Capacity to grow to so that `index` becomes writable.
///
/// Returns `None` if the sum overflows `usize`.
pub fn grown_capacity(capacity: usize, index: usize) -> Option<usize> {
    capacity.checked_add(index)?.checked_add(1)
}

/// Byte size of `count` elements of `element_size` bytes each.
///
/// Rejects products that wrap `usize` or exceed `isize::MAX`, the largest
/// allocation Rust permits.
pub fn byte_size(count: usize, element_size: usize) -> Result<usize, ArrayError> {
    count
        .checked_mul(element_size)
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(ArrayError::CapacityOverflow {
            count,
            element_size,
        })
}

/// Capacity an array must reallocate to before writing at `index`.
///
/// Applies the cushion rule, then clamps to the configured maximum when
/// `index` itself still fits under it. Limit and byte-size checks happen in
/// the resize that follows.
pub(crate) fn target_for_index(
    config: &ArrayConfig,
    capacity: usize,
    index: usize,
    element_size: usize,
) -> Result<usize, ArrayError> {
    let grown = grown_capacity(capacity, index).ok_or(ArrayError::CapacityOverflow {
        count: index,
        element_size,
    })?;
    Ok(match config.max_capacity {
        Some(limit) if grown > limit && index < limit => limit,
        _ => grown,
    })
}
