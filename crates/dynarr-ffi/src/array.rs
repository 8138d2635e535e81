//! Array lifecycle FFI: create, destroy, resize, append, indexed write, sort.
//!
//! Arrays live in a global handle table. Entry points hold the table lock
//! for the whole operation, except [`da_sort`], which releases it while the
//! caller's comparator runs.

use std::ffi::{c_int, c_void};
use std::sync::Mutex;

use dynarr_core::ErasedArray;

use crate::handle::{HandleKind, HandleTable};
use crate::status::DaStatus;

static ARRAYS: Mutex<HandleTable<ErasedArray>> = Mutex::new(HandleTable::new(HandleKind::Array));

pub(crate) fn arrays() -> &'static Mutex<HandleTable<ErasedArray>> {
    &ARRAYS
}

/// C comparator: negative, zero or positive for less, equal or greater.
///
/// Each argument points at one element block of the array being sorted.
pub type DaComparator = unsafe extern "C" fn(*const c_void, *const c_void) -> c_int;

/// Copy one element block from caller memory.
///
/// The block is copied before the array is borrowed mutably, so `obj` may
/// point into the array's own storage (e.g. a pointer from [`da_it_next`]).
///
/// [`da_it_next`]: crate::iterator::da_it_next
#[allow(unsafe_code)]
fn read_block(obj: *const c_void, element_size: usize) -> Vec<u8> {
    // SAFETY: obj is non-null and valid for element_size bytes per caller
    // contract.
    unsafe { std::slice::from_raw_parts(obj.cast::<u8>(), element_size) }.to_vec()
}

/// Create an array with room for `nmemb` elements of `size` bytes each.
///
/// The new array is empty (length 0). Writes the handle to `array_out`; a
/// valid handle is never 0. Returns `DA_FAILURE` if the storage cannot be
/// allocated, its byte size overflows or the handle table is full, and
/// `InvalidArgument` for a null `array_out` or zero `size`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_create(nmemb: usize, size: usize, array_out: *mut u64) -> i32 {
    ffi_guard!({
        if array_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let array = match ErasedArray::with_capacity(nmemb, size) {
            Ok(a) => a,
            Err(e) => return DaStatus::from(&e) as i32,
        };
        let Some(handle) = ffi_lock!(ARRAYS).insert(array) else {
            return DaStatus::Failure as i32;
        };
        // SAFETY: array_out is valid per caller contract.
        unsafe { *array_out = handle };
        DaStatus::Success as i32
    })
}

/// Destroy an array and release its storage.
///
/// Iterators created on it stay allocated; advancing them reports the end.
/// Destroying an unknown or already destroyed handle returns
/// `InvalidHandle` and has no other effect.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_destroy(array: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAYS).remove(array) {
            Some(_) => DaStatus::Success as i32,
            None => DaStatus::InvalidHandle as i32,
        }
    })
}

/// Change the capacity to exactly `nmemb` elements.
///
/// Shrinking below the length discards the tail. On `DA_FAILURE` the array
/// is unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_resize(array: u64, nmemb: usize) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(ARRAYS);
        let Some(array) = table.get_mut(array) else {
            return DaStatus::InvalidHandle as i32;
        };
        DaStatus::from(array.resize(nmemb)) as i32
    })
}

/// Append a copy of the element block at `obj`, growing if needed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_add(array: u64, obj: *const c_void) -> i32 {
    ffi_guard!({
        if obj.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let mut table = ffi_lock!(ARRAYS);
        let Some(element_size) = table.get(array).map(ErasedArray::element_size) else {
            return DaStatus::InvalidHandle as i32;
        };
        let block = read_block(obj, element_size);
        match table.get_mut(array) {
            Some(array) => DaStatus::from(array.push(&block)) as i32,
            None => DaStatus::InvalidHandle as i32,
        }
    })
}

/// Write a copy of the element block at `obj` to slot `index`.
///
/// Grows capacity to `capacity + index + 1` when `index` is past the end.
/// Slots skipped over are zero-filled and count toward the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_set(array: u64, obj: *const c_void, index: usize) -> i32 {
    ffi_guard!({
        if obj.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let mut table = ffi_lock!(ARRAYS);
        let Some(element_size) = table.get(array).map(ErasedArray::element_size) else {
            return DaStatus::InvalidHandle as i32;
        };
        let block = read_block(obj, element_size);
        match table.get_mut(array) {
            Some(array) => DaStatus::from(array.set(index, &block)) as i32,
            None => DaStatus::InvalidHandle as i32,
        }
    })
}

/// Stable-sort the first `len` elements with `compar`.
///
/// The comparator runs on a private copy of the elements with no lock held,
/// so it may call any `da_*` function. If it changes the length of the array
/// being sorted, the sorted copy is discarded and `DA_FAILURE` is returned.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_sort(array: u64, compar: Option<DaComparator>) -> i32 {
    ffi_guard!({
        let Some(compar) = compar else {
            return DaStatus::InvalidArgument as i32;
        };
        let Some(mut sorted) = ffi_lock!(ARRAYS).get(array).cloned() else {
            return DaStatus::InvalidHandle as i32;
        };
        sorted.sort_by(|a, b| {
            // SAFETY: both blocks are element_size bytes inside `sorted`,
            // which outlives the call.
            let sign = unsafe { compar(a.as_ptr().cast(), b.as_ptr().cast()) };
            sign.cmp(&0)
        });

        let mut table = ffi_lock!(ARRAYS);
        let Some(target) = table.get_mut(array) else {
            return DaStatus::InvalidHandle as i32;
        };
        if target.len() != sorted.len() {
            tracing::warn!(
                expected = sorted.len(),
                actual = target.len(),
                "array length changed during sort"
            );
            return DaStatus::Failure as i32;
        }
        let written: Result<(), _> = sorted
            .iter()
            .enumerate()
            .try_for_each(|(i, block)| target.set(i, block));
        DaStatus::from(written) as i32
    })
}

/// Write the current length to `len_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_len(array: u64, len_out: *mut usize) -> i32 {
    ffi_guard!({
        if len_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let Some(len) = ffi_lock!(ARRAYS).get(array).map(ErasedArray::len) else {
            return DaStatus::InvalidHandle as i32;
        };
        // SAFETY: len_out is valid per caller contract.
        unsafe { *len_out = len };
        DaStatus::Success as i32
    })
}

/// Write the current capacity to `capacity_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_capacity(array: u64, capacity_out: *mut usize) -> i32 {
    ffi_guard!({
        if capacity_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let Some(capacity) = ffi_lock!(ARRAYS).get(array).map(ErasedArray::capacity) else {
            return DaStatus::InvalidHandle as i32;
        };
        // SAFETY: capacity_out is valid per caller contract.
        unsafe { *capacity_out = capacity };
        DaStatus::Success as i32
    })
}

/// Write the element size in bytes to `size_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_element_size(array: u64, size_out: *mut usize) -> i32 {
    ffi_guard!({
        if size_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let Some(size) = ffi_lock!(ARRAYS).get(array).map(ErasedArray::element_size) else {
            return DaStatus::InvalidHandle as i32;
        };
        // SAFETY: size_out is valid per caller contract.
        unsafe { *size_out = size };
        DaStatus::Success as i32
    })
}
