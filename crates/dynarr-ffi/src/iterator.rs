//! Iterator FFI: create, advance, rewind, destroy.
//!
//! An iterator is a [`Cursor`] plus the handle of the array it walks. It does
//! not keep the array alive. Pointers handed out by [`da_it_next`] and
//! [`da_it_advance`] point into the array's storage and stay valid until the
//! array is next modified or destroyed.
//!
//! Lock order is `ITERATORS` then `ARRAYS`.

use std::ffi::c_void;
use std::ptr;
use std::sync::Mutex;

use dynarr_core::Cursor;

use crate::array::arrays;
use crate::handle::{HandleKind, HandleTable};
use crate::status::DaStatus;

struct IteratorState {
    array: u64,
    cursor: Cursor,
}

static ITERATORS: Mutex<HandleTable<IteratorState>> =
    Mutex::new(HandleTable::new(HandleKind::Iterator));

fn advance(it: u64) -> Result<*const c_void, DaStatus> {
    let mut iterators = ITERATORS.lock().map_err(|_| DaStatus::InternalError)?;
    let state = iterators.get_mut(it).ok_or(DaStatus::InvalidHandle)?;
    let table = arrays().lock().map_err(|_| DaStatus::InternalError)?;
    let array = table.get(state.array).ok_or(DaStatus::InvalidHandle)?;
    match state.cursor.next(array) {
        Ok(Some(block)) => Ok(block.as_ptr().cast()),
        Ok(None) => Ok(ptr::null()),
        Err(e) => Err(DaStatus::from(&e)),
    }
}

/// Create an iterator positioned before the first element of `array`.
///
/// Iterator handles are never 0 and are rejected by the array functions.
/// Returns `DA_FAILURE` if the iterator table is full.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_it_create(array: u64, it_out: *mut u64) -> i32 {
    ffi_guard!({
        if it_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        let Some(cursor) = ffi_lock!(arrays()).get(array).map(|a| a.cursor()) else {
            return DaStatus::InvalidHandle as i32;
        };
        let Some(handle) = ffi_lock!(ITERATORS).insert(IteratorState { array, cursor }) else {
            return DaStatus::Failure as i32;
        };
        // SAFETY: it_out is valid per caller contract.
        unsafe { *it_out = handle };
        DaStatus::Success as i32
    })
}

/// Return a pointer to the next element and advance.
///
/// Returns null once `len` elements have been produced. Also returns null
/// for an invalid iterator, a destroyed array, or an array shrunk below the
/// iterator's position; use [`da_it_advance`] to tell these apart.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_it_next(it: u64) -> *const c_void {
    ffi_guard_or!(ptr::null(), { advance(it).unwrap_or(ptr::null()) })
}

/// Like [`da_it_next`], but reports misuse as a status.
///
/// On `DA_SUCCESS`, writes the element pointer to `elem_out`, or null at the
/// end of the array. Returns `StaleIterator` if the array was shrunk below the
/// iterator's position and `InvalidHandle` if the iterator or its array was
/// destroyed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_it_advance(it: u64, elem_out: *mut *const c_void) -> i32 {
    ffi_guard!({
        if elem_out.is_null() {
            return DaStatus::InvalidArgument as i32;
        }
        match advance(it) {
            Ok(elem) => {
                // SAFETY: elem_out is valid per caller contract.
                unsafe { *elem_out = elem };
                DaStatus::Success as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// Move the iterator back to the first element.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_it_rewind(it: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ITERATORS).get_mut(it) {
            Some(state) => {
                state.cursor.rewind();
                DaStatus::Success as i32
            }
            None => DaStatus::InvalidHandle as i32,
        }
    })
}

/// Release an iterator. The array is unaffected.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_it_destroy(it: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ITERATORS).remove(it) {
            Some(_) => DaStatus::Success as i32,
            None => DaStatus::InvalidHandle as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{da_add, da_create, da_destroy, da_resize, da_set};

    fn array_of(values: &[u32]) -> u64 {
        let mut h = 0u64;
        assert_eq!(da_create(0, 4, &mut h), DaStatus::Success as i32);
        for v in values {
            assert_eq!(
                da_add(h, (v as *const u32).cast()),
                DaStatus::Success as i32
            );
        }
        h
    }

    fn iterator(array: u64) -> u64 {
        let mut it = 0u64;
        assert_eq!(da_it_create(array, &mut it), DaStatus::Success as i32);
        it
    }

    #[allow(unsafe_code)]
    fn read(p: *const c_void) -> u32 {
        assert!(!p.is_null());
        // SAFETY: p points at a live 4-byte element block.
        unsafe { p.cast::<u32>().read_unaligned() }
    }

    #[test]
    fn yields_len_elements_then_null() {
        let a = array_of(&[1, 2, 3]);
        let it = iterator(a);
        assert_eq!(read(da_it_next(it)), 1);
        assert_eq!(read(da_it_next(it)), 2);
        assert_eq!(read(da_it_next(it)), 3);
        assert!(da_it_next(it).is_null());
        assert!(da_it_next(it).is_null());
        da_it_destroy(it);
        da_destroy(a);
    }

    #[test]
    fn empty_array_is_exhausted_immediately() {
        let a = array_of(&[]);
        let it = iterator(a);
        assert!(da_it_next(it).is_null());
        da_it_destroy(it);
        da_destroy(a);
    }

    #[test]
    fn holes_are_zero() {
        let a = array_of(&[]);
        let v = 9u32;
        da_set(a, (&v as *const u32).cast(), 2);
        let it = iterator(a);
        assert_eq!(read(da_it_next(it)), 0);
        assert_eq!(read(da_it_next(it)), 0);
        assert_eq!(read(da_it_next(it)), 9);
        assert!(da_it_next(it).is_null());
        da_it_destroy(it);
        da_destroy(a);
    }

    #[test]
    fn shrink_after_create_is_reported() {
        let a = array_of(&[1, 2, 3, 4]);
        let it = iterator(a);
        da_it_next(it);
        da_it_next(it);
        da_it_next(it);
        assert_eq!(da_resize(a, 1), DaStatus::Success as i32);

        let mut elem = ptr::null();
        assert_eq!(
            da_it_advance(it, &mut elem),
            DaStatus::StaleIterator as i32
        );
        assert!(da_it_next(it).is_null());

        assert_eq!(da_it_rewind(it), DaStatus::Success as i32);
        assert_eq!(da_it_advance(it, &mut elem), DaStatus::Success as i32);
        assert_eq!(read(elem), 1);
        assert_eq!(da_it_advance(it, &mut elem), DaStatus::Success as i32);
        assert!(elem.is_null());
        da_it_destroy(it);
        da_destroy(a);
    }

    #[test]
    fn destroyed_array_ends_iteration() {
        let a = array_of(&[5]);
        let it = iterator(a);
        da_destroy(a);
        assert!(da_it_next(it).is_null());
        let mut elem = ptr::null();
        assert_eq!(
            da_it_advance(it, &mut elem),
            DaStatus::InvalidHandle as i32
        );
        assert_eq!(da_it_destroy(it), DaStatus::Success as i32);
    }

    #[test]
    fn destroy_twice_is_invalid_handle() {
        let a = array_of(&[5]);
        let it = iterator(a);
        assert_eq!(da_it_destroy(it), DaStatus::Success as i32);
        assert_eq!(da_it_destroy(it), DaStatus::InvalidHandle as i32);
        assert!(da_it_next(it).is_null());
        assert_eq!(da_it_rewind(it), DaStatus::InvalidHandle as i32);
        da_destroy(a);
    }

    #[test]
    fn create_rejects_bad_arguments() {
        let a = array_of(&[]);
        assert_eq!(
            da_it_create(a, ptr::null_mut()),
            DaStatus::InvalidArgument as i32
        );
        da_destroy(a);
        let mut it = 0u64;
        assert_eq!(da_it_create(a, &mut it), DaStatus::InvalidHandle as i32);
    }

    #[test]
    fn growth_between_steps_is_observed() {
        let a = array_of(&[1]);
        let it = iterator(a);
        assert_eq!(read(da_it_next(it)), 1);
        assert!(da_it_next(it).is_null());
        let v = 2u32;
        da_add(a, (&v as *const u32).cast());
        assert_eq!(read(da_it_next(it)), 2);
        da_it_destroy(it);
        da_destroy(a);
    }

    #[test]
    fn array_handle_is_not_an_iterator() {
        let a = array_of(&[1]);
        assert!(da_it_next(a).is_null());
        assert_eq!(da_it_rewind(a), DaStatus::InvalidHandle as i32);
        assert_eq!(da_it_destroy(a), DaStatus::InvalidHandle as i32);
        assert!(da_it_next(0).is_null());
        da_destroy(a);
    }
}
