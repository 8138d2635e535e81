//! C ABI for dynarr growable arrays.
//!
//! Arrays hold fixed-width opaque element blocks and are addressed by `u64`
//! handles. Iterators are handles too. Every entry point runs behind a panic
//! guard, so a Rust panic surfaces as [`DaStatus::Panicked`] instead of
//! unwinding into C. This is the only crate in the workspace that contains
//! `unsafe` code.
//!
//! | C operation            | Entry point            |
//! |------------------------|------------------------|
//! | create                 | [`da_create`]          |
//! | destroy                | [`da_destroy`]         |
//! | resize                 | [`da_resize`]          |
//! | append                 | [`da_add`]             |
//! | indexed write          | [`da_set`]             |
//! | sort                   | [`da_sort`]            |
//! | iterator create        | [`da_it_create`]       |
//! | iterator next          | [`da_it_next`]         |
//! | iterator destroy       | [`da_it_destroy`]      |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn std::any::Any + Send)) {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());
    tracing::error!(%message, "panic caught at FFI boundary");
    LAST_PANIC.with(|slot| *slot.borrow_mut() = message);
}

/// Run `$body` (which evaluates to an `i32` status) under `catch_unwind`.
///
/// A panic is recorded for `da_last_panic_message` and reported as
/// `DaStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::DaStatus::Panicked as i32, $body)
    };
}

/// Like `ffi_guard!` for entry points that return something other than a
/// status; `$on_panic` is returned if `$body` panics.
macro_rules! ffi_guard_or {
    ($on_panic:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $on_panic
            }
        }
    };
}

/// Lock a mutex inside an `ffi_guard!` body, returning
/// `DaStatus::InternalError` from the guarded closure if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::DaStatus::InternalError as i32,
        }
    };
}

pub mod array;
mod handle;
pub mod iterator;
pub mod status;

pub use array::{
    da_add, da_capacity, da_create, da_destroy, da_element_size, da_len, da_resize, da_set,
    da_sort, DaComparator,
};
pub use iterator::{da_it_advance, da_it_create, da_it_destroy, da_it_next, da_it_rewind};
pub use status::DaStatus;

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Writes at most `cap - 1` bytes followed by a NUL terminator. Returns the
/// full message length in bytes (without terminator), or 0 if no panic has
/// been caught. Pass a null `buf` to query the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn da_last_panic_message(buf: *mut c_char, cap: usize) -> usize {
    LAST_PANIC.with(|slot| {
        let message = slot.borrow();
        let bytes = message.as_bytes();
        if !buf.is_null() && cap > 0 {
            let n = bytes.len().min(cap - 1);
            // SAFETY: buf is valid for cap bytes per caller contract, and
            // n < cap leaves room for the terminator.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        bytes.len()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guarded(fail: bool) -> i32 {
        ffi_guard!({
            if fail {
                panic!("boom at the boundary");
            }
            DaStatus::Success as i32
        })
    }

    #[test]
    fn guard_turns_panic_into_status() {
        assert_eq!(guarded(true), DaStatus::Panicked as i32);
    }

    #[test]
    #[allow(unsafe_code)]
    fn last_panic_message_round_trip() {
        assert_eq!(guarded(true), DaStatus::Panicked as i32);
        let len = da_last_panic_message(std::ptr::null_mut(), 0);
        assert_eq!(len, "boom at the boundary".len());

        let mut buf = vec![0 as c_char; len + 1];
        assert_eq!(da_last_panic_message(buf.as_mut_ptr(), buf.len()), len);
        // SAFETY: da_last_panic_message NUL-terminated the buffer.
        let text = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "boom at the boundary");
    }

    #[test]
    #[allow(unsafe_code)]
    fn short_buffer_truncates_and_terminates() {
        assert_eq!(guarded(true), DaStatus::Panicked as i32);
        let mut buf = [0x7f as c_char; 5];
        let len = da_last_panic_message(buf.as_mut_ptr(), buf.len());
        assert_eq!(len, "boom at the boundary".len());
        // SAFETY: the buffer was NUL-terminated within its 5 bytes.
        let text = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "boom");
    }

    #[test]
    fn guard_passes_status_through() {
        assert_eq!(guarded(false), DaStatus::Success as i32);
    }

    #[test]
    fn guard_or_passes_value_through() {
        let value = ffi_guard_or!(7usize, { 41 + 1 });
        assert_eq!(value, 42);
    }
}
