//! Reusable element types and data generators.
//!
//! - [`seeded_words`] — deterministic `u32` sequences from a ChaCha8 stream.
//! - [`Record`] — a 16-byte `Copy` element with a sort key and a payload.
//! - [`cmp_u32_ne`] — a C-ABI comparator over native-endian `u32` blocks.

use std::cmp::Ordering;
use std::ffi::{c_int, c_void};

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` pseudo-random words from a ChaCha8 stream seeded with `seed`.
///
/// Same seed, same words, on every platform.
pub fn seeded_words(seed: u64, count: usize) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.next_u32()).collect()
}

/// A fixed-size element with a sort key and an insertion-order payload.
///
/// Sorting by key and then checking payloads shows whether a sort was
/// stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(C)]
pub struct Record {
    pub key: u32,
    pub payload: u32,
    pub tag: u64,
}

impl Record {
    pub fn new(key: u32, payload: u32) -> Self {
        Self {
            key,
            payload,
            tag: (u64::from(key) << 32) | u64::from(payload),
        }
    }

    /// Order by key only.
    pub fn cmp_by_key(a: &Record, b: &Record) -> Ordering {
        a.key.cmp(&b.key)
    }
}

/// C comparator over two native-endian `u32` blocks, `qsort` convention.
///
/// Returns negative, zero or positive.
///
/// # Safety
///
/// Both pointers must reference at least four readable bytes.
#[allow(unsafe_code)]
pub unsafe extern "C" fn cmp_u32_ne(a: *const c_void, b: *const c_void) -> c_int {
    // SAFETY: callers pass pointers to 4-byte element blocks; read_unaligned
    // places no alignment requirement on them.
    let (a, b) = unsafe {
        (
            (a as *const u32).read_unaligned(),
            (b as *const u32).read_unaligned(),
        )
    };
    match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_words_are_deterministic() {
        assert_eq!(seeded_words(42, 16), seeded_words(42, 16));
        assert_ne!(seeded_words(1, 16), seeded_words(2, 16));
        assert_eq!(seeded_words(9, 5).len(), 5);
    }

    #[test]
    fn record_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Record>(), 16);
    }

    #[test]
    #[allow(unsafe_code)]
    fn comparator_sign_convention() {
        let (lo, hi) = (3u32, 9u32);
        let p = |v: &u32| v as *const u32 as *const c_void;
        // SAFETY: both pointers reference live u32 values.
        unsafe {
            assert_eq!(cmp_u32_ne(p(&lo), p(&hi)), -1);
            assert_eq!(cmp_u32_ne(p(&hi), p(&lo)), 1);
            assert_eq!(cmp_u32_ne(p(&lo), p(&lo)), 0);
        }
    }
}
