//! Drive the C ABI the way a C caller would.

use std::ffi::c_void;
use std::ptr;

use dynarr_ffi::{
    da_add, da_capacity, da_create, da_destroy, da_it_create, da_it_destroy, da_it_next,
    da_len, da_resize, da_set, da_sort, DaStatus,
};
use dynarr_test_utils::{cmp_u32_ne, init_test_logging, seeded_words};

const OK: i32 = DaStatus::Success as i32;

fn ptr_of(v: &u32) -> *const c_void {
    (v as *const u32).cast()
}

#[allow(unsafe_code)]
fn drain(array: u64) -> Vec<u32> {
    let mut it = 0u64;
    assert_eq!(da_it_create(array, &mut it), OK);
    let mut out = Vec::new();
    loop {
        let p = da_it_next(it);
        if p.is_null() {
            break;
        }
        // SAFETY: p points at a live 4-byte element block.
        out.push(unsafe { p.cast::<u32>().read_unaligned() });
    }
    assert_eq!(da_it_destroy(it), OK);
    out
}

fn len_and_capacity(array: u64) -> (usize, usize) {
    let (mut len, mut capacity) = (0usize, 0usize);
    assert_eq!(da_len(array, &mut len), OK);
    assert_eq!(da_capacity(array, &mut capacity), OK);
    (len, capacity)
}

#[test]
fn append_iterate_shrink() {
    init_test_logging();
    let mut array = 0u64;
    assert_eq!(da_create(0, 4, &mut array), OK);
    for v in [0x1u32, 0x2, 0x3] {
        assert_eq!(da_add(array, ptr_of(&v)), OK);
    }
    let (len, capacity) = len_and_capacity(array);
    assert_eq!(len, 3);
    assert!(capacity >= 3);
    assert_eq!(drain(array), vec![0x1, 0x2, 0x3]);

    assert_eq!(da_resize(array, 1), OK);
    assert_eq!(len_and_capacity(array), (1, 1));
    assert_eq!(drain(array), vec![0x1]);
    assert_eq!(da_destroy(array), OK);
}

#[test]
fn indexed_write_past_capacity() {
    let mut array = 0u64;
    assert_eq!(da_create(2, 4, &mut array), OK);
    assert_eq!(da_set(array, ptr_of(&0xFEED), 5), OK);
    let (len, capacity) = len_and_capacity(array);
    assert_eq!(len, 6);
    assert!(capacity >= 8);
    let seen = drain(array);
    assert_eq!(seen.len(), 6);
    assert_eq!(seen[5], 0xFEED);
    assert_eq!(da_destroy(array), OK);
}

#[test]
fn sort_through_c_comparator() {
    let words = seeded_words(5, 200);
    let mut array = 0u64;
    assert_eq!(da_create(8, 4, &mut array), OK);
    for w in &words {
        assert_eq!(da_add(array, ptr_of(w)), OK);
    }
    assert_eq!(da_sort(array, Some(cmp_u32_ne)), OK);

    let mut expected = words.clone();
    expected.sort();
    assert_eq!(drain(array), expected);
    assert_eq!(len_and_capacity(array).0, 200);
    assert_eq!(da_destroy(array), OK);
}

#[test]
fn failed_growth_reports_failure_and_keeps_contents() {
    let mut array = 0u64;
    assert_eq!(da_create(2, 4, &mut array), OK);
    assert_eq!(da_add(array, ptr_of(&7)), OK);

    assert_eq!(da_resize(array, usize::MAX / 2), DaStatus::Failure as i32);
    assert_eq!(da_set(array, ptr_of(&1), usize::MAX), DaStatus::Failure as i32);

    assert_eq!(len_and_capacity(array), (1, 2));
    assert_eq!(drain(array), vec![7]);
    assert_eq!(da_destroy(array), OK);
}

#[test]
fn null_handles_and_pointers_are_rejected() {
    assert_eq!(
        da_create(1, 4, ptr::null_mut()),
        DaStatus::InvalidArgument as i32
    );
    let mut it = 0u64;
    assert_eq!(
        da_it_create(u64::MAX, &mut it),
        DaStatus::InvalidHandle as i32
    );
    assert!(da_it_next(u64::MAX).is_null());
    assert_eq!(da_destroy(u64::MAX), DaStatus::InvalidHandle as i32);
}
