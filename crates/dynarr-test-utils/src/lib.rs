//! Test utilities for dynarr development.
//!
//! Provides deterministic data generators, a small fixed-size [`Record`]
//! element type, C-style comparators, and [`init_test_logging`] for seeing
//! the library's `tracing` output while a test runs.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{cmp_u32_ne, seeded_words, Record};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// `RUST_LOG` wins when set; otherwise the dynarr crates log at `debug` and
/// everything else is silent. Every test may call this; only the first call
/// in a process installs anything.
///
/// ```ignore
/// #[test]
/// fn growth_is_logged() {
///     dynarr_test_utils::init_test_logging();
///     // ...
/// }
/// ```
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    const DEFAULT_DIRECTIVES: &str = "dynarr_core=debug,dynarr_ffi=debug";

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
    // Err means another test in this binary got there first.
    drop(installed);
}
