//! Dynarr: growable arrays with explicit length bookkeeping and checked growth.
//!
//! This is the top-level facade crate that re-exports the public API of
//! `dynarr-core`. For most users, adding `dynarr` as a single dependency is
//! sufficient. C callers link `dynarr-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use dynarr::prelude::*;
//!
//! let mut array = DynArray::<u32>::new();
//! for v in [3, 1, 2] {
//!     array.push(v)?;
//! }
//! array.set(5, 9)?; // slots 3 and 4 are filled with the default value
//! assert_eq!(array.len(), 6);
//!
//! array.sort();
//! assert_eq!(array.as_slice(), &[0, 0, 1, 2, 3, 9]);
//!
//! // A cursor does not borrow the array between steps.
//! let mut cursor = array.cursor();
//! assert_eq!(cursor.next(&array)?, Some(&0));
//! assert_eq!(cursor.next(&array)?, Some(&0));
//! array.resize(1)?;
//! assert!(matches!(
//!     cursor.next(&array),
//!     Err(ArrayError::StaleCursor { .. })
//! ));
//! # Ok::<(), ArrayError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`array`] | `DynArray<T>` and its borrowed iterator |
//! | [`erased`] | `ErasedArray`, element size chosen at runtime |
//! | [`cursor`] | Detached, checked cursors |
//! | [`growth`] | Cushion policy and checked byte sizing |
//! | [`config`] | Initial capacity and capacity limit |
//! | [`error`] | `ArrayError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Typed arrays (`dynarr_core::array`).
pub use dynarr_core::array;

/// Arrays of opaque fixed-width byte blocks (`dynarr_core::erased`).
pub use dynarr_core::erased;

/// Detached cursors (`dynarr_core::cursor`).
///
/// [`cursor::Cursor::next`] accepts any [`prelude::SlotSource`], so one
/// cursor type serves both array kinds.
pub use dynarr_core::cursor;

/// Growth policy (`dynarr_core::growth`).
pub use dynarr_core::growth;

/// Array configuration (`dynarr_core::config`).
pub use dynarr_core::config;

/// Error types (`dynarr_core::error`).
pub use dynarr_core::error;

/// Common imports for typical dynarr usage.
///
/// ```rust
/// use dynarr::prelude::*;
/// ```
pub mod prelude {
    pub use dynarr_core::{
        ArrayConfig, ArrayError, ArrayId, Cursor, DynArray, ErasedArray, SlotSource,
    };
}
