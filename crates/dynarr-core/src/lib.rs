//! Growable arrays with explicit length bookkeeping and checked growth.
//!
//! An array tracks two sizes: its **capacity** (slots allocated) and its
//! **length** (one past the highest index ever written). Writing past the
//! capacity grows the buffer with a cushion equal to the current capacity;
//! an explicit resize can shrink it, truncating the length. Every size
//! computation is checked, so an impossible request fails cleanly and the
//! array is left as it was.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T>     typed, T: Copy + Default
//! ErasedArray     element size chosen at runtime, opaque byte blocks
//!   │
//!   ├── growth    cushion policy + checked byte sizing (shared)
//!   ├── Iter      borrowed iterator (DynArray); ChunksExact (ErasedArray)
//!   └── Cursor    detached position, checked against array id and length
//! ```
//!
//! # Example
//!
//! ```
//! use dynarr_core::DynArray;
//!
//! let mut array = DynArray::<u32>::with_capacity(2)?;
//! array.set(5, 42)?;
//! assert_eq!(array.capacity(), 8);
//! assert_eq!(array.len(), 6);
//!
//! array.resize(1)?;
//! assert_eq!(array.len(), 1);
//! # Ok::<(), dynarr_core::ArrayError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod erased;
pub mod error;
pub mod growth;
pub mod id;
pub mod traits;

// Public re-exports for the primary API surface.
pub use array::{DynArray, Iter};
pub use config::ArrayConfig;
pub use cursor::Cursor;
pub use erased::ErasedArray;
pub use error::ArrayError;
pub use id::ArrayId;
pub use traits::SlotSource;
