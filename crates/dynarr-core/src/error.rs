//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array and cursor operations.
///
/// Every fallible operation leaves the array exactly as it was before the
/// call when it returns one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The allocator could not provide the requested storage.
    AllocationFailed {
        /// Total size in bytes of the buffer that was requested.
        requested_bytes: usize,
    },
    /// `count * element_size` does not fit in the addressable range
    /// (wraps `usize` or exceeds `isize::MAX` bytes).
    CapacityOverflow {
        /// Number of elements requested.
        count: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },
    /// The request is larger than the array's configured maximum capacity.
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Configured limit in elements.
        limit: usize,
    },
    /// An erased array was created with an element size of zero.
    ZeroElementSize,
    /// An erased write supplied a block of the wrong width.
    ElementSizeMismatch {
        /// The array's element size in bytes.
        expected: usize,
        /// Width of the supplied block in bytes.
        actual: usize,
    },
    /// A cursor was advanced against an array other than the one it was
    /// created for.
    ForeignCursor,
    /// The array was shrunk below the cursor's position.
    StaleCursor {
        /// The cursor's position.
        position: usize,
        /// The array's current length.
        len: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
            Self::CapacityOverflow {
                count,
                element_size,
            } => {
                write!(
                    f,
                    "capacity overflow: {count} elements of {element_size} bytes"
                )
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, limit {limit}"
                )
            }
            Self::ZeroElementSize => write!(f, "element size must be non-zero"),
            Self::ElementSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "element size mismatch: expected {expected} bytes, got {actual}"
                )
            }
            Self::ForeignCursor => write!(f, "cursor belongs to a different array"),
            Self::StaleCursor { position, len } => {
                write!(f, "stale cursor: position {position} past length {len}")
            }
        }
    }
}

impl Error for ArrayError {}
