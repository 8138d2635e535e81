//! C-compatible status codes.
//!
//! The two outcomes every fallible operation reports are
//! [`DaStatus::Success`] (`0`) and [`DaStatus::Failure`] (`1`, the array
//! could not grow or shrink). Misuse of the interface gets its own negative
//! code instead of undefined behaviour.

use dynarr_core::ArrayError;

/// C-compatible status code returned by the FFI functions.
///
/// Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DaStatus {
    /// Success (`DA_SUCCESS`).
    Success = 0,
    /// Allocation failed, the byte size overflowed, or the capacity limit
    /// was hit (`DA_FAILURE`). The array is unchanged.
    Failure = 1,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, zero-sized, or otherwise invalid.
    InvalidArgument = -2,
    /// The iterator's array was shrunk below the iterator's position.
    StaleIterator = -3,
    /// Internal error (poisoned lock after a prior panic).
    InternalError = -4,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArrayError> for DaStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::AllocationFailed { .. }
            | ArrayError::CapacityOverflow { .. }
            | ArrayError::CapacityExceeded { .. } => DaStatus::Failure,
            ArrayError::ZeroElementSize | ArrayError::ElementSizeMismatch { .. } => {
                DaStatus::InvalidArgument
            }
            ArrayError::ForeignCursor | ArrayError::StaleCursor { .. } => DaStatus::StaleIterator,
        }
    }
}

impl From<Result<(), ArrayError>> for DaStatus {
    fn from(result: Result<(), ArrayError>) -> Self {
        match result {
            Ok(()) => DaStatus::Success,
            Err(e) => DaStatus::from(&e),
        }
    }
}
