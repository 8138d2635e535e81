//! Per-instance array identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArrayId`] allocation.
static ARRAY_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an array.
///
/// Allocated from a monotonic atomic counter via [`ArrayId::next`]. Two
/// distinct arrays never share an id, even when one is dropped and the next
/// is allocated at the same address. Cursors record the id of the array they
/// were created for so that use against another array is detectable.
///
/// Cloning an array allocates a fresh id: the clone is a different container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrayId(u64);

impl ArrayId {
    /// Allocate a fresh, unique id. Thread-safe.
    pub fn next() -> Self {
        Self(ARRAY_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = ArrayId::next();
        let b = ArrayId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
