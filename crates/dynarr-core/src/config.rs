//! Array configuration parameters.

/// Construction parameters for [`DynArray`](crate::DynArray) and
/// [`ErasedArray`](crate::ErasedArray).
///
/// All values are fixed for the lifetime of the array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Number of element slots allocated at creation.
    ///
    /// Default: 0 (no allocation until the first write).
    pub initial_capacity: usize,

    /// Upper bound on capacity, in elements.
    ///
    /// Growth and explicit resizes above this fail with
    /// [`ArrayError::CapacityExceeded`](crate::ArrayError::CapacityExceeded).
    /// `None` leaves only the addressable-size limit.
    pub max_capacity: Option<usize>,
}

impl ArrayConfig {
    /// Create a config with the given initial capacity and no upper bound.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }

    /// Set the maximum capacity in elements.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Whether `count` elements fit under the configured limit.
    pub(crate) fn check_limit(&self, count: usize) -> Result<(), crate::ArrayError> {
        match self.max_capacity {
            Some(limit) if count > limit => Err(crate::ArrayError::CapacityExceeded {
                requested: count,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
