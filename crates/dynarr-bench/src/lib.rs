//! Benchmark workloads for dynarr.
//!
//! - [`append_profile`]: values pushed one at a time from an empty array
//! - [`scatter_profile`]: indexed writes at deterministic pseudo-random slots
//! - [`filled_array`]: an array of a given length, ready to sort or traverse

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr_core::{ArrayError, DynArray};

/// A sequence of `(index, value)` writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteProfile {
    /// Writes in issue order.
    pub writes: Vec<(usize, u64)>,
}

impl WriteProfile {
    /// Apply every write to a fresh array.
    pub fn apply(&self) -> Result<DynArray<u64>, ArrayError> {
        let mut array = DynArray::new();
        for &(index, value) in &self.writes {
            array.set(index, value)?;
        }
        Ok(array)
    }

    /// Highest index written, plus one.
    pub fn span(&self) -> usize {
        self.writes.iter().map(|&(i, _)| i + 1).max().unwrap_or(0)
    }
}

fn mix(seed: u64, i: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(i.wrapping_mul(1442695040888963407))
        .rotate_left(29)
}

/// `n` appends: index `i` receives a seed-derived value.
pub fn append_profile(n: usize, seed: u64) -> WriteProfile {
    WriteProfile {
        writes: (0..n).map(|i| (i, mix(seed, i as u64))).collect(),
    }
}

/// `n` writes at indices below `span`, scattered deterministically by `seed`.
pub fn scatter_profile(n: usize, span: usize, seed: u64) -> WriteProfile {
    let span = span.max(1) as u64;
    WriteProfile {
        writes: (0..n as u64)
            .map(|i| {
                let h = mix(seed, i);
                ((h % span) as usize, h)
            })
            .collect(),
    }
}

/// An array of `len` seed-derived values, in unsorted order.
pub fn filled_array(len: usize, seed: u64) -> Result<DynArray<u64>, ArrayError> {
    append_profile(len, seed).apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_profile_fills_contiguously() {
        let array = append_profile(100, 7).apply().unwrap();
        assert_eq!(array.len(), 100);
        assert_eq!(append_profile(100, 7).span(), 100);
    }

    #[test]
    fn scatter_profile_stays_in_span() {
        let profile = scatter_profile(500, 64, 3);
        assert!(profile.writes.iter().all(|&(i, _)| i < 64));
        let array = profile.apply().unwrap();
        assert_eq!(array.len(), profile.span());
        assert!(array.capacity() >= array.len());
    }

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(scatter_profile(50, 10, 42), scatter_profile(50, 10, 42));
        assert_ne!(append_profile(50, 1), append_profile(50, 2));
    }

    #[test]
    fn empty_profile_has_zero_span() {
        assert_eq!(append_profile(0, 1).span(), 0);
        assert_eq!(scatter_profile(0, 0, 1).apply().unwrap().len(), 0);
    }
}
