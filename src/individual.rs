//! # Individual Representation
//!
//! An individual is a permutation of `[0, n)` mapping facility index to
//! location index. The [`Permutation`] type owns the sequence and guards the
//! permutation invariant: length `n`, every value in `[0, n)`, no duplicates.
//!
//! ## Example
//!
//! ```rust
//! use qapga::individual::Permutation;
//! use qapga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let individual = Permutation::random(8, &mut rng);
//!
//! assert_eq!(individual.len(), 8);
//! assert!(individual.is_valid());
//! ```

use std::ops::Index;

use crate::error::{EngineError, Result};
use crate::rng::RandomNumberGenerator;

/// An assignment of facilities to locations, stored as a permutation of `[0, n)`.
///
/// Position `i` holds the location assigned to facility `i`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Generates a uniformly random permutation of `[0, n)`.
    pub fn random(n: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self(rng.random_permutation(n))
    }

    /// Returns the identity assignment: facility `i` at location `i`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Builds a permutation from an explicit value sequence, validating the
    /// permutation invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPermutation`] if any value is out of
    /// range or duplicated.
    pub fn from_vec(values: Vec<usize>) -> Result<Self> {
        let n = values.len();
        let mut seen = vec![false; n];
        for &value in &values {
            if value >= n {
                return Err(EngineError::InvalidPermutation(format!(
                    "value {} out of range for length {}",
                    value, n
                )));
            }
            if seen[value] {
                return Err(EngineError::InvalidPermutation(format!(
                    "duplicate value {}",
                    value
                )));
            }
            seen[value] = true;
        }
        Ok(Self(values))
    }

    /// Builds a permutation from values already known to satisfy the
    /// invariant. Checked in debug builds only.
    pub(crate) fn from_vec_unchecked(values: Vec<usize>) -> Self {
        let permutation = Self(values);
        debug_assert!(permutation.is_valid());
        permutation
    }

    /// Checks the permutation invariant: every value in `[0, len)` appears
    /// exactly once.
    pub fn is_valid(&self) -> bool {
        let n = self.0.len();
        let mut seen = vec![false; n];
        for &value in &self.0 {
            if value >= n || seen[value] {
                return false;
            }
            seen[value] = true;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Exchanges the locations assigned to two facilities.
    ///
    /// Swapping is the only in-place edit offered: it cannot break the
    /// permutation invariant.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, position: usize) -> &usize {
        &self.0[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_valid() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        for n in [1, 2, 7, 32] {
            let individual = Permutation::random(n, &mut rng);
            assert_eq!(individual.len(), n);
            assert!(individual.is_valid());
        }
    }

    #[test]
    fn test_identity() {
        let individual = Permutation::identity(4);
        assert_eq!(individual.as_slice(), &[0, 1, 2, 3]);
        assert!(individual.is_valid());
    }

    #[test]
    fn test_from_vec_accepts_valid_permutation() {
        let individual = Permutation::from_vec(vec![2, 0, 3, 1]).unwrap();
        assert_eq!(individual[0], 2);
        assert_eq!(individual.len(), 4);
    }

    #[test]
    fn test_from_vec_rejects_duplicates() {
        let result = Permutation::from_vec(vec![0, 1, 1, 3]);
        assert!(matches!(result, Err(EngineError::InvalidPermutation(_))));
    }

    #[test]
    fn test_from_vec_rejects_out_of_range() {
        let result = Permutation::from_vec(vec![0, 1, 4]);
        assert!(matches!(result, Err(EngineError::InvalidPermutation(_))));
    }

    #[test]
    fn test_swap_preserves_validity() {
        let mut individual = Permutation::identity(5);
        individual.swap(0, 4);
        individual.swap(1, 1);
        assert_eq!(individual.as_slice(), &[4, 1, 2, 3, 0]);
        assert!(individual.is_valid());
    }
}
