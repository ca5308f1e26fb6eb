//! Swap mutation for permutation genotypes.

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::rng::RandomNumberGenerator;

/// Default per-position mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;

/// A swap mutation operator.
///
/// Each position is considered independently: with probability `rate` its
/// value is exchanged with the value at another uniformly chosen position.
/// Because the edit is a swap rather than an overwrite, the permutation
/// invariant is preserved by construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SwapMutation {
    rate: f64,
}

impl SwapMutation {
    /// Creates a new SwapMutation operator with the specified per-position rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is outside `[0, 1]`.
    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(EngineError::Configuration(format!(
                "Mutation rate must be in [0, 1], got {}",
                rate
            )));
        }
        Ok(Self { rate })
    }

    /// Mutates an individual in place.
    pub fn mutate(&self, individual: &mut Permutation, rng: &mut RandomNumberGenerator) {
        let n = individual.len();
        if n < 2 {
            return;
        }

        for position in 0..n {
            let draw = rng.fetch_uniform(0.0, 1.0, 1).pop_front().unwrap_or(1.0);
            if f64::from(draw) < self.rate {
                let other = rng.random_index(n);
                individual.swap(position, other);
            }
        }

        debug_assert!(individual.is_valid());
    }
}

impl Default for SwapMutation {
    fn default() -> Self {
        Self {
            rate: DEFAULT_MUTATION_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_preserves_validity() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let mutation = SwapMutation::new(0.5).unwrap();

        for n in [2, 5, 17] {
            for _ in 0..20 {
                let mut individual = Permutation::random(n, &mut rng);
                mutation.mutate(&mut individual, &mut rng);
                assert!(individual.is_valid());
                assert_eq!(individual.len(), n);
            }
        }
    }

    #[test]
    fn test_zero_rate_is_a_no_op() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let mutation = SwapMutation::new(0.0).unwrap();

        let mut individual = Permutation::from_vec(vec![3, 1, 0, 2]).unwrap();
        let before = individual.clone();
        mutation.mutate(&mut individual, &mut rng);

        assert_eq!(individual, before);
    }

    #[test]
    fn test_full_rate_still_yields_permutation() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let mutation = SwapMutation::new(1.0).unwrap();

        let mut individual = Permutation::identity(10);
        mutation.mutate(&mut individual, &mut rng);

        assert!(individual.is_valid());
    }

    #[test]
    fn test_single_element_is_untouched() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let mutation = SwapMutation::new(1.0).unwrap();

        let mut individual = Permutation::identity(1);
        mutation.mutate(&mut individual, &mut rng);

        assert_eq!(individual.as_slice(), &[0]);
    }

    #[test]
    fn test_invalid_rate() {
        assert!(SwapMutation::new(-0.01).is_err());
        assert!(SwapMutation::new(1.01).is_err());
    }
}
