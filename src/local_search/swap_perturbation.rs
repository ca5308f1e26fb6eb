//! Random pairwise-swap neighbor generation.

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::rng::RandomNumberGenerator;

use super::LocalSearchStep;

/// A neighbor generator that reassigns a small fraction of positions.
///
/// A proposal samples roughly `rep_perc * n` distinct positions and exchanges
/// their values pairwise, so the neighbor differs from the incumbent in that
/// many positions while remaining a valid permutation. The perturbed subset
/// is redrawn uniformly on every call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SwapPerturbation {
    rep_perc: f64,
}

impl SwapPerturbation {
    /// Creates a new SwapPerturbation step.
    ///
    /// # Arguments
    ///
    /// * `rep_perc` - The fraction of positions to perturb per proposal.
    ///   Must lie in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rep_perc` is outside `(0, 1]`.
    pub fn new(rep_perc: f64) -> Result<Self> {
        if !(rep_perc > 0.0 && rep_perc <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "Perturbation fraction must be in (0, 1], got {}",
                rep_perc
            )));
        }
        Ok(Self { rep_perc })
    }

    /// Number of positions to perturb for a genotype of length `n`: at least
    /// one swap, always an even count so positions pair up.
    fn perturbation_count(&self, n: usize) -> usize {
        let mut count = ((self.rep_perc * n as f64).round() as usize).clamp(2, n);
        if count % 2 == 1 {
            count -= 1;
        }
        count
    }
}

impl LocalSearchStep for SwapPerturbation {
    fn propose(&self, incumbent: &Permutation, rng: &mut RandomNumberGenerator) -> Permutation {
        let n = incumbent.len();
        let mut neighbor = incumbent.clone();
        if n < 2 {
            return neighbor;
        }

        let count = self.perturbation_count(n);
        let positions = rng.sample_indices(n, count);
        for pair in positions.chunks_exact(2) {
            neighbor.swap(pair[0], pair[1]);
        }

        debug_assert!(neighbor.is_valid());
        neighbor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_is_a_valid_permutation() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let step = SwapPerturbation::new(0.3).unwrap();

        for n in [2, 5, 40] {
            let incumbent = Permutation::random(n, &mut rng);
            let neighbor = step.propose(&incumbent, &mut rng);

            assert!(neighbor.is_valid());
            assert_eq!(neighbor.len(), n);
        }
    }

    #[test]
    fn test_proposal_differs_from_incumbent() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let step = SwapPerturbation::new(0.1).unwrap();

        let incumbent = Permutation::identity(50);
        let neighbor = step.propose(&incumbent, &mut rng);

        let changed = incumbent
            .iter()
            .zip(neighbor.iter())
            .filter(|(a, b)| a != b)
            .count();

        // round(0.1 * 50) = 4 positions swapped pairwise.
        assert_eq!(changed, 4);
    }

    #[test]
    fn test_small_fraction_still_perturbs() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        let step = SwapPerturbation::new(0.03).unwrap();

        // round(0.03 * 10) = 0, clamped up to a single swap.
        let incumbent = Permutation::identity(10);
        let neighbor = step.propose(&incumbent, &mut rng);

        let changed = incumbent
            .iter()
            .zip(neighbor.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_single_element_incumbent() {
        let mut rng = RandomNumberGenerator::from_seed(7);
        let step = SwapPerturbation::new(0.5).unwrap();

        let incumbent = Permutation::identity(1);
        let neighbor = step.propose(&incumbent, &mut rng);

        assert_eq!(neighbor, incumbent);
    }

    #[test]
    fn test_invalid_fraction() {
        assert!(SwapPerturbation::new(0.0).is_err());
        assert!(SwapPerturbation::new(1.5).is_err());
    }
}
