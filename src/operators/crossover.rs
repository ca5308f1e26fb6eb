//! Order-preserving crossover for permutation genotypes.

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::rng::RandomNumberGenerator;

/// Default probability of performing a structural crossover.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.8;

/// An order crossover (OX) operator for permutations.
///
/// With probability `rate`, two offspring are produced: each keeps a
/// contiguous slice of one parent in place, and the remaining positions are
/// filled, in order, with the other parent's values, skipping values already
/// present. Offspring are valid permutations by construction. With
/// probability `1 - rate`, the offspring are exact copies of the parents.
///
/// # Examples
///
/// ```
/// use qapga::individual::Permutation;
/// use qapga::operators::OrderCrossover;
/// use qapga::rng::RandomNumberGenerator;
/// use qapga::error::Result;
///
/// fn main() -> Result<()> {
///     let parent1 = Permutation::from_vec(vec![0, 1, 2, 3, 4])?;
///     let parent2 = Permutation::from_vec(vec![4, 3, 2, 1, 0])?;
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let crossover = OrderCrossover::default();
///     let (child1, child2) = crossover.crossover(&parent1, &parent2, &mut rng)?;
///
///     assert!(child1.is_valid());
///     assert!(child2.is_valid());
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct OrderCrossover {
    rate: f64,
}

impl OrderCrossover {
    /// Creates a new OrderCrossover operator with the specified rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is outside `[0, 1]`.
    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(EngineError::Configuration(format!(
                "Crossover rate must be in [0, 1], got {}",
                rate
            )));
        }
        Ok(Self { rate })
    }

    /// Produces two offspring from two parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents have different lengths.
    pub fn crossover(
        &self,
        parent1: &Permutation,
        parent2: &Permutation,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Permutation, Permutation)> {
        if parent1.len() != parent2.len() {
            return Err(EngineError::Configuration(format!(
                "Parent lengths differ: {} vs {}",
                parent1.len(),
                parent2.len()
            )));
        }

        let n = parent1.len();
        let draw = rng
            .fetch_uniform(0.0, 1.0, 1)
            .pop_front()
            .unwrap_or(1.0);

        if n < 2 || f64::from(draw) >= self.rate {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let a = rng.random_index(n);
        let b = rng.random_index(n);
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        let child1 = Self::build_offspring(parent1, parent2, start, end);
        let child2 = Self::build_offspring(parent2, parent1, start, end);

        Ok((child1, child2))
    }

    /// Builds one offspring: the slice `[start, end]` is copied from
    /// `template`, all other positions are filled left to right with the
    /// values of `donor` in donor order, skipping values used by the slice.
    fn build_offspring(
        template: &Permutation,
        donor: &Permutation,
        start: usize,
        end: usize,
    ) -> Permutation {
        let n = template.len();
        let mut values = vec![0usize; n];
        let mut used = vec![false; n];

        for i in start..=end {
            values[i] = template[i];
            used[template[i]] = true;
        }

        let fill: Vec<usize> = donor.iter().copied().filter(|&v| !used[v]).collect();
        let mut next = 0;
        for (i, value) in values.iter_mut().enumerate() {
            if i >= start && i <= end {
                continue;
            }
            *value = fill[next];
            next += 1;
        }

        Permutation::from_vec_unchecked(values)
    }
}

impl Default for OrderCrossover {
    fn default() -> Self {
        Self {
            rate: DEFAULT_CROSSOVER_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offspring_are_valid_permutations() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let crossover = OrderCrossover::new(1.0).unwrap();

        for n in [2, 3, 8, 20] {
            for _ in 0..20 {
                let parent1 = Permutation::random(n, &mut rng);
                let parent2 = Permutation::random(n, &mut rng);

                let (child1, child2) = crossover.crossover(&parent1, &parent2, &mut rng).unwrap();

                assert!(child1.is_valid());
                assert!(child2.is_valid());
                assert_eq!(child1.len(), n);
                assert_eq!(child2.len(), n);
            }
        }
    }

    #[test]
    fn test_zero_rate_copies_parents() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let crossover = OrderCrossover::new(0.0).unwrap();

        let parent1 = Permutation::from_vec(vec![0, 1, 2, 3, 4]).unwrap();
        let parent2 = Permutation::from_vec(vec![4, 3, 2, 1, 0]).unwrap();

        let (child1, child2) = crossover.crossover(&parent1, &parent2, &mut rng).unwrap();

        assert_eq!(child1, parent1);
        assert_eq!(child2, parent2);
    }

    #[test]
    fn test_build_offspring_preserves_slice_and_donor_order() {
        let template = Permutation::from_vec(vec![0, 1, 2, 3, 4]).unwrap();
        let donor = Permutation::from_vec(vec![4, 3, 2, 1, 0]).unwrap();

        // Slice [1, 2] kept from the template; remaining positions filled in
        // donor order skipping used values 1 and 2: 4, 3, 0.
        let child = OrderCrossover::build_offspring(&template, &donor, 1, 2);
        assert_eq!(child.as_slice(), &[4, 1, 2, 3, 0]);
    }

    #[test]
    fn test_mismatched_parent_lengths() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let crossover = OrderCrossover::default();

        let parent1 = Permutation::identity(4);
        let parent2 = Permutation::identity(5);

        assert!(crossover.crossover(&parent1, &parent2, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_rate() {
        assert!(OrderCrossover::new(-0.1).is_err());
        assert!(OrderCrossover::new(1.1).is_err());
    }
}
