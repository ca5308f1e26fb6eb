//! Survivor replacement over a merged parent and offspring pool.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{EngineError, Result};

/// A pluggable survivor-selection contract.
///
/// Given the fitness of a merged pool of parents and offspring, an
/// implementation returns the indices of the `keep` individuals that survive
/// into the next generation. The returned indices must be distinct and
/// deterministic within a single call.
pub trait ReplacementStrategy: Debug + Send + Sync {
    /// Selects `keep` survivor indices from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is empty or smaller than `keep`.
    fn select_survivors(&self, fitness: &[f64], keep: usize) -> Result<Vec<usize>>;
}

/// Strict fitness-based elitism: the `keep` lowest-cost individuals survive.
///
/// Ties are broken by pool index, so the outcome is deterministic. There is
/// no diversity preservation.
///
/// # Examples
///
/// ```
/// use qapga::operators::{FitnessBasedReplacement, ReplacementStrategy};
///
/// let pool_fitness = vec![9.0, 2.0, 7.0, 2.0];
/// let survivors = FitnessBasedReplacement
///     .select_survivors(&pool_fitness, 2)
///     .unwrap();
///
/// assert_eq!(survivors, vec![1, 3]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct FitnessBasedReplacement;

impl ReplacementStrategy for FitnessBasedReplacement {
    fn select_survivors(&self, fitness: &[f64], keep: usize) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }
        if keep > fitness.len() {
            return Err(EngineError::Configuration(format!(
                "Cannot keep {} individuals from a pool of {}",
                keep,
                fitness.len()
            )));
        }

        let mut indexed_fitness: Vec<(usize, f64)> = fitness
            .iter()
            .enumerate()
            .map(|(idx, &score)| (idx, score))
            .collect();

        // Stable sort: equal-fitness entries keep their pool order, so ties
        // resolve by index.
        indexed_fitness.sort_by(|a, b| {
            a.1.partial_cmp(&b.1).unwrap_or_else(|| {
                if a.1.is_nan() {
                    Ordering::Greater
                } else if b.1.is_nan() {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
        });

        Ok(indexed_fitness
            .into_iter()
            .take(keep)
            .map(|(idx, _)| idx)
            .collect())
    }
}
