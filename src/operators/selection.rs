//! Tournament parent selection over the population fitness vector.

use crate::error::{EngineError, Result};
use crate::rng::RandomNumberGenerator;

/// Default fraction of the population entering each tournament.
pub const DEFAULT_TOURNAMENT_FRACTION: f64 = 0.3;

/// A selection operator that picks parents through tournament selection.
///
/// For each parent a tournament is drawn: a fraction of the population is
/// sampled without replacement and the entrant with the lowest cost wins.
/// The two tournaments are independent, so the same individual may win both
/// and act as both parents; this is permitted.
///
/// Tournament selection balances exploration and exploitation:
/// - Smaller fractions lead to more exploration (more random selection)
/// - Larger fractions lead to more exploitation (more focus on the best individuals)
///
/// # Examples
///
/// ```
/// use qapga::operators::TournamentSelection;
/// use qapga::rng::RandomNumberGenerator;
/// use qapga::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![12.0, 7.0, 30.0, 4.0, 18.0];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = TournamentSelection::default();
///     let (parent1, parent2) = selection.select_parents(&fitness, &mut rng)?;
///
///     assert!(parent1 < fitness.len());
///     assert!(parent2 < fitness.len());
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    fraction: f64,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection operator with the specified
    /// tournament fraction.
    ///
    /// # Arguments
    ///
    /// * `fraction` - The fraction of the population sampled into each
    ///   tournament. Must lie in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `fraction` is outside `(0, 1]`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "Tournament fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        Ok(Self { fraction })
    }

    /// Selects two parent indices through two independent tournaments.
    ///
    /// # Errors
    ///
    /// Returns an error if the fitness vector is empty.
    pub fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(usize, usize)> {
        if fitness.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }

        let parent1 = self.run_tournament(fitness, rng);
        let parent2 = self.run_tournament(fitness, rng);

        Ok((parent1, parent2))
    }

    /// Runs a single tournament and returns the index of the winner: the
    /// sampled entrant with minimum fitness.
    fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let population_size = fitness.len();
        let tournament_size = ((self.fraction * population_size as f64).round() as usize)
            .clamp(1, population_size);

        let entrants = rng.sample_indices(population_size, tournament_size);

        let mut best_idx = entrants[0];
        let mut best_fitness = fitness[best_idx];

        for &idx in &entrants[1..] {
            if fitness[idx] < best_fitness {
                best_idx = idx;
                best_fitness = fitness[idx];
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_TOURNAMENT_FRACTION,
        }
    }
}
