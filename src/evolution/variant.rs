//! # Evolutionary-Learning Variants
//!
//! The three variants share one generational loop and differ only in how an
//! offspring's fitness is obtained:
//!
//! - **Plain**: a single oracle call; no local search.
//! - **Baldwinian**: a hill-climb refines the offspring and its best cost
//!   becomes the fitness, but the genotype stored in the population stays the
//!   original, un-refined permutation. Learning influences selection without
//!   being inherited.
//! - **Lamarckian**: the hill-climb's best genotype is written back into the
//!   offspring, so refined traits are inherited. Refinement is gated: an
//!   offspring whose raw cost is already worse than the 21st-best member of
//!   the current population is returned unrefined, keeping the expensive
//!   climb for promising candidates only.

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::local_search::{hill_climb, LocalSearchStep};
use crate::oracle::{finite_cost, CostOracle};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Fitness rank an offspring must beat to earn Lamarckian refinement.
///
/// Clamped to the last rank for populations of 21 or fewer.
pub const REFINEMENT_RANK: usize = 20;

/// Default perturbation fraction of the Baldwinian hill-climb step.
pub const BALDWINIAN_REP_PERC: f64 = 0.05;
/// Default perturbation fraction of the Lamarckian hill-climb step.
pub const LAMARCKIAN_REP_PERC: f64 = 0.03;

/// The evolutionary-learning behavior of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Traditional GA: fitness is the raw oracle cost.
    Plain,
    /// Learning without inheritance.
    Baldwinian,
    /// Learning with inheritance, gated by population quality.
    Lamarckian,
}

impl Variant {
    /// Whether this variant requires a local-search step.
    pub fn uses_local_search(&self) -> bool {
        !matches!(self, Variant::Plain)
    }

    /// The default perturbation fraction for this variant's hill-climb step,
    /// or `None` for the plain variant.
    pub fn default_rep_perc(&self) -> Option<f64> {
        match self {
            Variant::Plain => None,
            Variant::Baldwinian => Some(BALDWINIAN_REP_PERC),
            Variant::Lamarckian => Some(LAMARCKIAN_REP_PERC),
        }
    }

    /// Evaluates an offspring, returning its fitness.
    ///
    /// Only the Lamarckian variant may modify `individual`; the others leave
    /// it untouched. `population` is the current, pre-replacement population:
    /// the Lamarckian gate reads its sorted-fitness cache as-is.
    ///
    /// # Errors
    ///
    /// Oracle failures propagate unchanged. Learning variants fail with a
    /// `Configuration` error when no local-search step was supplied.
    pub fn evaluate<C>(
        &self,
        individual: &mut Permutation,
        population: &Population,
        oracle: &C,
        local_search: Option<&dyn LocalSearchStep>,
        depth: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<f64>
    where
        C: CostOracle + ?Sized,
    {
        match self {
            Variant::Plain => finite_cost(oracle, individual),
            Variant::Baldwinian => {
                let raw = finite_cost(oracle, individual)?;
                let step = required_step(local_search)?;
                let (_best, best_cost) =
                    hill_climb(individual, raw, depth, step, oracle, rng)?;
                // Learned fitness, inherited genotype: no write-back.
                Ok(best_cost)
            }
            Variant::Lamarckian => {
                let raw = finite_cost(oracle, individual)?;

                let rank = REFINEMENT_RANK.min(population.len().saturating_sub(1));
                let threshold = population
                    .fitness_at_rank(rank)
                    .ok_or(EngineError::EmptyPopulation)?;
                if raw > threshold {
                    return Ok(raw);
                }

                let step = required_step(local_search)?;
                let (best, best_cost) =
                    hill_climb(individual, raw, depth, step, oracle, rng)?;
                *individual = best;
                Ok(best_cost)
            }
        }
    }
}

fn required_step(local_search: Option<&dyn LocalSearchStep>) -> Result<&dyn LocalSearchStep> {
    local_search.ok_or_else(|| {
        EngineError::Configuration(
            "A local-search step is required for learning variants".to_string(),
        )
    })
}
