//! # Local Search
//!
//! This module provides the hill-climbing refinement used by the learning
//! variants. A [`LocalSearchStep`] produces exactly one neighbor proposal per
//! call; the [`hill_climb`] loop drives repeated proposals and keeps the best
//! incumbent found. Acceptance is greedy: a neighbor replaces the incumbent
//! only when its cost is strictly lower, so the returned cost never regresses
//! below the starting cost.

use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Permutation;
use crate::oracle::CostOracle;
use crate::rng::RandomNumberGenerator;

pub mod swap_perturbation;

pub use swap_perturbation::SwapPerturbation;

/// A pluggable neighbor-proposal contract.
///
/// An implementation generates a single candidate neighbor of the incumbent.
/// It performs no cost evaluation and no acceptance decision; both belong to
/// the caller.
pub trait LocalSearchStep: Debug + Send + Sync {
    /// Proposes one neighbor of the incumbent.
    fn propose(&self, incumbent: &Permutation, rng: &mut RandomNumberGenerator) -> Permutation;
}

/// Runs a bounded greedy hill-climb from a starting solution.
///
/// Performs `depth` iterations. Each iteration proposes one neighbor of the
/// current incumbent, evaluates it through the oracle, and accepts it if and
/// only if its cost is strictly lower than the incumbent's. Worse moves are
/// never accepted.
///
/// Returns the best solution found and its cost. The result's cost is always
/// less than or equal to `start_cost`.
///
/// # Errors
///
/// Oracle failures abort the climb and propagate unchanged.
pub fn hill_climb<C>(
    start: &Permutation,
    start_cost: f64,
    depth: usize,
    step: &dyn LocalSearchStep,
    oracle: &C,
    rng: &mut RandomNumberGenerator,
) -> Result<(Permutation, f64)>
where
    C: CostOracle + ?Sized,
{
    let mut best = start.clone();
    let mut best_cost = start_cost;

    for _ in 0..depth {
        let neighbor = step.propose(&best, rng);
        let neighbor_cost = oracle.cost(&neighbor)?;

        if neighbor_cost < best_cost {
            best = neighbor;
            best_cost = neighbor_cost;
        }
    }

    Ok((best, best_cost))
}
