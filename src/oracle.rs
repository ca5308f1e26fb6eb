//! # Cost Oracle
//!
//! The [`CostOracle`] trait is the seam between the search engine and the
//! problem being solved: given an assignment permutation it returns a scalar
//! cost, lower is better. Implementations must be pure (the same permutation
//! always yields the same cost) and must accept any valid permutation of
//! their dimension.
//!
//! [`QapInstance`] is the concrete oracle for the quadratic assignment
//! problem, built from in-memory flow and distance matrices.

use crate::error::{EngineError, Result};
use crate::individual::Permutation;

/// A pure cost function over assignment permutations.
///
/// Oracle failures are propagated unchanged to the caller; the engine never
/// retries or swallows them.
pub trait CostOracle: Send + Sync {
    /// The problem dimension `n`: the length of every permutation this oracle
    /// accepts.
    fn dimension(&self) -> usize;

    /// Evaluates the cost of an assignment. Lower is better.
    fn cost(&self, assignment: &Permutation) -> Result<f64>;
}

/// Evaluates an assignment and rejects non-finite costs.
pub(crate) fn finite_cost<C>(oracle: &C, assignment: &Permutation) -> Result<f64>
where
    C: CostOracle + ?Sized,
{
    let cost = oracle.cost(assignment)?;
    if !cost.is_finite() {
        return Err(EngineError::FitnessCalculation(format!(
            "non-finite cost encountered: {}",
            cost
        )));
    }
    Ok(cost)
}

/// A quadratic assignment problem instance.
///
/// Holds an `n x n` flow matrix between facilities and an `n x n` distance
/// matrix between locations. The cost of an assignment `p` is the
/// flow-weighted distance summed over all facility pairs:
///
/// ```text
/// cost(p) = sum over i, j of flow[i][j] * distance[p[i]][p[j]]
/// ```
#[derive(Debug, Clone)]
pub struct QapInstance {
    flow: Vec<Vec<f64>>,
    distance: Vec<Vec<f64>>,
}

impl QapInstance {
    /// Creates an instance from flow and distance matrices.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if either matrix is empty, not
    /// square, or the two dimensions disagree.
    pub fn new(flow: Vec<Vec<f64>>, distance: Vec<Vec<f64>>) -> Result<Self> {
        let n = flow.len();
        if n == 0 {
            return Err(EngineError::Configuration(
                "Flow matrix must not be empty".to_string(),
            ));
        }
        if distance.len() != n {
            return Err(EngineError::Configuration(format!(
                "Flow dimension ({}) doesn't match distance dimension ({})",
                n,
                distance.len()
            )));
        }
        if let Some(row) = flow.iter().find(|row| row.len() != n) {
            return Err(EngineError::Configuration(format!(
                "Flow matrix is not square: row of length {} in a {}-dimensional instance",
                row.len(),
                n
            )));
        }
        if let Some(row) = distance.iter().find(|row| row.len() != n) {
            return Err(EngineError::Configuration(format!(
                "Distance matrix is not square: row of length {} in a {}-dimensional instance",
                row.len(),
                n
            )));
        }
        Ok(Self { flow, distance })
    }

    /// Generates a random instance with flow and distance entries drawn
    /// uniformly from `[0, max_weight)`. Diagonals are zero.
    ///
    /// Useful for tests and benchmarks.
    pub fn random(n: usize, max_weight: f64, rng: &mut crate::rng::RandomNumberGenerator) -> Result<Self> {
        if n == 0 {
            return Err(EngineError::Configuration(
                "Instance dimension must be positive".to_string(),
            ));
        }
        let matrix = |rng: &mut crate::rng::RandomNumberGenerator| -> Vec<Vec<f64>> {
            (0..n)
                .map(|i| {
                    (0..n)
                        .map(|j| {
                            if i == j {
                                0.0
                            } else {
                                f64::from(
                                    *rng.fetch_uniform(0.0, max_weight as f32, 1)
                                        .front()
                                        .unwrap_or(&0.0),
                                )
                            }
                        })
                        .collect()
                })
                .collect()
        };
        let flow = matrix(rng);
        let distance = matrix(rng);
        Self::new(flow, distance)
    }
}

impl CostOracle for QapInstance {
    fn dimension(&self) -> usize {
        self.flow.len()
    }

    fn cost(&self, assignment: &Permutation) -> Result<f64> {
        let n = self.dimension();
        if assignment.len() != n {
            return Err(EngineError::InvalidPermutation(format!(
                "assignment length {} doesn't match instance dimension {}",
                assignment.len(),
                n
            )));
        }
        debug_assert!(assignment.is_valid());

        let mut total = 0.0;
        for i in 0..n {
            let location_i = assignment[i];
            for j in 0..n {
                total += self.flow[i][j] * self.distance[location_i][assignment[j]];
            }
        }
        Ok(total)
    }
}
