//! # Population Manager
//!
//! The [`Population`] owns the individuals of the current generation, their
//! parallel fitness vector, and a cached index ordering sorted by ascending
//! fitness. The invariant `individuals.len() == fitness.len()` holds at all
//! times; the sorted cache is rebuilt after every replacement and is stale in
//! between.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::operators::ReplacementStrategy;
use crate::oracle::{finite_cost, CostOracle};
use crate::rng::RandomNumberGenerator;

/// A fixed-size collection of individuals with their fitness and a cached
/// ascending-fitness index order.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Permutation>,
    fitness: Vec<f64>,
    sorted_by_fitness: Vec<usize>,
}

impl Population {
    /// Initializes a population of independent uniform-random permutations,
    /// evaluating each through the oracle.
    ///
    /// Fitness evaluation runs in parallel once the population size reaches
    /// `parallel_threshold`.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if `pop_size < 2` or the oracle's
    /// dimension is zero. Oracle failures propagate unchanged.
    pub fn initialize<C>(
        pop_size: usize,
        oracle: &C,
        rng: &mut RandomNumberGenerator,
        parallel_threshold: usize,
    ) -> Result<Self>
    where
        C: CostOracle,
    {
        if pop_size < 2 {
            return Err(EngineError::Configuration(format!(
                "Population size must be at least 2, got {}",
                pop_size
            )));
        }
        let n = oracle.dimension();
        if n == 0 {
            return Err(EngineError::Configuration(
                "Oracle dimension must be positive".to_string(),
            ));
        }

        let individuals: Vec<Permutation> = (0..pop_size)
            .map(|_| Permutation::random(n, rng))
            .collect();
        let fitness = evaluate_all(&individuals, oracle, parallel_threshold)?;

        tracing::debug!(pop_size, dimension = n, "population initialized");

        Ok(Self::assemble(individuals, fitness))
    }

    /// Builds a population from explicit individuals, evaluating each through
    /// the oracle. Used for seeded runs.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if fewer than two individuals are
    /// given or any individual's length disagrees with the oracle dimension.
    pub fn from_individuals<C>(individuals: Vec<Permutation>, oracle: &C) -> Result<Self>
    where
        C: CostOracle,
    {
        if individuals.len() < 2 {
            return Err(EngineError::Configuration(format!(
                "Population size must be at least 2, got {}",
                individuals.len()
            )));
        }
        let n = oracle.dimension();
        if let Some(individual) = individuals.iter().find(|ind| ind.len() != n) {
            return Err(EngineError::Configuration(format!(
                "Individual length {} doesn't match oracle dimension {}",
                individual.len(),
                n
            )));
        }

        let fitness = individuals
            .iter()
            .map(|individual| finite_cost(oracle, individual))
            .collect::<Result<Vec<f64>>>()?;

        Ok(Self::assemble(individuals, fitness))
    }

    fn assemble(individuals: Vec<Permutation>, fitness: Vec<f64>) -> Self {
        let mut population = Self {
            individuals,
            fitness,
            sorted_by_fitness: Vec::new(),
        };
        population.rebuild_sorted_index();
        population
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Permutation] {
        &self.individuals
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Returns the cached index ordering by ascending fitness.
    ///
    /// The cache is valid until the next [`replace`](Self::replace) call;
    /// offspring evaluated mid-generation observe the pre-replacement order.
    pub fn sorted_fitness(&self) -> &[usize] {
        &self.sorted_by_fitness
    }

    /// Returns the fitness of the individual at the given ascending-fitness
    /// rank (rank 0 is the best), or `None` if out of range.
    pub fn fitness_at_rank(&self, rank: usize) -> Option<f64> {
        self.sorted_by_fitness.get(rank).map(|&idx| self.fitness[idx])
    }

    /// Returns the best individual and its fitness.
    pub fn best(&self) -> Option<(&Permutation, f64)> {
        self.sorted_by_fitness
            .first()
            .map(|&idx| (&self.individuals[idx], self.fitness[idx]))
    }

    /// Replaces the population with survivors drawn from a merged pool.
    ///
    /// The strategy picks exactly `self.len()` survivor indices; the owned
    /// individual and fitness arrays are overwritten atomically and the
    /// sorted-fitness cache is rebuilt.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the pool arrays disagree in length,
    /// plus any error raised by the strategy.
    pub fn replace(
        &mut self,
        pool: Vec<Permutation>,
        pool_fitness: Vec<f64>,
        strategy: &dyn ReplacementStrategy,
    ) -> Result<()> {
        if pool.len() != pool_fitness.len() {
            return Err(EngineError::Configuration(format!(
                "Pool length ({}) doesn't match pool fitness length ({})",
                pool.len(),
                pool_fitness.len()
            )));
        }

        let survivors = strategy.select_survivors(&pool_fitness, self.len())?;

        self.individuals = survivors.iter().map(|&idx| pool[idx].clone()).collect();
        self.fitness = survivors.iter().map(|&idx| pool_fitness[idx]).collect();
        self.rebuild_sorted_index();

        Ok(())
    }

    fn rebuild_sorted_index(&mut self) {
        let mut order: Vec<usize> = (0..self.fitness.len()).collect();
        order.sort_by(|&a, &b| {
            self.fitness[a].partial_cmp(&self.fitness[b]).unwrap_or_else(|| {
                if self.fitness[a].is_nan() {
                    Ordering::Greater
                } else if self.fitness[b].is_nan() {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
        });
        self.sorted_by_fitness = order;
    }
}

/// Evaluates a batch of individuals, in parallel once the batch reaches the
/// threshold.
fn evaluate_all<C>(
    individuals: &[Permutation],
    oracle: &C,
    parallel_threshold: usize,
) -> Result<Vec<f64>>
where
    C: CostOracle,
{
    if individuals.len() >= parallel_threshold {
        individuals
            .par_iter()
            .map(|individual| finite_cost(oracle, individual))
            .collect()
    } else {
        individuals
            .iter()
            .map(|individual| finite_cost(oracle, individual))
            .collect()
    }
}
