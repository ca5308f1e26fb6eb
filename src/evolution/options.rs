//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of an evolution
//! run: population size, crossover and mutation rates, tournament fraction,
//! local-search depth, and the parallel-evaluation threshold.
//!
//! Validation is fail-fast: [`EvolutionOptions::validate`] rejects an invalid
//! configuration before any population state is created.
//!
//! ## Example
//!
//! ```rust
//! use qapga::evolution::options::EvolutionOptions;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(60)
//!     .crossover_rate(0.9)
//!     .mutation_rate(0.02)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```

use crate::error::{EngineError, Result};

pub const DEFAULT_POPULATION_SIZE: usize = 50;
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.8;
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;
pub const DEFAULT_TOURNAMENT_FRACTION: f64 = 0.3;
pub const DEFAULT_LOCAL_SEARCH_DEPTH: usize = 10;
/// Minimum number of individuals to evaluate in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Configuration of an evolution run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    population_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    tournament_fraction: f64,
    local_search_depth: usize,
    /// Minimum number of individuals to evaluate in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_tournament_fraction(&self) -> f64 {
        self.tournament_fraction
    }

    pub fn get_local_search_depth(&self) -> usize {
        self.local_search_depth
    }

    /// Returns the minimum number of individuals to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Checks the configuration, failing fast on the first invalid parameter.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the population size is below 2, a
    /// rate lies outside `[0, 1]`, or the tournament fraction lies outside
    /// `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(EngineError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EngineError::Configuration(format!(
                "Crossover rate must be in [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EngineError::Configuration(format!(
                "Mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(self.tournament_fraction > 0.0 && self.tournament_fraction <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "Tournament fraction must be in (0, 1], got {}",
                self.tournament_fraction
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qapga::evolution::options::EvolutionOptions;
    ///
    /// let options = EvolutionOptions::builder()
    ///     .population_size(100)
    ///     .local_search_depth(20)
    ///     .build();
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            tournament_fraction: DEFAULT_TOURNAMENT_FRACTION,
            local_search_depth: DEFAULT_LOCAL_SEARCH_DEPTH,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    tournament_fraction: Option<f64>,
    local_search_depth: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the crossover rate.
    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    /// Sets the per-position mutation rate.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the tournament fraction.
    pub fn tournament_fraction(mut self, value: f64) -> Self {
        self.tournament_fraction = Some(value);
        self
    }

    /// Sets the number of hill-climbing iterations per evaluation.
    pub fn local_search_depth(mut self, value: usize) -> Self {
        self.local_search_depth = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            crossover_rate: self.crossover_rate.unwrap_or(DEFAULT_CROSSOVER_RATE),
            mutation_rate: self.mutation_rate.unwrap_or(DEFAULT_MUTATION_RATE),
            tournament_fraction: self
                .tournament_fraction
                .unwrap_or(DEFAULT_TOURNAMENT_FRACTION),
            local_search_depth: self
                .local_search_depth
                .unwrap_or(DEFAULT_LOCAL_SEARCH_DEPTH),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}
