//! # Evolution Driver
//!
//! The [`EvolutionDriver`] owns the oracle, the configured operators and the
//! population, and runs the generational loop. Each generation produces
//! `pop_size / 2` offspring pairs through selection, crossover, mutation and
//! variant-specific evaluation, merges them with the current population, and
//! hands the merged pool to the replacement strategy. The loop counts generations from 1, so
//! `run(max_gens)` executes `max_gens - 1` iterations; this bound is part of
//! the engine's observable contract.

use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::individual::Permutation;
use crate::local_search::{LocalSearchStep, SwapPerturbation};
use crate::operators::{
    FitnessBasedReplacement, OrderCrossover, ReplacementStrategy, SwapMutation,
    TournamentSelection,
};
use crate::oracle::CostOracle;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

use super::options::EvolutionOptions;
use super::variant::Variant;

/// Runs the generational loop of one evolutionary search.
///
/// ## Example
///
/// ```rust
/// use qapga::evolution::{EvolutionDriver, EvolutionOptions, Variant};
/// use qapga::oracle::QapInstance;
/// use qapga::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let instance = QapInstance::random(8, 10.0, &mut rng)?;
///
/// let options = EvolutionOptions::builder().population_size(20).build();
/// let mut driver = EvolutionDriver::new(instance, Variant::Plain, options)?;
///
/// driver.run(10, &mut rng)?;
///
/// let population = driver.population().expect("run initializes the population");
/// let (best, best_cost) = population.best().expect("population is non-empty");
/// assert!(best.is_valid());
/// assert!(best_cost >= 0.0);
/// # Ok::<(), qapga::EngineError>(())
/// ```
pub struct EvolutionDriver<C>
where
    C: CostOracle,
{
    oracle: C,
    options: EvolutionOptions,
    variant: Variant,
    selection: TournamentSelection,
    crossover: OrderCrossover,
    mutation: SwapMutation,
    replacement: Box<dyn ReplacementStrategy>,
    local_search: Option<Box<dyn LocalSearchStep>>,
    population: Option<Population>,
    generations_run: usize,
}

impl<C> EvolutionDriver<C>
where
    C: CostOracle,
{
    /// Creates a driver with the default operator stack for the variant.
    ///
    /// # Errors
    ///
    /// Fails fast with a `Configuration` error if the options are invalid or
    /// the oracle dimension is zero.
    pub fn new(oracle: C, variant: Variant, options: EvolutionOptions) -> Result<Self> {
        Self::builder(oracle).variant(variant).options(options).build()
    }

    /// Returns a builder for assembling a driver with custom strategies.
    pub fn builder(oracle: C) -> EvolutionDriverBuilder<C> {
        EvolutionDriverBuilder::new(oracle)
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The population of the last completed generation, or `None` before the
    /// first `run` or seeding call.
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// Number of generation iterations executed by the last `run` call.
    pub fn generations_run(&self) -> usize {
        self.generations_run
    }

    /// Installs an explicit starting population instead of random
    /// initialization. Fitness is computed through the oracle.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the individuals don't match the
    /// oracle dimension or fewer than two are given.
    pub fn seed_population(&mut self, individuals: Vec<Permutation>) -> Result<()> {
        self.population = Some(Population::from_individuals(individuals, &self.oracle)?);
        Ok(())
    }

    /// Runs the evolution: initializes the population (unless one was
    /// seeded), then executes generations `1..max_gens`.
    ///
    /// Note the bound: a call with `max_gens` executes `max_gens - 1`
    /// generation iterations. The final state is queryable through
    /// [`population`](Self::population) after return.
    ///
    /// # Errors
    ///
    /// Initialization and oracle failures propagate unchanged; a failure
    /// terminates the run.
    pub fn run(&mut self, max_gens: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        if self.population.is_none() {
            self.population = Some(Population::initialize(
                self.options.get_population_size(),
                &self.oracle,
                rng,
                self.options.get_parallel_threshold(),
            )?);
        }

        self.generations_run = 0;
        info!(variant = ?self.variant, max_gens, "starting evolution run");

        for generation in 1..max_gens {
            self.step_generation(rng)?;
            self.generations_run += 1;

            if let Some((_, best_cost)) = self.population.as_ref().and_then(Population::best) {
                debug!(generation, best_cost, "generation complete");
            }
        }

        Ok(())
    }

    /// Executes one generation: offspring production, merge, replacement.
    fn step_generation(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let population = self.population.as_ref().ok_or(EngineError::EmptyPopulation)?;
        let pop_size = population.len();
        let pair_count = pop_size / 2;

        let mut offspring: Vec<Permutation> = Vec::with_capacity(2 * pair_count);
        let mut offspring_fitness: Vec<f64> = Vec::with_capacity(2 * pair_count);

        for _ in 0..pair_count {
            let (parent1, parent2) = self
                .selection
                .select_parents(population.fitness(), rng)?;

            let (mut child1, mut child2) = self.crossover.crossover(
                &population.individuals()[parent1],
                &population.individuals()[parent2],
                rng,
            )?;

            self.mutation.mutate(&mut child1, rng);
            self.mutation.mutate(&mut child2, rng);

            let depth = self.options.get_local_search_depth();
            let local_search = self.local_search.as_deref();
            let fitness1 = self.variant.evaluate(
                &mut child1,
                population,
                &self.oracle,
                local_search,
                depth,
                rng,
            )?;
            let fitness2 = self.variant.evaluate(
                &mut child2,
                population,
                &self.oracle,
                local_search,
                depth,
                rng,
            )?;

            offspring.push(child1);
            offspring.push(child2);
            offspring_fitness.push(fitness1);
            offspring_fitness.push(fitness2);
        }

        // Merged pool: parents first, then offspring. An odd population size
        // drops one offspring slot through the integer division above.
        let mut pool = population.individuals().to_vec();
        pool.extend(offspring);
        let mut pool_fitness = population.fitness().to_vec();
        pool_fitness.extend(offspring_fitness);

        let population = self
            .population
            .as_mut()
            .ok_or(EngineError::EmptyPopulation)?;
        population.replace(pool, pool_fitness, self.replacement.as_ref())
    }
}

/// Builder for [`EvolutionDriver`].
///
/// The replacement strategy and the local-search step are pluggable; when not
/// supplied, fitness-based elitism and a pairwise-swap perturbation with the
/// variant's default fraction are installed.
pub struct EvolutionDriverBuilder<C>
where
    C: CostOracle,
{
    oracle: C,
    variant: Variant,
    options: Option<EvolutionOptions>,
    replacement: Option<Box<dyn ReplacementStrategy>>,
    local_search: Option<Box<dyn LocalSearchStep>>,
}

impl<C> EvolutionDriverBuilder<C>
where
    C: CostOracle,
{
    fn new(oracle: C) -> Self {
        Self {
            oracle,
            variant: Variant::Plain,
            options: None,
            replacement: None,
            local_search: None,
        }
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn replacement<R>(mut self, replacement: R) -> Self
    where
        R: ReplacementStrategy + 'static,
    {
        self.replacement = Some(Box::new(replacement));
        self
    }

    pub fn local_search<L>(mut self, local_search: L) -> Self
    where
        L: LocalSearchStep + 'static,
    {
        self.local_search = Some(Box::new(local_search));
        self
    }

    /// Builds the driver, validating the whole configuration fail-fast.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the options are invalid or the
    /// oracle dimension is zero.
    pub fn build(self) -> Result<EvolutionDriver<C>> {
        let options = self.options.unwrap_or_default();
        options.validate()?;

        if self.oracle.dimension() == 0 {
            return Err(EngineError::Configuration(
                "Oracle dimension must be positive".to_string(),
            ));
        }

        let selection = TournamentSelection::new(options.get_tournament_fraction())?;
        let crossover = OrderCrossover::new(options.get_crossover_rate())?;
        let mutation = SwapMutation::new(options.get_mutation_rate())?;
        let replacement = self
            .replacement
            .unwrap_or_else(|| Box::new(FitnessBasedReplacement));

        let local_search = match self.local_search {
            Some(step) => Some(step),
            None => match self.variant.default_rep_perc() {
                Some(rep_perc) => {
                    Some(Box::new(SwapPerturbation::new(rep_perc)?) as Box<dyn LocalSearchStep>)
                }
                None => None,
            },
        };

        Ok(EvolutionDriver {
            oracle: self.oracle,
            options,
            variant: self.variant,
            selection,
            crossover,
            mutation,
            replacement,
            local_search,
            population: None,
            generations_run: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::QapInstance;

    fn small_instance() -> QapInstance {
        let mut rng = RandomNumberGenerator::from_seed(99);
        QapInstance::random(8, 10.0, &mut rng).unwrap()
    }

    #[test]
    fn test_build_validates_options() {
        let options = EvolutionOptions::builder().population_size(1).build();
        let result = EvolutionDriver::new(small_instance(), Variant::Plain, options);
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_plain_variant_installs_no_local_search() {
        let driver =
            EvolutionDriver::new(small_instance(), Variant::Plain, EvolutionOptions::default())
                .unwrap();
        assert!(driver.local_search.is_none());
    }

    #[test]
    fn test_learning_variants_install_default_step() {
        for variant in [Variant::Baldwinian, Variant::Lamarckian] {
            let driver =
                EvolutionDriver::new(small_instance(), variant, EvolutionOptions::default())
                    .unwrap();
            assert!(driver.local_search.is_some());
        }
    }

    #[test]
    fn test_run_executes_max_gens_minus_one_generations() {
        let options = EvolutionOptions::builder().population_size(10).build();
        let mut driver =
            EvolutionDriver::new(small_instance(), Variant::Plain, options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        driver.run(5, &mut rng).unwrap();
        assert_eq!(driver.generations_run(), 4);

        driver.run(1, &mut rng).unwrap();
        assert_eq!(driver.generations_run(), 0);
    }

    #[test]
    fn test_run_initializes_population() {
        let options = EvolutionOptions::builder().population_size(6).build();
        let mut driver =
            EvolutionDriver::new(small_instance(), Variant::Plain, options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        assert!(driver.population().is_none());
        driver.run(3, &mut rng).unwrap();

        let population = driver.population().unwrap();
        assert_eq!(population.len(), 6);
        assert!(population.individuals().iter().all(|ind| ind.is_valid()));
    }
}
