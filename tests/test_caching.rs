use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use qapga::{
    caching::CachedOracle,
    error::Result,
    evolution::{EvolutionDriver, EvolutionOptions, Variant},
    individual::Permutation,
    oracle::{CostOracle, QapInstance},
    rng::RandomNumberGenerator,
};

/// Wraps a QAP instance and counts how often the cost function actually runs.
#[derive(Debug)]
struct CountingInstance {
    inner: QapInstance,
    evaluations: Arc<AtomicUsize>,
}

impl CostOracle for CountingInstance {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn cost(&self, assignment: &Permutation) -> Result<f64> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.cost(assignment)
    }
}

fn counting_instance(n: usize, seed: u64) -> (CountingInstance, Arc<AtomicUsize>) {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let evaluations = Arc::new(AtomicUsize::new(0));
    let instance = CountingInstance {
        inner: QapInstance::random(n, 10.0, &mut rng).unwrap(),
        evaluations: Arc::clone(&evaluations),
    };
    (instance, evaluations)
}

#[test]
fn test_caching_preserves_the_search_trajectory() -> Result<()> {
    // The cache never touches the RNG, so a cached and an uncached run with
    // the same seed walk the exact same trajectory.
    let options = EvolutionOptions::builder().population_size(12).build();

    let (plain, _) = counting_instance(5, 99);
    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut driver = EvolutionDriver::new(plain, Variant::Plain, options.clone())?;
    driver.run(10, &mut rng)?;
    let (plain_best, plain_cost) = {
        let (best, cost) = driver.population().unwrap().best().unwrap();
        (best.clone(), cost)
    };

    let (counted, _) = counting_instance(5, 99);
    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut driver =
        EvolutionDriver::new(CachedOracle::new(counted), Variant::Plain, options)?;
    driver.run(10, &mut rng)?;
    let (cached_best, cached_cost) = driver.population().unwrap().best().unwrap();

    assert_eq!(cached_best, &plain_best);
    assert_eq!(cached_cost, plain_cost);
    Ok(())
}

#[test]
fn test_caching_cuts_oracle_traffic() -> Result<()> {
    // A 4-element problem has only 24 permutations, so a run of any length
    // revisits assignments constantly. The cache bounds the evaluation count
    // by the number of distinct permutations seen.
    let options = EvolutionOptions::builder().population_size(20).build();

    let (uncached, uncached_evals) = counting_instance(4, 7);
    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut driver = EvolutionDriver::new(uncached, Variant::Plain, options.clone())?;
    driver.run(20, &mut rng)?;

    let (counted, cached_evals) = counting_instance(4, 7);
    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut driver =
        EvolutionDriver::new(CachedOracle::new(counted), Variant::Plain, options)?;
    driver.run(20, &mut rng)?;

    assert!(cached_evals.load(Ordering::SeqCst) <= 24);
    assert!(cached_evals.load(Ordering::SeqCst) < uncached_evals.load(Ordering::SeqCst));
    Ok(())
}

#[test]
fn test_caching_with_learning_variants() -> Result<()> {
    // The hill-climb of the learning variants re-evaluates many neighboring
    // permutations; the cached driver still finishes with a valid population.
    let options = EvolutionOptions::builder().population_size(10).build();
    let (counted, evaluations) = counting_instance(6, 3);

    let mut rng = RandomNumberGenerator::from_seed(42);
    let mut driver = EvolutionDriver::new(
        CachedOracle::new(counted),
        Variant::Lamarckian,
        options,
    )?;
    driver.run(10, &mut rng)?;

    assert!(evaluations.load(Ordering::SeqCst) > 0);
    let population = driver.population().unwrap();
    assert!(population.individuals().iter().all(|ind| ind.is_valid()));
    Ok(())
}
