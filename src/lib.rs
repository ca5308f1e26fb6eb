pub mod caching;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod local_search;
pub mod operators;
pub mod oracle;
pub mod population;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{EngineError, Result};
pub use evolution::{EvolutionDriver, EvolutionOptions, Variant};
pub use individual::Permutation;
pub use local_search::{LocalSearchStep, SwapPerturbation};
pub use operators::{
    FitnessBasedReplacement, OrderCrossover, ReplacementStrategy, SwapMutation,
    TournamentSelection,
};
pub use oracle::{CostOracle, QapInstance};
pub use population::Population;
