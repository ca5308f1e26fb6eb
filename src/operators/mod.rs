//! # Genetic Operators
//!
//! Stateless operators over populations of assignment permutations: parent
//! selection, order crossover, swap mutation, and survivor replacement. Each
//! operator is a small configured value; none of them retains references into
//! the population across generations.

pub mod crossover;
pub mod mutation;
pub mod replacement;
pub mod selection;

pub use crossover::OrderCrossover;
pub use mutation::SwapMutation;
pub use replacement::{FitnessBasedReplacement, ReplacementStrategy};
pub use selection::TournamentSelection;
