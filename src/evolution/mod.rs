pub mod driver;
pub mod options;
pub mod variant;

pub use driver::{EvolutionDriver, EvolutionDriverBuilder};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
pub use variant::Variant;
