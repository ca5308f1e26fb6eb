//! # Error Types
//!
//! This module defines the error type used throughout the engine. It provides
//! specific error variants for the failure scenarios that may occur while
//! configuring or running an evolution.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use qapga::error::{EngineError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or running the engine.
///
/// This enum provides specific error variants for the different failure
/// scenarios of the evolutionary process.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when a sequence is not a valid permutation of `[0, n)`.
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    /// Error raised by a cost oracle implementation.
    #[error("Oracle error: {0}")]
    Oracle(String),
}

/// A specialized Result type for engine operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `EngineError`.
///
/// ## Examples
///
/// ```rust
/// use qapga::error::{EngineError, Result};
///
/// fn may_fail() -> Result<i32> {
///     // Some operation that might fail
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, EngineError>;
