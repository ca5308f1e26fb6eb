//! # Caching Module
//!
//! This module provides a memoizing wrapper for cost oracles. The oracle
//! contract guarantees purity (the same permutation always yields the same
//! cost), so repeated evaluations of identical assignments can be answered
//! from a cache. This pays off in the learning variants, where the local
//! search re-evaluates many closely related permutations.
//!
//! The cache is thread-local so parallel bulk evaluation never contends on a
//! shared lock.

use std::cell::RefCell;
use std::collections::HashMap;

use thread_local::ThreadLocal;

use crate::error::Result;
use crate::individual::Permutation;
use crate::oracle::CostOracle;

/// A wrapper around a cost oracle that caches evaluations per thread.
///
/// ## Example
///
/// ```rust
/// use qapga::caching::CachedOracle;
/// use qapga::individual::Permutation;
/// use qapga::oracle::{CostOracle, QapInstance};
///
/// let instance = QapInstance::new(
///     vec![vec![0.0, 1.0], vec![1.0, 0.0]],
///     vec![vec![0.0, 4.0], vec![4.0, 0.0]],
/// )?;
/// let oracle = CachedOracle::new(instance);
///
/// let assignment = Permutation::identity(2);
/// let first = oracle.cost(&assignment)?;
/// let second = oracle.cost(&assignment)?; // served from the cache
/// assert_eq!(first, second);
/// # Ok::<(), qapga::EngineError>(())
/// ```
#[derive(Debug)]
pub struct CachedOracle<C>
where
    C: CostOracle,
{
    /// The wrapped oracle
    oracle: C,
    /// Per-thread cache of cost evaluations
    cache: ThreadLocal<RefCell<HashMap<Permutation, f64>>>,
}

impl<C> CachedOracle<C>
where
    C: CostOracle,
{
    /// Creates a new cached oracle wrapping the given oracle.
    pub fn new(oracle: C) -> Self {
        Self {
            oracle,
            cache: ThreadLocal::new(),
        }
    }

    /// Returns a reference to the wrapped oracle.
    pub fn inner(&self) -> &C {
        &self.oracle
    }

    /// Returns the number of cached evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache
            .get()
            .map_or(0, |cell| cell.borrow().len())
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        if let Some(cell) = self.cache.get() {
            cell.borrow_mut().clear();
        }
    }
}

impl<C> CostOracle for CachedOracle<C>
where
    C: CostOracle,
{
    fn dimension(&self) -> usize {
        self.oracle.dimension()
    }

    fn cost(&self, assignment: &Permutation) -> Result<f64> {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));

        if let Some(&cached) = cell.borrow().get(assignment) {
            return Ok(cached);
        }

        // Only successful evaluations are cached; errors propagate untouched.
        let cost = self.oracle.cost(assignment)?;
        cell.borrow_mut().insert(assignment.clone(), cost);

        Ok(cost)
    }
}
