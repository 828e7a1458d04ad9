//! Variant dispatch.
//!
//! An [`Engine`] pairs an [`Algorithm`] with [`SolveOptions`] and runs the
//! matching [`Solver`] inside a `solve` tracing span when the `tracing`
//! feature is on. The engine itself is
//! immutable, so one engine can serve many instances, from many threads.

use crate::error::SolveError;
use crate::instance::Instance;
use crate::options::{Algorithm, SolveOptions};
use crate::solution::Solution;
use crate::solvers::{
    BalancingSolver, BellmanSolver, BellmanStrategy, ListSolver, PrimalDualSolver, WordRamSolver,
};
use crate::traits::Solver;

/// Configured solver front end.
///
/// Typical usage:
/// ```
/// use knapsack_dp::{Algorithm, Engine, Instance};
///
/// let instance = Instance::knapsack(5, vec![(2, 3), (3, 4), (4, 5)]).unwrap();
/// let solution = Engine::new(Algorithm::BellmanStack).run(&instance).unwrap();
/// assert_eq!(solution.optimal_value(), 7);
/// assert_eq!(solution.selected_items(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    algorithm: Algorithm,
    options: SolveOptions,
}

impl Engine {
    /// Create an engine with default options (no budget, silent).
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_options(algorithm, SolveOptions::default())
    }

    pub fn with_options(algorithm: Algorithm, options: SolveOptions) -> Self {
        Self { algorithm, options }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// The stateless solver behind this engine's algorithm.
    pub fn solver(&self) -> Box<dyn Solver + Send + Sync> {
        solver_for(self.algorithm)
    }

    /// Solve one instance.
    ///
    /// # Errors
    /// Propagates [`SolveError::ArithmeticOverflow`] from the solver.
    pub fn run(&self, instance: &Instance) -> Result<Solution, SolveError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "solve",
            algorithm = self.algorithm.as_str(),
            kind = instance.kind().as_str(),
            items = instance.len(),
            capacity = instance.capacity()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let result = self.solver().solve(instance, &self.options);
        #[cfg(feature = "tracing")]
        if self.options.logs_summary() {
            match &result {
                Ok(solution) => tracing::info!(
                    status = solution.status().as_str(),
                    value = solution.optimal_value(),
                    upper = solution.upper_bound(),
                    selected = solution.selected_items().len(),
                    nodes = solution.nodes_explored(),
                    "solved"
                ),
                Err(err) => tracing::warn!(code = err.code(), "{}", err),
            }
        }
        result
    }
}

/// Map an algorithm to its solver. Solvers are zero-sized, so boxing them
/// does not allocate.
pub fn solver_for(algorithm: Algorithm) -> Box<dyn Solver + Send + Sync> {
    match algorithm {
        Algorithm::List => Box::new(ListSolver),
        Algorithm::BellmanIterative => Box::new(BellmanSolver::new(BellmanStrategy::Iterative)),
        Algorithm::BellmanRecursive => Box::new(BellmanSolver::new(BellmanStrategy::Recursive)),
        Algorithm::BellmanStack => Box::new(BellmanSolver::new(BellmanStrategy::Stack)),
        Algorithm::BellmanMap => Box::new(BellmanSolver::new(BellmanStrategy::Map)),
        Algorithm::WordRam => Box::new(WordRamSolver),
        Algorithm::Balancing => Box::new(BalancingSolver),
        Algorithm::PrimalDual => Box::new(PrimalDualSolver),
    }
}
