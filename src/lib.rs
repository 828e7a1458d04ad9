//! Exact dynamic programming for 0/1 knapsack and subset sum.
//!
//! This crate solves both problems exactly under eight interchangeable
//! algorithm variants. They differ in memory footprint and recursion depth,
//! never in the optimal value they return.
//!
//! ## Core idea
//! 1. Build an immutable [`Instance`] from already-parsed data.
//! 2. Pick an [`Algorithm`] and [`SolveOptions`] (budget, verbosity,
//!    word-ram reconstruction mode).
//! 3. Call [`solve`] (or build an [`Engine`]) to get a [`Solution`] with the
//!    optimal value, the selected items and solve statistics.
//!
//! Every exact table strategy evaluates the same suffix recurrence and
//! replays it forward, so ties between optimal subsets always resolve to the
//! lexicographically smallest set of item ids.
//!
//! ## Quick start
//! ```
//! use knapsack_dp::{solve, Algorithm, Instance, SolveOptions};
//!
//! let instance = Instance::knapsack(5, vec![(2, 3), (3, 4), (4, 5)]).unwrap();
//! let solution = solve(&instance, Algorithm::BellmanIterative, &SolveOptions::default()).unwrap();
//! assert_eq!(solution.optimal_value(), 7);
//! assert_eq!(solution.selected_items(), &[0, 1]);
//! ```
//!
//! ## Variants
//! - `list`: dense forward table with in-place reverse sweeps.
//! - `bellman-iterative`, `bellman-recursive`, `bellman-stack`,
//!   `bellman-map`: the Bellman recurrence bottom-up, by native recursion,
//!   on an owned frame stack, and on a frame stack with a hash-map memo.
//! - `word-ram`: bit-packed reachability for subset sum, O(n * C / W).
//! - `balancing`: balanced fillings around the break solution for subset
//!   sum, O(n * r) for the largest weight `r`.
//! - `primal-dual`: greedy and relaxation bounds closing the gap over a
//!   pruned Pareto state list.
//!
//! `bellman-map` and `word-ram` are the two answers to a large capacity with
//! few reachable sums: store only visited states, or store all of them one
//! bit each.
//!
//! Budgets are cooperative. A solve that runs out returns a feasible
//! solution with status [`SolveStatus::Timeout`] instead of an error.

pub mod bitset;
pub mod blocks;
pub mod bound;
pub mod budget;
pub mod builder;
pub mod engine;
pub mod error;
pub mod instance;
pub mod options;
pub mod solution;
pub mod solvers;
pub mod traits;
pub mod utils;

pub use crate::bound::{Bound, BoundEngine, GreedySolution};
pub use crate::budget::Budget;
pub use crate::builder::EngineBuilder;
pub use crate::engine::{solver_for, Engine};
pub use crate::error::{InvalidReason, SolveError};
pub use crate::instance::{Instance, Item, ItemId, ProblemKind, Profit, Weight};
pub use crate::options::{Algorithm, ParseAlgorithmError, Reconstruction, SolveOptions};
pub use crate::solution::{Solution, SolveStatus};
pub use crate::traits::Solver;

/// Solve `instance` with the given algorithm variant.
///
/// # Errors
/// Returns [`SolveError::ArithmeticOverflow`] when a profit sum leaves the
/// `i64` range.
pub fn solve(
    instance: &Instance,
    algorithm: Algorithm,
    options: &SolveOptions,
) -> Result<Solution, SolveError> {
    Engine::with_options(algorithm, options.clone()).run(instance)
}
