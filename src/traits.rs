//! Capability interface shared by every solver variant.
//!
//! A solver is a zero-sized strategy value: it holds no state across calls.
//! Each [`Solver::solve`] call allocates its own workspace (table, memo,
//! frame stack, bitsets or state list), builds a [`Solution`], and drops the
//! workspace on every exit path. Independent solves may therefore run on
//! different threads against shared `&Instance` values.

use crate::error::SolveError;
use crate::instance::Instance;
use crate::options::SolveOptions;
use crate::solution::Solution;

pub trait Solver {
    /// Variant name as accepted by [`Algorithm::from_str`](crate::Algorithm).
    fn name(&self) -> &'static str;

    /// Solve `instance` exactly, or stop cooperatively when the budget in
    /// `options` runs out.
    ///
    /// # Errors
    /// Returns [`SolveError::ArithmeticOverflow`] when a profit sum leaves
    /// the safe range. Running out of budget is not an error: the returned
    /// solution has status [`Timeout`](crate::SolveStatus::Timeout).
    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError>;
}
