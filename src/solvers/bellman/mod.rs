//! Bellman recurrence under four evaluation strategies.
//!
//! All strategies compute `g(i, c) = max(g(i + 1, c), g(i + 1, c - w_i) + p_i)`
//! (second term only when `w_i <= c`) with `g(n, c) = 0`, i.e. the textbook
//! prefix recurrence over reversed item numbering. They return identical
//! solutions and differ only in memory footprint and recursion depth:
//!
//! | strategy  | state storage                  | native stack |
//! |-----------|--------------------------------|--------------|
//! | iterative | full `(n + 1) x (C + 1)` table | O(1)         |
//! | recursive | dense memo                     | O(n)         |
//! | stack     | dense memo, owned frame stack  | O(1)         |
//! | map       | hash memo, owned frame stack   | O(1)         |

mod iterative;
mod map;
mod recursive;
mod stack;


use crate::budget::Budget;
use crate::error::SolveError;
use crate::instance::{Instance, Profit, Weight};
use crate::options::SolveOptions;
use crate::solution::Solution;
use crate::solvers::{all_fit_solution, replay_suffix, timeout_solution, workspace_unavailable};
use crate::traits::Solver;
use crate::utils::{table_cells, try_filled};

use map::SparseMemo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BellmanStrategy {
    /// Bottom-up, item-major then capacity-minor.
    #[default]
    Iterative,
    /// Top-down with native recursion; depth grows with the item count.
    Recursive,
    /// Top-down on an owned frame stack.
    Stack,
    /// Top-down on an owned frame stack, memoizing only visited states.
    Map,
}

impl BellmanStrategy {
    pub const ALL: [BellmanStrategy; 4] = [
        BellmanStrategy::Iterative,
        BellmanStrategy::Recursive,
        BellmanStrategy::Stack,
        BellmanStrategy::Map,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BellmanStrategy::Iterative => "bellman-iterative",
            BellmanStrategy::Recursive => "bellman-recursive",
            BellmanStrategy::Stack => "bellman-stack",
            BellmanStrategy::Map => "bellman-map",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanSolver {
    strategy: BellmanStrategy,
}

impl BellmanSolver {
    pub fn new(strategy: BellmanStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> BellmanStrategy {
        self.strategy
    }
}

impl Solver for BellmanSolver {
    fn name(&self) -> &'static str {
        self.strategy.name()
    }

    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        let name = self.strategy.name();
        if instance.all_items_fit() {
            return all_fit_solution(instance, name);
        }
        match self.strategy {
            BellmanStrategy::Iterative => iterative::solve(instance, options),
            BellmanStrategy::Recursive => {
                let Some(mut memo) = DenseMemo::new(instance) else {
                    return Ok(workspace_unavailable(instance, name));
                };
                let outcome = recursive::evaluate(instance, &mut memo, &mut options.budget(), name);
                finish_top_down(instance, options, outcome, &memo, name)
            }
            BellmanStrategy::Stack => {
                let Some(mut memo) = DenseMemo::new(instance) else {
                    return Ok(workspace_unavailable(instance, name));
                };
                let outcome = stack::evaluate(instance, &mut memo, &mut options.budget(), name);
                finish_top_down(instance, options, outcome, &memo, name)
            }
            BellmanStrategy::Map => {
                let mut memo = SparseMemo::default();
                let outcome = stack::evaluate(instance, &mut memo, &mut options.budget(), name);
                finish_top_down(instance, options, outcome, &memo, name)
            }
        }
    }
}

/// Why a top-down evaluation stopped early.
#[derive(Debug)]
pub(crate) enum Halt {
    Budget,
    Error(SolveError),
}

impl From<SolveError> for Halt {
    fn from(err: SolveError) -> Self {
        Halt::Error(err)
    }
}

/// Storage for `g(i, c)` with `i < n`; `g(n, c) = 0` is never stored.
pub(crate) trait Memo {
    fn get(&self, item: usize, capacity: Weight) -> Option<Profit>;
    fn insert(&mut self, item: usize, capacity: Weight, value: Profit);
    fn len(&self) -> usize;
}

/// `n x (C + 1)` array with a negative sentinel for unevaluated states.
pub(crate) struct DenseMemo {
    width: usize,
    cells: Vec<Profit>,
    filled: usize,
}

impl DenseMemo {
    const UNSET: Profit = -1;

    /// `None` when the array cannot be allocated.
    pub(crate) fn new(instance: &Instance) -> Option<Self> {
        let width = instance.capacity() + 1;
        let cells = try_filled(table_cells(instance.len(), width)?, Self::UNSET)?;
        Some(Self {
            width,
            cells,
            filled: 0,
        })
    }
}

impl Memo for DenseMemo {
    #[inline]
    fn get(&self, item: usize, capacity: Weight) -> Option<Profit> {
        let v = self.cells[item * self.width + capacity];
        (v != Self::UNSET).then_some(v)
    }

    #[inline]
    fn insert(&mut self, item: usize, capacity: Weight, value: Profit) {
        let cell = &mut self.cells[item * self.width + capacity];
        if *cell == Self::UNSET {
            self.filled += 1;
        }
        *cell = value;
    }

    fn len(&self) -> usize {
        self.filled
    }
}

/// Turn a top-down evaluation into a solution.
///
/// Evaluating `g(i, c)` evaluates both of its successors, so every state
/// the forward replay visits is already memoized.
fn finish_top_down<M: Memo>(
    instance: &Instance,
    options: &SolveOptions,
    outcome: Result<Profit, Halt>,
    memo: &M,
    name: &'static str,
) -> Result<Solution, SolveError> {
    let nodes = memo.len() as u64;
    #[cfg(feature = "tracing")]
    if options.logs_progress() {
        tracing::debug!(algorithm = name, states = nodes, "memo filled");
    }
    match outcome {
        Ok(_) => {
            let n = instance.len();
            let selected = replay_suffix(instance, 0, instance.capacity(), |i, c| {
                Ok(if i == n { 0 } else { memo.get(i, c).unwrap_or(0) })
            })?;
            Solution::optimal(instance, selected, nodes, name)
        }
        Err(Halt::Budget) => timeout_solution(instance, None, nodes, name),
        Err(Halt::Error(err)) => Err(err),
    }
}

/// Budget check point shared by the top-down evaluators: one per new state.
#[inline]
pub(crate) fn check(budget: &mut Budget) -> Result<(), Halt> {
    if budget.exhausted() {
        Err(Halt::Budget)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::SolveStatus;

    fn solve_all(instance: &Instance) -> Vec<Solution> {
        BellmanStrategy::ALL
            .into_iter()
            .map(|s| {
                BellmanSolver::new(s)
                    .solve(instance, &SolveOptions::default())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn strategies_agree_on_three_items() {
        let inst = Instance::knapsack(5, vec![(2, 3), (3, 4), (4, 5)]).unwrap();
        for sol in solve_all(&inst) {
            assert_eq!(sol.optimal_value(), 7);
            assert_eq!(sol.selected_items(), &[0, 1]);
        }
    }

    #[test]
    fn strategies_agree_on_selection() {
        let inst = Instance::knapsack(
            11,
            vec![(3, 4), (4, 5), (2, 3), (5, 8), (1, 1), (4, 5), (3, 4)],
        )
        .unwrap();
        let sols = solve_all(&inst);
        for sol in &sols[1..] {
            assert_eq!(sol.optimal_value(), sols[0].optimal_value());
            assert_eq!(sol.selected_items(), sols[0].selected_items());
        }
        assert!(sols[0].verify(&inst));
    }

    #[test]
    fn subset_sum_through_profit_recurrence() {
        let inst = Instance::subset_sum(10, vec![2, 3, 5, 8]).unwrap();
        for sol in solve_all(&inst) {
            assert_eq!(sol.optimal_value(), 10);
            assert_eq!(sol.selected_items(), &[0, 1, 2]);
        }
    }

    #[test]
    fn top_down_counts_visited_states_only() {
        let inst = Instance::knapsack(100, vec![(60, 1), (50, 1), (40, 1)]).unwrap();
        let dense = BellmanSolver::new(BellmanStrategy::Stack)
            .solve(&inst, &SolveOptions::default())
            .unwrap();
        let sparse = BellmanSolver::new(BellmanStrategy::Map)
            .solve(&inst, &SolveOptions::default())
            .unwrap();
        // (0,100) (1,100) (1,40) (2,100) (2,50) (2,40)
        assert_eq!(dense.nodes_explored(), 6);
        assert_eq!(sparse.nodes_explored(), 6);
        assert_eq!(dense.optimal_value(), 2);
    }

    #[test]
    fn every_strategy_times_out_cleanly() {
        let inst = Instance::knapsack(50, (1..30).map(|k| (k, k + 1))).unwrap();
        let opts = SolveOptions::new().with_step_limit(3);
        for strategy in BellmanStrategy::ALL {
            let sol = BellmanSolver::new(strategy).solve(&inst, &opts).unwrap();
            assert_eq!(sol.status(), SolveStatus::Timeout, "{}", strategy.name());
            assert!(sol.verify(&inst));
            assert!(sol.upper_bound() >= sol.optimal_value());
        }
    }

    #[test]
    fn every_strategy_reports_overflow() {
        let inst = Instance::knapsack(2, vec![(1, i64::MAX), (1, 1), (1, 1)]).unwrap();
        for strategy in BellmanStrategy::ALL {
            let err = BellmanSolver::new(strategy)
                .solve(&inst, &SolveOptions::default())
                .unwrap_err();
            assert_eq!(err, SolveError::overflow(strategy.name()));
        }
    }

    #[test]
    fn huge_capacity_needs_the_sparse_memo() {
        let cap = i64::MAX - 1;
        let inst = Instance::knapsack(cap, vec![(cap, 5), (1, 3)]).unwrap();
        for strategy in [
            BellmanStrategy::Iterative,
            BellmanStrategy::Recursive,
            BellmanStrategy::Stack,
        ] {
            let sol = BellmanSolver::new(strategy)
                .solve(&inst, &SolveOptions::default())
                .unwrap();
            assert_eq!(sol.status(), SolveStatus::Invalid, "{}", strategy.name());
        }
        let sol = BellmanSolver::new(BellmanStrategy::Map)
            .solve(&inst, &SolveOptions::default())
            .unwrap();
        assert_eq!(sol.status(), SolveStatus::Optimal);
        assert_eq!(sol.optimal_value(), 5);
        assert_eq!(sol.selected_items(), &[0]);
    }

    #[test]
    fn dense_memo_tracks_fill() {
        let inst = Instance::knapsack(3, vec![(1, 1), (2, 2)]).unwrap();
        let mut memo = DenseMemo::new(&inst).unwrap();
        assert_eq!(memo.get(0, 3), None);
        memo.insert(0, 3, 0);
        memo.insert(0, 3, 5);
        assert_eq!(memo.get(0, 3), Some(5));
        assert_eq!(memo.len(), 1);
    }
}
