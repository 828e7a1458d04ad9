//! Dense forward table.
//!
//! One row of `capacity + 1` cells per item boundary. Row `i` is produced
//! from a copy of row `i + 1` updated in place with a reverse capacity sweep,
//! so each item is used at most once per pass. Rows are kept for the forward
//! replay; the last completed row also backs a timeout answer.


use crate::error::SolveError;
use crate::instance::{Instance, ProblemKind, Profit};
use crate::options::SolveOptions;
use crate::solution::Solution;
use crate::solvers::{
    all_fit_solution, replay_reachable, replay_suffix, timeout_solution, workspace_unavailable,
};
use crate::traits::Solver;
use crate::utils::{add_profit, table_cells, try_filled};

const NAME: &str = "list";

#[derive(Debug, Clone, Copy, Default)]
pub struct ListSolver;

impl Solver for ListSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        if instance.all_items_fit() {
            return all_fit_solution(instance, NAME);
        }
        match instance.kind() {
            ProblemKind::Knapsack => solve_profit(instance, options),
            ProblemKind::SubsetSum => solve_reachable(instance, options),
        }
    }
}

fn solve_profit(instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
    let n = instance.len();
    let capacity = instance.capacity();
    let width = capacity + 1;
    let mut budget = options.budget();
    let Some(mut table) = table_cells(n + 1, width).and_then(|cells| try_filled::<Profit>(cells, 0))
    else {
        return Ok(workspace_unavailable(instance, NAME));
    };
    let mut nodes = 0u64;

    for i in (0..n).rev() {
        if budget.exhausted() {
            let partial = replay_suffix(instance, i + 1, capacity, |k, c| Ok(table[k * width + c]))?;
            return timeout_solution(instance, Some(partial), nodes, NAME);
        }
        let item = instance.item(i);
        let (head, tail) = table.split_at_mut((i + 1) * width);
        let row = &mut head[i * width..];
        row.copy_from_slice(&tail[..width]);
        if item.weight <= capacity {
            for c in (item.weight..=capacity).rev() {
                let with_item = add_profit(row[c - item.weight], item.profit, NAME)?;
                if with_item > row[c] {
                    row[c] = with_item;
                }
            }
            nodes += (width - item.weight) as u64;
        }
        #[cfg(feature = "tracing")]
        if options.logs_progress() {
            tracing::debug!(algorithm = NAME, item = i, value = row[capacity], "it");
        }
    }

    let selected = replay_suffix(instance, 0, capacity, |k, c| Ok(table[k * width + c]))?;
    Solution::optimal(instance, selected, nodes, NAME)
}

fn solve_reachable(instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
    let n = instance.len();
    let capacity = instance.capacity();
    let width = capacity + 1;
    let mut budget = options.budget();
    let Some(mut table) = table_cells(n + 1, width).and_then(|cells| try_filled(cells, false))
    else {
        return Ok(workspace_unavailable(instance, NAME));
    };
    table[n * width] = true;
    let mut nodes = 0u64;

    let best_in_row = |table: &[bool], k: usize| -> usize {
        table[k * width..(k + 1) * width]
            .iter()
            .rposition(|&r| r)
            .unwrap_or(0)
    };

    for i in (0..n).rev() {
        if budget.exhausted() {
            let target = best_in_row(&table, i + 1);
            let partial = replay_reachable(instance, i + 1, target, |k, t| table[k * width + t]);
            return timeout_solution(instance, Some(partial), nodes, NAME);
        }
        let w = instance.item(i).weight;
        let (head, tail) = table.split_at_mut((i + 1) * width);
        let row = &mut head[i * width..];
        row.copy_from_slice(&tail[..width]);
        if w <= capacity {
            for c in (w..=capacity).rev() {
                row[c] |= row[c - w];
            }
            nodes += (width - w) as u64;
        }
        #[cfg(feature = "tracing")]
        if options.logs_progress() {
            tracing::debug!(algorithm = NAME, item = i, reachable = row[capacity], "it");
        }
    }

    let target = best_in_row(&table, 0);
    let selected = replay_reachable(instance, 0, target, |k, t| table[k * width + t]);
    Solution::optimal(instance, selected, nodes, NAME)
}
