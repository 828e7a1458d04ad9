
use crate::error::SolveError;
use crate::instance::{Instance, Profit};
use crate::options::SolveOptions;
use crate::solution::Solution;
use crate::solvers::{replay_suffix, timeout_solution, workspace_unavailable};
use crate::utils::{add_profit, table_cells, try_filled};

const NAME: &str = "bellman-iterative";

/// Fill the full table bottom-up, one row per item boundary, each row read
/// only from the row below it.
pub(super) fn solve(instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
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
        let next = &tail[..width];
        for c in 0..width {
            row[c] = if item.weight <= c {
                next[c].max(add_profit(next[c - item.weight], item.profit, NAME)?)
            } else {
                next[c]
            };
        }
        nodes += width as u64;
        #[cfg(feature = "tracing")]
        if options.logs_progress() {
            tracing::debug!(algorithm = NAME, item = i, value = row[capacity], "it");
        }
    }

    let selected = replay_suffix(instance, 0, capacity, |k, c| Ok(table[k * width + c]))?;
    Solution::optimal(instance, selected, nodes, NAME)
}
