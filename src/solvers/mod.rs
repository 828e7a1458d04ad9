//! Solver variants and the helpers they share.
//!
//! Every exact table strategy evaluates the suffix recurrence
//! `g(i, c)` = best value over items `i..n` with capacity `c`, then replays
//! it forward from item 0. The replay takes item `i` whenever taking it is
//! still optimal and stops as soon as the remaining value is 0, which picks
//! the lexicographically smallest optimal index set. All exact strategies
//! therefore agree on the selection, not just on the value.

pub mod balancing;
pub mod bellman;
pub mod list;
pub mod primal_dual;
pub mod word_ram;

pub use balancing::BalancingSolver;
pub use bellman::{BellmanSolver, BellmanStrategy};
pub use list::ListSolver;
pub use primal_dual::PrimalDualSolver;
pub use word_ram::WordRamSolver;

use crate::bound::{clamp_bound, Bound, BoundEngine};
use crate::error::SolveError;
use crate::instance::{Instance, ItemId, Profit, Weight};
use crate::solution::{Solution, SolveStatus};

/// Answer for an instance whose items all fit at once.
///
/// Selects items `0..=k` where `k` is the last item contributing to the
/// objective, which is what the forward replay picks on such an instance.
pub(crate) fn all_fit_solution(
    instance: &Instance,
    context: &'static str,
) -> Result<Solution, SolveError> {
    let last = instance.items().iter().rposition(|it| it.profit > 0);
    let selected = match last {
        Some(k) => (0..=k).collect(),
        None => Vec::new(),
    };
    Solution::optimal(instance, selected, 0, context)
}

/// Answer for an instance whose dense workspace cannot be allocated.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn workspace_unavailable(instance: &Instance, context: &'static str) -> Solution {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        algorithm = context,
        items = instance.len(),
        capacity = instance.capacity(),
        "dense workspace not addressable"
    );
    Solution::invalid(instance)
}

/// Best feasible answer available when the budget ran out: the better of a
/// partial selection (if the solver has one) and the greedy lower bound,
/// reported with the Dantzig upper bound.
pub(crate) fn timeout_solution(
    instance: &Instance,
    partial: Option<Vec<ItemId>>,
    nodes_explored: u64,
    context: &'static str,
) -> Result<Solution, SolveError> {
    let bounds = BoundEngine::new(instance);
    let greedy = bounds.greedy();
    let selected = match partial {
        Some(items) if selection_profit(instance, &items) > greedy.profit => items,
        _ => greedy.items,
    };
    Solution::from_items(
        instance,
        SolveStatus::Timeout,
        selected,
        Some(clamp_bound(bounds.dantzig_upper_bound())),
        nodes_explored,
        context,
    )
}

fn selection_profit(instance: &Instance, items: &[ItemId]) -> Bound {
    items
        .iter()
        .map(|&id| instance.item(id).profit as Bound)
        .sum()
}

/// Forward replay of the suffix profit recurrence over items `from..n`.
///
/// `value(i, c)` must return `g(i, c)` for any state the replay visits.
pub(crate) fn replay_suffix<F>(
    instance: &Instance,
    from: usize,
    capacity: Weight,
    mut value: F,
) -> Result<Vec<ItemId>, SolveError>
where
    F: FnMut(usize, Weight) -> Result<Profit, SolveError>,
{
    let mut selected = Vec::new();
    let mut target = value(from, capacity)?;
    let mut residual = capacity;
    for i in from..instance.len() {
        if target == 0 {
            break;
        }
        let item = instance.item(i);
        if item.weight > residual {
            continue;
        }
        let rest = value(i + 1, residual - item.weight)?;
        if rest.checked_add(item.profit) == Some(target) {
            selected.push(i);
            residual -= item.weight;
            target = rest;
        }
    }
    Ok(selected)
}

/// Forward replay of suffix reachability: finds the lexicographically
/// smallest index set from `from..n` whose weights sum to `target`.
///
/// `reachable(i, t)` must report whether `t` is a subset sum of items
/// `i..n`, and `reachable(from, target)` must hold.
pub(crate) fn replay_reachable<F>(
    instance: &Instance,
    from: usize,
    target: Weight,
    mut reachable: F,
) -> Vec<ItemId>
where
    F: FnMut(usize, Weight) -> bool,
{
    let mut selected = Vec::new();
    let mut remaining = target;
    for i in from..instance.len() {
        if remaining == 0 {
            break;
        }
        let w = instance.item(i).weight;
        if w <= remaining && reachable(i + 1, remaining - w) {
            selected.push(i);
            remaining -= w;
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_suffix(instance: &Instance, i: usize, c: Weight) -> Profit {
        if i == instance.len() {
            return 0;
        }
        let item = instance.item(i);
        let skip = brute_suffix(instance, i + 1, c);
        if item.weight <= c {
            skip.max(item.profit + brute_suffix(instance, i + 1, c - item.weight))
        } else {
            skip
        }
    }

    #[test]
    fn all_fit_selects_through_last_profitable_item() {
        let inst = Instance::knapsack(100, vec![(1, 0), (2, 5), (3, 0), (4, 2), (5, 0)]).unwrap();
        let sol = all_fit_solution(&inst, "test").unwrap();
        assert_eq!(sol.selected_items(), &[0, 1, 2, 3]);
        assert_eq!(sol.optimal_value(), 7);
        assert!(sol.status().is_optimal());
    }

    #[test]
    fn all_fit_with_no_profit_selects_nothing() {
        let inst = Instance::knapsack(10, vec![(1, 0), (2, 0)]).unwrap();
        let sol = all_fit_solution(&inst, "test").unwrap();
        assert!(sol.selected_items().is_empty());
    }

    #[test]
    fn replay_prefers_lower_indices() {
        // {0, 1} and {2} both reach 7
        let inst = Instance::knapsack(5, vec![(2, 3), (3, 4), (5, 7)]).unwrap();
        let picked = replay_suffix(&inst, 0, 5, |i, c| Ok(brute_suffix(&inst, i, c))).unwrap();
        assert_eq!(picked, vec![0, 1]);
    }

    #[test]
    fn replay_reachable_finds_exact_sum() {
        let inst = Instance::subset_sum(10, vec![2, 3, 5, 8]).unwrap();
        let reach = |i: usize, t: Weight| brute_suffix(&inst, i, t) == t as Profit;
        // 2 + 3 + 5 precedes 2 + 8
        let picked = replay_reachable(&inst, 0, 10, reach);
        assert_eq!(picked, vec![0, 1, 2]);
    }

    #[test]
    fn timeout_falls_back_to_greedy() {
        let inst = Instance::knapsack(6, vec![(2, 3), (3, 4), (4, 5)]).unwrap();
        let sol = timeout_solution(&inst, None, 3, "test").unwrap();
        assert_eq!(sol.status(), SolveStatus::Timeout);
        assert_eq!(sol.optimal_value(), 7);
        assert_eq!(sol.upper_bound(), 8);
        assert_eq!(sol.nodes_explored(), 3);
        assert!(sol.verify(&inst));
    }

    #[test]
    fn timeout_keeps_better_partial() {
        let inst = Instance::knapsack(6, vec![(2, 3), (3, 4), (4, 5)]).unwrap();
        let sol = timeout_solution(&inst, Some(vec![0, 2]), 0, "test").unwrap();
        assert_eq!(sol.selected_items(), &[0, 2]);
        assert_eq!(sol.optimal_value(), 8);
        assert_eq!(sol.gap(), 0);
    }
}
