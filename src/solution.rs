//! Solve results.
//!
//! A [`Solution`] is returned once per solve and never mutated afterwards.
//! It carries no timing data, so solving the same instance twice with the
//! same algorithm yields values that compare equal.

use crate::error::SolveError;
use crate::instance::{Instance, ItemId, Profit, Weight};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The reported value is proven optimal.
    Optimal,
    /// The budget ran out; the reported selection is feasible but unproven.
    Timeout,
    /// The selected algorithm cannot handle this instance.
    Invalid,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Optimal or timed out: the selection respects the capacity.
    pub fn is_feasible(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Timeout)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Timeout => "timeout",
            SolveStatus::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    status: SolveStatus,
    optimal_value: Profit,
    upper_bound: Profit,
    selected_items: Vec<ItemId>,
    total_weight: Weight,
    capacity: Weight,
    nodes_explored: u64,
}

impl Solution {
    /// Build a solution from a selection, recomputing value and weight from
    /// the instance. `selected` may come in any order; it is stored sorted.
    pub(crate) fn from_items(
        instance: &Instance,
        status: SolveStatus,
        mut selected: Vec<ItemId>,
        upper_bound: Option<Profit>,
        nodes_explored: u64,
        context: &'static str,
    ) -> Result<Self, SolveError> {
        selected.sort_unstable();
        let mut value: Profit = 0;
        let mut weight: Weight = 0;
        for &id in &selected {
            let item = instance.item(id);
            value = value
                .checked_add(item.profit)
                .ok_or_else(|| SolveError::overflow(context))?;
            weight = weight.saturating_add(item.weight);
        }
        let upper_bound = match status {
            SolveStatus::Optimal => value,
            _ => upper_bound.unwrap_or(value).max(value),
        };
        Ok(Self {
            status,
            optimal_value: value,
            upper_bound,
            selected_items: selected,
            total_weight: weight,
            capacity: instance.capacity(),
            nodes_explored,
        })
    }

    pub(crate) fn optimal(
        instance: &Instance,
        selected: Vec<ItemId>,
        nodes_explored: u64,
        context: &'static str,
    ) -> Result<Self, SolveError> {
        Self::from_items(
            instance,
            SolveStatus::Optimal,
            selected,
            None,
            nodes_explored,
            context,
        )
    }

    pub(crate) fn invalid(instance: &Instance) -> Self {
        Self {
            status: SolveStatus::Invalid,
            optimal_value: 0,
            upper_bound: 0,
            selected_items: Vec::new(),
            total_weight: 0,
            capacity: instance.capacity(),
            nodes_explored: 0,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Objective value of the selection. For a timed-out solve this is the
    /// best lower bound found.
    pub fn optimal_value(&self) -> Profit {
        self.optimal_value
    }

    /// Best proven upper bound; equals `optimal_value` when optimal.
    pub fn upper_bound(&self) -> Profit {
        self.upper_bound
    }

    pub fn gap(&self) -> Profit {
        self.upper_bound - self.optimal_value
    }

    /// Selected item ids, ascending.
    pub fn selected_items(&self) -> &[ItemId] {
        &self.selected_items
    }

    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// DP cells filled, memo entries computed, or list states generated,
    /// depending on the algorithm.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// For subset sum: whether the selection hits the capacity exactly.
    pub fn target_reached(&self) -> bool {
        self.status.is_feasible() && self.total_weight == self.capacity
    }

    /// Check the feasibility invariants against the instance the solution
    /// came from: ids in range and unique, weight within capacity, and the
    /// profit sum matching the reported value.
    pub fn verify(&self, instance: &Instance) -> bool {
        if !self.status.is_feasible() {
            return self.selected_items.is_empty();
        }
        if self.selected_items.windows(2).any(|w| w[0] >= w[1]) {
            return false;
        }
        if self.selected_items.iter().any(|&id| id >= instance.len()) {
            return false;
        }
        let weight: Weight = self
            .selected_items
            .iter()
            .map(|&id| instance.item(id).weight)
            .fold(0, Weight::saturating_add);
        let profit: Option<Profit> = self
            .selected_items
            .iter()
            .try_fold(0 as Profit, |acc, &id| acc.checked_add(instance.item(id).profit));
        weight <= instance.capacity()
            && weight == self.total_weight
            && profit == Some(self.optimal_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_item_instance() -> Instance {
        Instance::knapsack(5, vec![(2, 3), (3, 4), (4, 5)]).unwrap()
    }

    #[test]
    fn status_predicates() {
        assert!(SolveStatus::Optimal.is_optimal());
        assert!(SolveStatus::Optimal.is_feasible());
        assert!(!SolveStatus::Timeout.is_optimal());
        assert!(SolveStatus::Timeout.is_feasible());
        assert!(!SolveStatus::Invalid.is_feasible());
        assert_eq!(format!("{}", SolveStatus::Timeout), "timeout");
    }

    #[test]
    fn optimal_sorts_and_sums() {
        let inst = three_item_instance();
        let sol = Solution::optimal(&inst, vec![1, 0], 4, "test").unwrap();
        assert_eq!(sol.selected_items(), &[0, 1]);
        assert_eq!(sol.optimal_value(), 7);
        assert_eq!(sol.upper_bound(), 7);
        assert_eq!(sol.gap(), 0);
        assert_eq!(sol.total_weight(), 5);
        assert!(sol.target_reached());
        assert!(sol.verify(&inst));
    }

    #[test]
    fn timeout_keeps_upper_bound() {
        let inst = three_item_instance();
        let sol =
            Solution::from_items(&inst, SolveStatus::Timeout, vec![2], Some(9), 0, "test").unwrap();
        assert_eq!(sol.optimal_value(), 5);
        assert_eq!(sol.upper_bound(), 9);
        assert!(sol.verify(&inst));
    }

    #[test]
    fn verify_rejects_overweight() {
        let inst = three_item_instance();
        let sol = Solution::optimal(&inst, vec![0, 1, 2], 0, "test").unwrap();
        assert!(!sol.verify(&inst));
    }

    #[test]
    fn overflowing_selection_is_an_error() {
        let inst = Instance::knapsack(10, vec![(1, i64::MAX), (1, 1)]).unwrap();
        let err = Solution::optimal(&inst, vec![0, 1], 0, "test").unwrap_err();
        assert_eq!(err.code(), "ARITHMETIC_OVERFLOW");
    }

    #[test]
    fn invalid_is_empty() {
        let inst = three_item_instance();
        let sol = Solution::invalid(&inst);
        assert_eq!(sol.status(), SolveStatus::Invalid);
        assert!(sol.selected_items().is_empty());
        assert!(!sol.target_reached());
        assert!(sol.verify(&inst));
    }
}
