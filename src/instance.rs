//! Immutable problem instances.
//!
//! An [`Instance`] is built once from already-parsed data and never mutated.
//! Construction validates the non-negativity contract; every solver can then
//! rely on weights indexing dense tables directly and on profits fitting the
//! safe `i64` range item by item (sums are still checked during solves).
//!
//! The efficiency ordering used by the bound engine is computed lazily on
//! first access and cached, so instances stay `Send + Sync` and can be shared
//! by independent solves running on different threads.

use std::cmp::Ordering;
use std::sync::OnceLock;

use crate::error::{InvalidReason, SolveError};

/// Item identifier: the position of the item in the input sequence.
pub type ItemId = usize;
/// Weights and capacities address dense tables directly.
pub type Weight = usize;
/// Profits accumulate in a wide signed integer; the safe range is `0..=i64::MAX`.
pub type Profit = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub weight: Weight,
    pub profit: Profit,
}

/// Which objective the instance encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Maximize profit subject to the weight capacity.
    Knapsack,
    /// Find the largest reachable weight sum not above the capacity.
    /// Profits mirror weights.
    SubsetSum,
}

impl ProblemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::Knapsack => "knapsack",
            ProblemKind::SubsetSum => "subset-sum",
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Instance {
    kind: ProblemKind,
    capacity: Weight,
    items: Vec<Item>,
    /// Saturates at `Weight::MAX`; only compared against the capacity.
    total_weight: Weight,
    /// `None` when the sum of all profits leaves the safe range.
    total_profit: Option<Profit>,
    efficiency: OnceLock<Vec<ItemId>>,
}

impl Instance {
    /// Build a 0/1 knapsack instance from `(weight, profit)` pairs.
    ///
    /// Item ids are assigned in input order.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidInstance`] if the capacity, a weight, or a
    /// profit is negative, or if a value is not addressable on this platform.
    pub fn knapsack<I>(capacity: i64, items: I) -> Result<Self, SolveError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        Self::build(ProblemKind::Knapsack, capacity, items)
    }

    /// Build a subset sum instance; every item's profit equals its weight.
    ///
    /// # Errors
    /// Same contract as [`Instance::knapsack`].
    pub fn subset_sum<I>(capacity: i64, weights: I) -> Result<Self, SolveError>
    where
        I: IntoIterator<Item = i64>,
    {
        Self::build(
            ProblemKind::SubsetSum,
            capacity,
            weights.into_iter().map(|w| (w, w)),
        )
    }

    fn build<I>(kind: ProblemKind, capacity: i64, raw: I) -> Result<Self, SolveError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        if capacity < 0 {
            return Err(SolveError::invalid(InvalidReason::NegativeCapacity));
        }
        let capacity = Weight::try_from(capacity)
            .map_err(|_| SolveError::invalid(InvalidReason::TooLarge { id: None }))?;

        let mut items = Vec::new();
        let mut total_weight: Weight = 0;
        let mut total_profit: Option<Profit> = Some(0);
        for (id, (weight, profit)) in raw.into_iter().enumerate() {
            if weight < 0 {
                return Err(SolveError::invalid(InvalidReason::NegativeWeight { id }));
            }
            if profit < 0 {
                return Err(SolveError::invalid(InvalidReason::NegativeProfit { id }));
            }
            let weight = Weight::try_from(weight)
                .map_err(|_| SolveError::invalid(InvalidReason::TooLarge { id: Some(id) }))?;
            total_weight = total_weight.saturating_add(weight);
            total_profit = total_profit.and_then(|t| t.checked_add(profit));
            items.push(Item { id, weight, profit });
        }

        Ok(Self {
            kind,
            capacity,
            items,
            total_weight,
            total_profit,
            efficiency: OnceLock::new(),
        })
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn capacity(&self) -> Weight {
        self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// # Panics
    /// Panics if `id` is out of range.
    #[inline]
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all weights, saturating at `Weight::MAX`.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Sum of all profits, or `None` if it does not fit the safe range.
    pub fn total_profit(&self) -> Option<Profit> {
        self.total_profit
    }

    /// True when every item fits at once; solvers short-circuit on this.
    pub fn all_items_fit(&self) -> bool {
        self.total_weight <= self.capacity
    }

    /// True when every item's profit equals its weight, i.e. the instance can
    /// be read as a subset sum instance.
    pub fn profits_equal_weights(&self) -> bool {
        self.kind == ProblemKind::SubsetSum
            || self
                .items
                .iter()
                .all(|it| Profit::try_from(it.weight).map_or(false, |w| w == it.profit))
    }

    /// Item ids sorted by profit/weight ratio, descending.
    ///
    /// Zero-weight items come first. Ties keep input order. Computed on first
    /// call and cached.
    pub fn efficiency_order(&self) -> &[ItemId] {
        self.efficiency.get_or_init(|| {
            let mut order: Vec<ItemId> = (0..self.items.len()).collect();
            order.sort_by(|&a, &b| {
                compare_efficiency(&self.items[a], &self.items[b]).then(a.cmp(&b))
            });
            order
        })
    }

    /// Position in [`efficiency_order`](Self::efficiency_order) of the first
    /// item that does not fit when filling greedily, or `None` if all fit.
    pub fn break_item(&self) -> Option<usize> {
        let mut used: Weight = 0;
        for (pos, &id) in self.efficiency_order().iter().enumerate() {
            let w = self.items[id].weight;
            match used.checked_add(w) {
                Some(next) if next <= self.capacity => used = next,
                _ => return Some(pos),
            }
        }
        None
    }
}

/// Ordering by descending profit/weight ratio; `Less` means `a` is more efficient.
fn compare_efficiency(a: &Item, b: &Item) -> Ordering {
    match (a.weight == 0, b.weight == 0) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let lhs = b.profit as i128 * a.weight as i128;
            let rhs = a.profit as i128 * b.weight as i128;
            lhs.cmp(&rhs)
        }
    }
}
