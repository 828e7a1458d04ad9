//! Relaxation bounds and greedy lower bounds.
//!
//! Both work over the instance's efficiency order. Prefix sums of weight and
//! profit along that order are built once per [`BoundEngine`], so the
//! fractional bound for any suffix of the order and any residual capacity is
//! a binary search plus one division. Bounds prune; they never produce the
//! final optimum, which always comes from an exact DP.
//!
//! The surrogate bound adds a cardinality constraint derived from the break
//! solution and folds it into the capacity constraint with a multiplier
//! `s`, then searches `s` for the smallest Dantzig bound of the combined
//! constraint.

use crate::instance::{Instance, Item, ItemId, Profit, Weight};

/// Bound arithmetic is done in `i128` so the relaxation cannot overflow.
pub type Bound = i128;

/// Feasible whole-item selection found greedily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedySolution {
    /// Selected ids, ascending.
    pub items: Vec<ItemId>,
    pub profit: Bound,
    pub weight: Weight,
}

pub struct BoundEngine<'a> {
    instance: &'a Instance,
    order: &'a [ItemId],
    // prefix_weight[k] = total weight of order[..k]
    prefix_weight: Vec<u128>,
    prefix_profit: Vec<Bound>,
}

impl<'a> BoundEngine<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        let order = instance.efficiency_order();
        let mut prefix_weight = Vec::with_capacity(order.len() + 1);
        let mut prefix_profit = Vec::with_capacity(order.len() + 1);
        let (mut w, mut p) = (0u128, 0 as Bound);
        prefix_weight.push(w);
        prefix_profit.push(p);
        for &id in order {
            let item = instance.item(id);
            w += item.weight as u128;
            p += item.profit as Bound;
            prefix_weight.push(w);
            prefix_profit.push(p);
        }
        Self {
            instance,
            order,
            prefix_weight,
            prefix_profit,
        }
    }

    /// Items in efficiency order.
    pub fn order(&self) -> &[ItemId] {
        self.order
    }

    /// Fractional relaxation bound for the items at efficiency positions
    /// `from_pos..` with `residual` capacity left.
    ///
    /// Whole items are packed in order; the first item that overflows
    /// contributes `residual_left * profit / weight`, rounded down (profits
    /// are integral, so the floor is still an upper bound).
    pub fn upper_bound(&self, from_pos: usize, residual: Weight) -> Bound {
        let n = self.order.len();
        let from = from_pos.min(n);
        let limit = self.prefix_weight[from] + residual as u128;
        // prefix_weight[from] <= limit, so the partition point is at least 1.
        let k = from + self.prefix_weight[from..].partition_point(|&w| w <= limit) - 1;
        let mut bound = self.prefix_profit[k] - self.prefix_profit[from];
        if k < n {
            let item = self.instance.item(self.order[k]);
            // item does not fit, so weight > rem >= 0
            let rem = limit - self.prefix_weight[k];
            bound += (rem as Bound * item.profit as Bound) / item.weight as Bound;
        }
        bound
    }

    /// Dantzig bound: the relaxation of the whole instance.
    pub fn dantzig_upper_bound(&self) -> Bound {
        self.upper_bound(0, self.instance.capacity())
    }

    /// Whole-item greedy in efficiency order, skipping items that no longer
    /// fit, then compared against the most profitable single item.
    pub fn greedy(&self) -> GreedySolution {
        let capacity = self.instance.capacity();
        let mut items = Vec::new();
        let mut weight: Weight = 0;
        let mut profit: Bound = 0;
        for &id in self.order {
            let item = self.instance.item(id);
            if item.weight <= capacity - weight {
                weight += item.weight;
                profit += item.profit as Bound;
                items.push(id);
            }
        }

        let best_single = self
            .instance
            .items()
            .iter()
            .filter(|it| it.weight <= capacity)
            .max_by(|a, b| a.profit.cmp(&b.profit).then(b.id.cmp(&a.id)));
        if let Some(best) = best_single {
            if best.profit as Bound > profit {
                items = vec![best.id];
                weight = best.weight;
                profit = best.profit as Bound;
            }
        }

        items.sort_unstable();
        GreedySolution {
            items,
            profit,
            weight,
        }
    }

    /// Surrogate relaxation bound, never above the Dantzig bound.
    ///
    /// `lower` is the profit of a known feasible solution. Let `b` be the
    /// number of items the Dantzig relaxation packs whole. If no feasible
    /// solution holds more than `b` items, the bound covers the "at most
    /// `b` items" family alone; if every solution beating `lower` needs at
    /// least `b + 1` items, the "at least `b + 1`" family alone; otherwise
    /// the larger bound of the two families.
    pub fn surrogate_upper_bound(&self, lower: Bound) -> Bound {
        let dantzig = self.dantzig_upper_bound();
        let capacity = self.instance.capacity();
        let Some(b) = self.instance.break_item() else {
            return dantzig;
        };
        if self.prefix_weight[b] == capacity as u128 || dantzig <= lower {
            return dantzig;
        }

        let at_least = || match self.min_cardinality(lower) {
            Some(_) => self.surrogate_search(Cardinality::AtLeast(b + 1)),
            None => None,
        };
        let surrogate = if self.max_cardinality() == b {
            self.surrogate_search(Cardinality::AtMost(b))
        } else if self.min_cardinality(lower) == Some(b + 1) {
            self.surrogate_search(Cardinality::AtLeast(b + 1))
        } else {
            match (self.surrogate_search(Cardinality::AtMost(b)), at_least()) {
                (Some(x), Some(y)) => Some(x.max(y)),
                (x, y) => x.or(y),
            }
        };
        surrogate.map_or(lower, |bound| bound.max(lower)).min(dantzig)
    }

    /// Items that fit on their own.
    fn fitting(&self) -> impl Iterator<Item = &Item> {
        let capacity = self.instance.capacity();
        self.instance
            .items()
            .iter()
            .filter(move |it| it.weight <= capacity)
    }

    /// Most items any feasible solution can hold: the lightest ones.
    fn max_cardinality(&self) -> usize {
        let mut weights: Vec<Weight> = self.fitting().map(|it| it.weight).collect();
        weights.sort_unstable();
        let mut used: u128 = 0;
        weights
            .into_iter()
            .take_while(|&w| {
                used += w as u128;
                used <= self.instance.capacity() as u128
            })
            .count()
    }

    /// Fewest items a solution with profit above `lower` must hold, `None`
    /// if no selection exceeds `lower`.
    fn min_cardinality(&self, lower: Bound) -> Option<usize> {
        let mut profits: Vec<Profit> = self.fitting().map(|it| it.profit).collect();
        profits.sort_unstable_by(|a, b| b.cmp(a));
        let mut sum: Bound = 0;
        for (k, p) in profits.into_iter().enumerate() {
            sum += p as Bound;
            if sum > lower {
                return Some(k + 1);
            }
        }
        None
    }

    /// Binary search over the multiplier, keeping the smallest bound seen.
    /// `None` when the family has no feasible member.
    fn surrogate_search(&self, family: Cardinality) -> Option<Bound> {
        let k = match family {
            Cardinality::AtMost(k) | Cardinality::AtLeast(k) => k,
        };
        let max_weight = self.fitting().map(|it| it.weight).max().unwrap_or(0) as Bound;
        let max_profit = self.fitting().map(|it| it.profit).max().unwrap_or(0) as Bound;
        let (mut lo, mut hi) = (0, (max_weight * max_profit).min(MAX_MULTIPLIER));
        let mut best: Option<Bound> = None;
        while lo <= hi {
            let s = lo + (hi - lo) / 2;
            let relaxed = self.surrogate_relaxation(family, s)?;
            best = Some(best.map_or(relaxed.bound, |b| b.min(relaxed.bound)));
            if relaxed.whole == k && relaxed.exact {
                break;
            }
            // A larger multiplier pushes the packing towards fewer items for
            // `AtMost` and towards more items for `AtLeast`.
            let too_many = relaxed.whole >= k;
            match (family, too_many) {
                (Cardinality::AtMost(_), true) | (Cardinality::AtLeast(_), false) => lo = s + 1,
                _ => hi = s - 1,
            }
        }
        best
    }

    /// Dantzig bound of the surrogate instance for multiplier `s`, `None`
    /// when its capacity cannot be met.
    fn surrogate_relaxation(&self, family: Cardinality, s: Bound) -> Option<Relaxed> {
        let (shift, k) = match family {
            Cardinality::AtMost(k) => (s, k),
            Cardinality::AtLeast(k) => (-s, k),
        };
        let mut residual = self.instance.capacity() as Bound + shift * k as Bound;
        let mut bound: Bound = 0;
        let mut whole = 0;
        let mut positive: Vec<(Bound, Bound, ItemId)> = Vec::new();
        for item in self.fitting() {
            let weight = item.weight as Bound + shift;
            if weight <= 0 {
                residual -= weight;
                bound += item.profit as Bound;
                whole += 1;
            } else {
                positive.push((weight, item.profit as Bound, item.id));
            }
        }
        if residual < 0 {
            return None;
        }
        positive.sort_by(|a, b| (b.1 * a.0).cmp(&(a.1 * b.0)).then(a.2.cmp(&b.2)));
        for (weight, profit, _) in positive {
            if weight > residual {
                bound += residual * profit / weight;
                return Some(Relaxed {
                    bound,
                    whole,
                    exact: residual == 0,
                });
            }
            residual -= weight;
            bound += profit;
            whole += 1;
        }
        Some(Relaxed {
            bound,
            whole,
            exact: residual == 0,
        })
    }
}

/// The family of solutions a surrogate bound covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    /// Solutions with at most this many items: every weight grows by `s`
    /// and the capacity by `s * k`.
    AtMost(usize),
    /// Solutions with at least this many items: every weight shrinks by `s`
    /// and the capacity by `s * k`.
    AtLeast(usize),
}

/// Fractional optimum of one surrogate instance.
#[derive(Debug, Clone, Copy)]
struct Relaxed {
    bound: Bound,
    /// Items packed whole.
    whole: usize,
    /// The packing stopped with no residual capacity.
    exact: bool,
}

/// Largest multiplier tried; keeps every product in the ratio comparisons
/// below `2^127`.
const MAX_MULTIPLIER: Bound = 1 << 62;

/// Clamp a bound into the reportable profit range.
pub(crate) fn clamp_bound(bound: Bound) -> Profit {
    bound.clamp(0, Profit::MAX as Bound) as Profit
}
