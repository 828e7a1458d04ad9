//! Balanced subset sum.
//!
//! The search starts from the break solution, the longest prefix of items
//! that fits, and only moves between balanced fillings: a filling at or
//! below the capacity may add the next item, one above it must drop an item
//! of the prefix. Every balanced sum lies in `(C - r, C + r]` for the
//! largest weight `r`, so a level is a window of `2r` cells and a full run
//! costs O(n * r) instead of O(n * C).
//!
//! Cell `mu` of a level holds the largest `v` such that a balanced filling
//! of weight `mu` keeps the first `v - 1` prefix items; 0 marks a sum not
//! reached. Every level is kept so that a witness can be traced back from
//! the best sum of the last level.
//!
//! Items heavier than the capacity never take part. Witnesses are valid but
//! not the lexicographically smallest ones.

use crate::error::SolveError;
use crate::instance::{Instance, ItemId, Weight};
use crate::options::SolveOptions;
use crate::solution::Solution;
use crate::solvers::{all_fit_solution, timeout_solution, workspace_unavailable};
use crate::traits::Solver;
use crate::utils::{table_cells, try_filled};

const NAME: &str = "balancing";

#[derive(Debug, Clone, Copy, Default)]
pub struct BalancingSolver;

impl Solver for BalancingSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Like `word-ram`, answers `Invalid` on instances where some profit
    /// differs from its weight.
    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        if !instance.profits_equal_weights() {
            #[cfg(feature = "tracing")]
            tracing::debug!(algorithm = NAME, "profits differ from weights");
            return Ok(Solution::invalid(instance));
        }
        if instance.all_items_fit() {
            return all_fit_solution(instance, NAME);
        }

        let capacity = instance.capacity();
        let ids: Vec<ItemId> = instance
            .items()
            .iter()
            .filter(|it| it.weight <= capacity)
            .map(|it| it.id)
            .collect();
        let weights: Vec<Weight> = ids.iter().map(|&id| instance.item(id).weight).collect();
        let Some((break_pos, break_weight)) = break_point(&weights, capacity) else {
            return Solution::optimal(instance, ids, 0, NAME);
        };

        // The break item does not fit on top of the prefix, so it weighs at
        // least 1 and `radius <= capacity`.
        let radius = weights.iter().copied().max().unwrap_or(1);
        let width = 2 * radius;
        let rows = weights.len() - break_pos + 1;
        let Some(cells) = table_cells(rows, width).and_then(|n| try_filled(n, 0usize)) else {
            return Ok(workspace_unavailable(instance, NAME));
        };
        let mut levels = Levels {
            ids,
            weights,
            break_pos,
            radius,
            width,
            cells,
        };
        // window index of sum `mu` is `mu - (capacity + 1 - radius)`
        let break_index = break_weight + radius - 1 - capacity;
        levels.cells[break_index] = break_pos + 1;
        levels.run(instance, options)
    }
}

/// Position of the break item among `weights` and the weight of the prefix
/// before it, `None` if everything fits.
fn break_point(weights: &[Weight], capacity: Weight) -> Option<(usize, Weight)> {
    let mut used: Weight = 0;
    for (pos, &w) in weights.iter().enumerate() {
        if w > capacity - used {
            return Some((pos, used));
        }
        used += w;
    }
    None
}

struct Levels {
    /// Items that fit on their own, in input order.
    ids: Vec<ItemId>,
    weights: Vec<Weight>,
    break_pos: usize,
    radius: usize,
    width: usize,
    /// Level `l` covers items `..break_pos + l` and occupies
    /// `cells[l * width..(l + 1) * width]`.
    cells: Vec<usize>,
}

impl Levels {
    fn level(&self, l: usize) -> &[usize] {
        &self.cells[l * self.width..(l + 1) * self.width]
    }

    fn run(mut self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        let (r, width) = (self.radius, self.width);
        let mut budget = options.budget();
        let mut nodes = 0u64;
        let mut last = 0;

        for t in self.break_pos..self.weights.len() {
            if budget.exhausted() {
                let partial = self.trace(last);
                return timeout_solution(instance, Some(partial), nodes, NAME);
            }
            let level = t - self.break_pos + 1;
            let (head, tail) = self.cells.split_at_mut(level * width);
            let prev = &head[(level - 1) * width..];
            let next = &mut tail[..width];
            next.copy_from_slice(prev);
            let w = self.weights[t];

            // add item t to every filling at or below the capacity
            for i in 0..r {
                if prev[i] > next[i + w] {
                    next[i + w] = prev[i];
                }
            }
            nodes += r as u64;

            // drop prefix items from fillings above the capacity, heaviest
            // sums first so that chained drops are seen in the same pass
            for i in (r..r + w).rev() {
                let upto = next[i];
                for j in prev[i].max(1)..upto {
                    let i2 = i - self.weights[j - 1];
                    if j > next[i2] {
                        next[i2] = j;
                    }
                    nodes += 1;
                }
            }

            last = level;
            #[cfg(feature = "tracing")]
            if options.logs_progress() {
                let best = (0..r).rev().find(|&i| next[i] > 0).unwrap_or(0);
                tracing::debug!(algorithm = NAME, item = self.ids[t], best_index = best, "it");
            }
            if next[r - 1] > 0 {
                break;
            }
        }

        let selected = self.trace(last);
        Solution::optimal(instance, selected, nodes, NAME)
    }

    /// Items of a filling with the best sum at or below the capacity on
    /// level `level`.
    fn trace(&self, mut level: usize) -> Vec<ItemId> {
        let r = self.radius;
        let Some(mut i) = (0..r).rev().find(|&i| self.level(level)[i] > 0) else {
            return Vec::new();
        };
        let mut need = 1;
        let mut added = Vec::new();
        let mut dropped = vec![false; self.break_pos];

        while level > 0 {
            let t = self.break_pos + level - 1;
            let w = self.weights[t];
            let prev = self.level(level - 1);
            if prev[i] >= need {
                level -= 1;
                continue;
            }
            if i >= w && i - w < r && prev[i - w] >= need {
                added.push(t);
                i -= w;
                level -= 1;
                continue;
            }
            // reached by dropping prefix item j - 1 from a heavier filling
            // that kept it
            let cur = self.level(level);
            let found = (need..=self.break_pos).find(|&j| {
                let i2 = i + self.weights[j - 1];
                i2 < self.width && cur[i2] > j
            });
            debug_assert!(found.is_some(), "balancing trace lost at level {level}");
            let Some(j) = found else {
                break;
            };
            dropped[j - 1] = true;
            i += self.weights[j - 1];
            need = j + 1;
        }

        (0..self.break_pos)
            .filter(|&p| !dropped[p])
            .chain(added)
            .map(|p| self.ids[p])
            .collect()
    }
}
