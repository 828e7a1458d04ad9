//! Top-down evaluation on an owned frame stack.
//!
//! Each frame is one pending `g(item, capacity)` call. Its phase records
//! which child call it is waiting on; the child's result comes back through
//! a single return register, exactly as a native call would return it.

use crate::budget::Budget;
use crate::instance::{Instance, Profit, Weight};
use crate::utils::add_profit;

use super::{check, Halt, Memo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not started: look up the memo or descend into the skip branch.
    Enter,
    /// The skip branch has returned.
    AfterSkip,
    /// The take branch has returned.
    AfterTake,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    item: usize,
    capacity: Weight,
    /// Value of the skip branch once known.
    partial_profit: Profit,
    phase: Phase,
}

impl Frame {
    fn enter(item: usize, capacity: Weight) -> Self {
        Self {
            item,
            capacity,
            partial_profit: 0,
            phase: Phase::Enter,
        }
    }
}

/// Evaluate `g(0, C)` without native recursion.
pub(super) fn evaluate<M: Memo>(
    instance: &Instance,
    memo: &mut M,
    budget: &mut Budget,
    name: &'static str,
) -> Result<Profit, Halt> {
    let n = instance.len();
    let mut stack = vec![Frame::enter(0, instance.capacity())];
    let mut ret: Profit = 0;

    while let Some(mut frame) = stack.pop() {
        match frame.phase {
            Phase::Enter => {
                if frame.item == n {
                    ret = 0;
                    continue;
                }
                if let Some(v) = memo.get(frame.item, frame.capacity) {
                    ret = v;
                    continue;
                }
                check(budget)?;
                frame.phase = Phase::AfterSkip;
                stack.push(frame);
                stack.push(Frame::enter(frame.item + 1, frame.capacity));
            }
            Phase::AfterSkip => {
                frame.partial_profit = ret;
                let weight = instance.item(frame.item).weight;
                if weight <= frame.capacity {
                    frame.phase = Phase::AfterTake;
                    stack.push(frame);
                    stack.push(Frame::enter(frame.item + 1, frame.capacity - weight));
                } else {
                    memo.insert(frame.item, frame.capacity, frame.partial_profit);
                    ret = frame.partial_profit;
                }
            }
            Phase::AfterTake => {
                let take = add_profit(ret, instance.item(frame.item).profit, name)?;
                let best = frame.partial_profit.max(take);
                memo.insert(frame.item, frame.capacity, best);
                ret = best;
            }
        }
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::super::{recursive, DenseMemo};
    use super::*;

    #[test]
    fn matches_native_recursion() {
        let inst = Instance::knapsack(
            13,
            vec![(4, 7), (3, 3), (6, 11), (2, 2), (5, 9), (1, 1), (7, 12)],
        )
        .unwrap();
        let mut a = DenseMemo::new(&inst).unwrap();
        let mut b = DenseMemo::new(&inst).unwrap();
        let va = evaluate(&inst, &mut a, &mut Budget::unlimited(), "t").unwrap();
        let vb = recursive::evaluate(&inst, &mut b, &mut Budget::unlimited(), "t").unwrap();
        assert_eq!(va, vb);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn deep_item_lists_do_not_recurse() {
        let inst = Instance::knapsack(3, (0..50_000).map(|k| (1, k % 3))).unwrap();
        let mut memo = DenseMemo::new(&inst).unwrap();
        let v = evaluate(&inst, &mut memo, &mut Budget::unlimited(), "t").unwrap();
        assert_eq!(v, 6);
    }
}
