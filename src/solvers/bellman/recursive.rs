use crate::budget::Budget;
use crate::instance::{Instance, Profit, Weight};
use crate::utils::add_profit;

use super::{check, Halt, Memo};

/// Evaluate `g(0, C)` by direct recursion.
///
/// Native stack depth reaches `n + 1` frames; use the stack strategy for
/// long item lists.
pub(super) fn evaluate<M: Memo>(
    instance: &Instance,
    memo: &mut M,
    budget: &mut Budget,
    name: &'static str,
) -> Result<Profit, Halt> {
    let mut eval = Recursion {
        instance,
        memo,
        budget,
        name,
    };
    eval.value(0, instance.capacity())
}

struct Recursion<'a, M> {
    instance: &'a Instance,
    memo: &'a mut M,
    budget: &'a mut Budget,
    name: &'static str,
}

impl<M: Memo> Recursion<'_, M> {
    fn value(&mut self, item: usize, capacity: Weight) -> Result<Profit, Halt> {
        if item == self.instance.len() {
            return Ok(0);
        }
        if let Some(v) = self.memo.get(item, capacity) {
            return Ok(v);
        }
        check(self.budget)?;

        let it = *self.instance.item(item);
        let skip = self.value(item + 1, capacity)?;
        let best = if it.weight <= capacity {
            let rest = self.value(item + 1, capacity - it.weight)?;
            skip.max(add_profit(rest, it.profit, self.name)?)
        } else {
            skip
        };
        self.memo.insert(item, capacity, best);
        Ok(best)
    }
}
