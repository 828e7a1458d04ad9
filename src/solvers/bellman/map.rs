use rustc_hash::FxHashMap;

use crate::instance::{Profit, Weight};

use super::Memo;

/// Memo holding only the `(item, capacity)` states actually visited.
///
/// Pays a hash lookup per access instead of allocating `n x (C + 1)` cells;
/// the better choice when few residual capacities are reachable, e.g. large
/// capacities with few distinct weights.
#[derive(Debug, Default)]
pub(crate) struct SparseMemo {
    states: FxHashMap<(usize, Weight), Profit>,
}

impl Memo for SparseMemo {
    #[inline]
    fn get(&self, item: usize, capacity: Weight) -> Option<Profit> {
        self.states.get(&(item, capacity)).copied()
    }

    #[inline]
    fn insert(&mut self, item: usize, capacity: Weight, value: Profit) {
        self.states.insert((item, capacity), value);
    }

    fn len(&self) -> usize {
        self.states.len()
    }
}
