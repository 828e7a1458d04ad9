//! Item blocks used by checkpointed reconstruction.
//!
//! Each `BlockSummary` covers the item range [start, end) and stores the DP
//! state reached at its `end` boundary, i.e. the state over the suffix of
//! items `end..n`. Replaying a block recomputes the states strictly inside
//! it from that checkpoint.

/// Checkpoint for a contiguous range of items [start, end).
#[derive(Debug, Clone)]
pub struct BlockSummary<S> {
    /// Inclusive first item of the block.
    pub start: usize,
    /// Exclusive last item; the block covers items [start, end).
    pub end: usize,
    /// State over the suffix `end..n`.
    pub summary: S,
}

impl<S> BlockSummary<S> {
    /// Number of items in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `0..num_items` into consecutive blocks of `block_size` items, the
/// last one possibly shorter.
///
/// # Panics
/// Panics if `block_size == 0`.
pub fn block_bounds(num_items: usize, block_size: usize) -> Vec<(usize, usize)> {
    assert!(block_size > 0, "block_size must be positive");
    (0..num_items)
        .step_by(block_size)
        .map(|start| (start, (start + block_size).min(num_items)))
        .collect()
}
