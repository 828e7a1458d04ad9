//! Bit-packed subset sum.
//!
//! The suffix reachability set of items `i..n` is a [`WordBitSet`] of
//! `capacity + 1` bits; adding item `i` is one in-place `or_shifted` by its
//! weight, so a full sweep costs O(n * C / W) word operations.
//!
//! The witness is recovered by the shared forward replay, which needs
//! `reachable(k, t)` for increasing `k`. Snapshot mode keeps every suffix
//! set. Replay mode keeps one checkpoint per block of `ceil(sqrt(n))` items
//! and rebuilds a block's sets when the replay first enters it, so at most
//! one block plus the checkpoints are live at a time.

use crate::bitset::WordBitSet;
use crate::blocks::{block_bounds, BlockSummary};
use crate::error::SolveError;
use crate::instance::{Instance, Weight};
use crate::options::{Reconstruction, SolveOptions};
use crate::solution::Solution;
use crate::solvers::{all_fit_solution, replay_reachable, timeout_solution, workspace_unavailable};
use crate::traits::Solver;
use crate::utils::default_block_size;

const NAME: &str = "word-ram";

#[derive(Debug, Clone, Copy, Default)]
pub struct WordRamSolver;

impl Solver for WordRamSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Instances with some `profit != weight` are not subset sum instances;
    /// they get an `Invalid` solution instead of an answer to a different
    /// problem.
    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        if !instance.profits_equal_weights() {
            #[cfg(feature = "tracing")]
            tracing::debug!(algorithm = NAME, "profits differ from weights");
            return Ok(Solution::invalid(instance));
        }
        if instance.all_items_fit() {
            return all_fit_solution(instance, NAME);
        }
        let sweep = Sweep::new(instance);
        match options.reconstruction {
            Reconstruction::Snapshot => solve_snapshot(&sweep, options),
            Reconstruction::Replay => solve_replay(&sweep, options),
        }
    }
}

/// Per-solve constants shared by the forward sweep and block rebuilds.
struct Sweep<'a> {
    instance: &'a Instance,
    bits: usize,
    /// `suffix_weight[i]` bounds the highest reachable sum over items `i..n`.
    suffix_weight: Vec<Weight>,
}

impl<'a> Sweep<'a> {
    fn new(instance: &'a Instance) -> Self {
        let n = instance.len();
        let mut suffix_weight: Vec<Weight> = vec![0; n + 1];
        for i in (0..n).rev() {
            suffix_weight[i] = suffix_weight[i + 1].saturating_add(instance.item(i).weight);
        }
        Self {
            instance,
            bits: instance.capacity() + 1,
            suffix_weight,
        }
    }

    /// The set over no items, `{0}`. `None` when it cannot be allocated.
    fn base(&self) -> Option<WordBitSet> {
        let mut set = WordBitSet::try_empty(self.bits)?;
        set.set(0);
        Some(set)
    }

    /// Turn the set over `i + 1..n` into the set over `i..n`. Returns the
    /// number of words written.
    fn add_item(&self, set: &mut WordBitSet, i: usize) -> u64 {
        let hint = self.suffix_weight[i + 1].min(self.bits - 1);
        set.or_shifted(self.instance.item(i).weight, hint) as u64
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn log_item(&self, options: &SolveOptions, i: usize, set: &WordBitSet) {
        #[cfg(feature = "tracing")]
        if options.logs_progress() {
            tracing::debug!(
                algorithm = NAME,
                item = i,
                best = set.highest_set_bit().unwrap_or(0),
                "it"
            );
        }
    }
}

fn solve_snapshot(sweep: &Sweep<'_>, options: &SolveOptions) -> Result<Solution, SolveError> {
    let instance = sweep.instance;
    let n = instance.len();
    let Some(base) = sweep.base() else {
        return Ok(workspace_unavailable(instance, NAME));
    };
    let mut budget = options.budget();
    let mut words = 0u64;
    let mut suffix = vec![WordBitSet::empty(0); n + 1];
    suffix[n] = base;

    for i in (0..n).rev() {
        if budget.exhausted() {
            let target = suffix[i + 1].highest_set_bit().unwrap_or(0);
            let partial = replay_reachable(instance, i + 1, target, |k, t| suffix[k].is_set(t));
            return timeout_solution(instance, Some(partial), words, NAME);
        }
        let Some(mut set) = suffix[i + 1].try_clone() else {
            return Ok(workspace_unavailable(instance, NAME));
        };
        words += sweep.add_item(&mut set, i);
        sweep.log_item(options, i, &set);
        suffix[i] = set;
    }

    let target = suffix[0].highest_set_bit().unwrap_or(0);
    let selected = replay_reachable(instance, 0, target, |k, t| suffix[k].is_set(t));
    Solution::optimal(instance, selected, words, NAME)
}

fn solve_replay(sweep: &Sweep<'_>, options: &SolveOptions) -> Result<Solution, SolveError> {
    let instance = sweep.instance;
    let block_size = default_block_size(instance.len());
    let Some((mut current, scratch, local)) = replay_workspace(sweep, block_size) else {
        return Ok(workspace_unavailable(instance, NAME));
    };
    let mut budget = options.budget();
    let mut words = 0u64;

    let mut checkpoints = Vec::new();
    for (start, end) in block_bounds(instance.len(), block_size).into_iter().rev() {
        let Some(summary) = current.try_clone() else {
            return Ok(workspace_unavailable(instance, NAME));
        };
        checkpoints.push(BlockSummary {
            start,
            end,
            summary,
        });
        for i in (start..end).rev() {
            if budget.exhausted() {
                return timeout_solution(instance, None, words, NAME);
            }
            words += sweep.add_item(&mut current, i);
            sweep.log_item(options, i, &current);
        }
    }
    checkpoints.reverse();

    let target = current.highest_set_bit().unwrap_or(0);
    drop(current);
    let mut replay = BlockReplay {
        sweep,
        checkpoints,
        block_size,
        loaded: None,
        scratch,
        local,
        words: 0,
    };
    let selected = replay_reachable(instance, 0, target, |k, t| replay.is_reachable(k, t));
    words += replay.words;
    Solution::optimal(instance, selected, words, NAME)
}

/// The running sweep set, a rebuild scratch set and `block_size + 1` block
/// slots, all allocated before the sweep starts so that the replay itself
/// never allocates.
fn replay_workspace(
    sweep: &Sweep<'_>,
    block_size: usize,
) -> Option<(WordBitSet, WordBitSet, Vec<WordBitSet>)> {
    let current = sweep.base()?;
    let scratch = current.try_clone()?;
    let mut local = Vec::new();
    local.try_reserve_exact(block_size + 1).ok()?;
    for _ in 0..=block_size {
        local.push(current.try_clone()?);
    }
    Some((current, scratch, local))
}

/// Lazily rebuilt suffix sets for one block at a time.
struct BlockReplay<'s, 'a> {
    sweep: &'s Sweep<'a>,
    checkpoints: Vec<BlockSummary<WordBitSet>>,
    block_size: usize,
    loaded: Option<usize>,
    scratch: WordBitSet,
    // local[j] is the set over items start + j..n of the loaded block
    local: Vec<WordBitSet>,
    words: u64,
}

impl BlockReplay<'_, '_> {
    /// `k` ranges over `1..=n`: the replay asks about the state after item
    /// `k - 1`, which lies in the block `(k - 1) / block_size`.
    fn is_reachable(&mut self, k: usize, t: Weight) -> bool {
        let block = (k - 1) / self.block_size;
        if self.loaded != Some(block) {
            self.load(block);
        }
        self.local[k - self.checkpoints[block].start].is_set(t)
    }

    fn load(&mut self, block: usize) {
        let checkpoint = &self.checkpoints[block];
        let len = checkpoint.len();
        self.scratch.clone_from(&checkpoint.summary);
        self.local[len].clone_from(&self.scratch);
        for j in (0..len).rev() {
            self.words += self.sweep.add_item(&mut self.scratch, checkpoint.start + j);
            self.local[j].clone_from(&self.scratch);
        }
        self.loaded = Some(block);
    }
}
