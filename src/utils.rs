//! Assorted helpers shared by the solvers.

use crate::error::SolveError;
use crate::instance::Profit;

/// Machine word width used by the bit-packed solvers.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Number of `u64` words needed to hold `bits` bits.
#[inline]
pub const fn words_for_bits(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Checkpoint spacing for `num_items` items: `ceil(sqrt(n))`, at least 1.
///
/// Keeping one checkpoint per block and at most one block's worth of
/// intermediate states live bounds memory by O(sqrt(n)) states.
#[inline]
pub fn default_block_size(num_items: usize) -> usize {
    if num_items <= 1 {
        1
    } else {
        (num_items as f64).sqrt().ceil() as usize
    }
}

/// Cell count of a `rows x width` table, `None` when it overflows `usize`.
#[inline]
pub(crate) fn table_cells(rows: usize, width: usize) -> Option<usize> {
    rows.checked_mul(width)
}

/// A vector of `len` copies of `fill`, or `None` when the allocation is
/// refused.
pub(crate) fn try_filled<T: Clone>(len: usize, fill: T) -> Option<Vec<T>> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).ok()?;
    cells.resize(len, fill);
    Some(cells)
}

/// Checked profit addition tagged with the solver that performed it.
#[inline]
pub(crate) fn add_profit(a: Profit, b: Profit, context: &'static str) -> Result<Profit, SolveError> {
    a.checked_add(b).ok_or_else(|| SolveError::overflow(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_round_up() {
        assert_eq!(words_for_bits(0), 0);
        assert_eq!(words_for_bits(1), 1);
        assert_eq!(words_for_bits(64), 1);
        assert_eq!(words_for_bits(65), 2);
        assert_eq!(words_for_bits(128), 2);
    }

    #[test]
    fn returns_one_for_small_n() {
        assert_eq!(default_block_size(0), 1);
        assert_eq!(default_block_size(1), 1);
    }

    #[test]
    fn sqrt_ceiling_behavior() {
        assert_eq!(default_block_size(2), 2);
        assert_eq!(default_block_size(4), 2);
        assert_eq!(default_block_size(5), 3);
        assert_eq!(default_block_size(100), 10);
        assert_eq!(default_block_size(101), 11);
    }

    #[test]
    fn monotonic_non_decreasing() {
        let mut prev = 0;
        for n in 0..500 {
            let b = default_block_size(n);
            assert!(b >= prev, "block size decreased at n={n}: {b} < {prev}");
            prev = b;
        }
    }

    #[test]
    fn table_cells_rejects_overflow() {
        assert_eq!(table_cells(3, 4), Some(12));
        assert_eq!(table_cells(2, usize::MAX / 2 + 1), None);
    }

    #[test]
    fn try_filled_refuses_impossible_sizes() {
        assert_eq!(try_filled(3, 7u8), Some(vec![7, 7, 7]));
        assert!(try_filled(usize::MAX / 4, 0i64).is_none());
    }

    #[test]
    fn add_profit_detects_overflow() {
        assert_eq!(add_profit(2, 3, "t"), Ok(5));
        assert_eq!(
            add_profit(i64::MAX, 1, "t").unwrap_err().code(),
            "ARITHMETIC_OVERFLOW"
        );
    }
}
