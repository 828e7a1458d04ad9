//! Word-packed bitsets for reachability DP.
//!
//! Bit `t` set means "sum `t` is reachable". Padding bits beyond
//! `bit_length` in the last word are always zero, so slice equality of the
//! backing words is set equality.

use crate::utils::{try_filled, words_for_bits, WORD_BITS};

#[derive(Debug, PartialEq, Eq)]
pub struct WordBitSet {
    words: Vec<u64>,
    bit_length: usize,
}

impl Clone for WordBitSet {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            bit_length: self.bit_length,
        }
    }

    /// Reuses the existing word buffer when the lengths match.
    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
        self.bit_length = source.bit_length;
    }
}

impl WordBitSet {
    /// Creates a bitset with `bit_length` addressable bits, all zero.
    pub fn empty(bit_length: usize) -> Self {
        Self {
            words: vec![0u64; words_for_bits(bit_length)],
            bit_length,
        }
    }

    /// Like [`WordBitSet::empty`], but `None` when the words cannot be
    /// allocated.
    pub fn try_empty(bit_length: usize) -> Option<Self> {
        Some(Self {
            words: try_filled(words_for_bits(bit_length), 0u64)?,
            bit_length,
        })
    }

    /// A copy of `self`, or `None` when the copy cannot be allocated.
    pub fn try_clone(&self) -> Option<Self> {
        let mut words = Vec::new();
        words.try_reserve_exact(self.words.len()).ok()?;
        words.extend_from_slice(&self.words);
        Some(Self {
            words,
            bit_length: self.bit_length,
        })
    }

    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    #[inline]
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn last_word_mask(&self) -> u64 {
        let remaining_bits = self.bit_length % WORD_BITS;
        if remaining_bits == 0 {
            u64::MAX
        } else {
            (1u64 << remaining_bits) - 1
        }
    }

    /// # Panics
    /// Panics if `idx >= bit_length`.
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        assert!(idx < self.bit_length, "bit {idx} out of range");
        (self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1
    }

    /// # Panics
    /// Panics if `idx >= bit_length`.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < self.bit_length, "bit {idx} out of range");
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index of the highest set bit, if any.
    pub fn highest_set_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * WORD_BITS + (WORD_BITS - 1 - w.leading_zeros() as usize))
    }

    /// In place `self |= self << shift`, truncated to `bit_length` bits.
    ///
    /// `highest_hint` is an upper bound on the highest set bit before the
    /// call; words above `highest_hint + shift` are left untouched. Returns
    /// the number of words written.
    pub fn or_shifted(&mut self, shift: usize, highest_hint: usize) -> usize {
        if shift == 0 || shift >= self.bit_length {
            return 0;
        }
        let word_shift = shift / WORD_BITS;
        let bit_shift = shift % WORD_BITS;
        let top_bit = highest_hint
            .saturating_add(shift)
            .min(self.bit_length - 1);
        let top_word = top_bit / WORD_BITS;

        // Descending order: every source word (index <= i) is still unmodified
        // when word i is written.
        let mut written = 0;
        for i in (word_shift..=top_word).rev() {
            let src = i - word_shift;
            let mut shifted = self.words[src] << bit_shift;
            if bit_shift != 0 && src > 0 {
                shifted |= self.words[src - 1] >> (WORD_BITS - bit_shift);
            }
            self.words[i] |= shifted;
            written += 1;
        }
        let mask = self.last_word_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(set: &WordBitSet) -> Vec<usize> {
        (0..set.bit_length()).filter(|&i| set.is_set(i)).collect()
    }

    fn naive_or_shift(set: &WordBitSet, shift: usize) -> Vec<usize> {
        let mut out = bits(set);
        for t in bits(set) {
            if t + shift < set.bit_length() {
                out.push(t + shift);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    #[test]
    fn set_and_query() {
        let mut s = WordBitSet::empty(130);
        assert_eq!(s.word_len(), 3);
        s.set(0);
        s.set(64);
        s.set(129);
        assert_eq!(bits(&s), vec![0, 64, 129]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.highest_set_bit(), Some(129));
    }

    #[test]
    fn fallible_constructors() {
        let mut s = WordBitSet::try_empty(100).unwrap();
        s.set(99);
        let copy = s.try_clone().unwrap();
        assert_eq!(copy, s);
        assert!(WordBitSet::try_empty(usize::MAX).is_none());
    }

    #[test]
    fn clone_from_overwrites() {
        let mut a = WordBitSet::empty(80);
        a.set(3);
        let mut b = WordBitSet::empty(80);
        b.set(70);
        a.clone_from(&b);
        assert_eq!(bits(&a), vec![70]);
    }

    #[test]
    fn empty_set_has_no_highest_bit() {
        assert_eq!(WordBitSet::empty(0).highest_set_bit(), None);
        assert_eq!(WordBitSet::empty(70).highest_set_bit(), None);
    }

    #[test]
    fn shift_within_word() {
        let mut s = WordBitSet::empty(11);
        s.set(0);
        s.or_shifted(2, 0);
        s.or_shifted(3, 2);
        s.or_shifted(5, 5);
        assert_eq!(bits(&s), vec![0, 2, 3, 5, 7, 8, 10]);
    }

    #[test]
    fn shift_carries_across_words() {
        for shift in [1usize, 5, 63, 64, 65, 100, 127, 128, 150] {
            let mut s = WordBitSet::empty(200);
            for b in [0usize, 3, 60, 63, 64, 90, 127, 128, 199] {
                s.set(b);
            }
            let expected = naive_or_shift(&s, shift);
            s.or_shifted(shift, 199);
            assert_eq!(bits(&s), expected, "shift {shift}");
        }
    }

    #[test]
    fn shift_truncates_padding() {
        let mut s = WordBitSet::empty(70);
        s.set(60);
        s.or_shifted(9, 60);
        assert_eq!(bits(&s), vec![60, 69]);
        s.or_shifted(10, 69);
        assert_eq!(bits(&s), vec![60, 69]);
        assert_eq!(s.words()[1] >> 6, 0);
    }

    #[test]
    fn oversized_shift_is_noop() {
        let mut s = WordBitSet::empty(10);
        s.set(1);
        assert_eq!(s.or_shifted(10, 1), 0);
        assert_eq!(s.or_shifted(0, 1), 0);
        assert_eq!(bits(&s), vec![1]);
    }
}
