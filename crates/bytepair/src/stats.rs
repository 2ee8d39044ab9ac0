//! # Adjacent Pair Statistics

use crate::types::{Pair, TokenType};
use ahash::AHashMap;
use core::cmp::Reverse;

/// Accumulating frequency table over adjacent token pairs.
///
/// Chunks are folded in independently; no pair is ever counted across a
/// chunk boundary. Alongside each count, the corpus position at which a
/// pair was first observed is recorded, so that maximum-frequency selection
/// stays deterministic when several pairs tie.
#[derive(Debug, Clone)]
pub struct PairStats<T: TokenType> {
    counts: AHashMap<Pair<T>, u64>,
    first_seen: AHashMap<Pair<T>, u64>,
    cursor: u64,
}

impl<T: TokenType> PairStats<T> {
    /// Create an empty frequency table.
    pub fn new() -> Self {
        Self {
            counts: AHashMap::new(),
            first_seen: AHashMap::new(),
            cursor: 0,
        }
    }

    /// The number of distinct pairs observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no pair has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The observed count for a pair.
    pub fn count(
        &self,
        pair: Pair<T>,
    ) -> u64 {
        self.counts.get(&pair).copied().unwrap_or(0)
    }

    /// Fold one chunk's adjacent pairs into the table.
    ///
    /// O(n) in the chunk length. Chunks shorter than two ids contribute
    /// nothing.
    pub fn update_from_chunk(
        &mut self,
        ids: &[T],
    ) {
        for w in ids.windows(2) {
            let pair = (w[0], w[1]);
            *self.counts.entry(pair).or_default() += 1;
            self.first_seen.entry(pair).or_insert(self.cursor);
            self.cursor += 1;
        }
    }

    /// The pair with the maximum count.
    ///
    /// Ties break to the pair first observed earliest in fold order, which
    /// equals corpus order when chunks are folded in corpus order. This
    /// keeps round selection identical across platforms and hash seeds.
    pub fn top_pair(&self) -> Option<Pair<T>> {
        self.counts
            .iter()
            .max_by_key(|(pair, &count)| {
                let seen = self.first_seen.get(*pair).copied().unwrap_or(u64::MAX);
                (count, Reverse(seen))
            })
            .map(|(&pair, _)| pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_chunk() {
        type T = u32;

        let mut stats = PairStats::<T>::new();
        assert!(stats.is_empty());
        assert_eq!(stats.top_pair(), None);

        stats.update_from_chunk(&[1, 2, 3, 1, 2]);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.count((1, 2)), 2);
        assert_eq!(stats.count((2, 3)), 1);
        assert_eq!(stats.count((3, 1)), 1);
        assert_eq!(stats.count((9, 9)), 0);
    }

    #[test]
    fn test_no_pair_crosses_chunks() {
        type T = u32;

        let mut stats = PairStats::<T>::new();
        stats.update_from_chunk(&[1, 2]);
        stats.update_from_chunk(&[3, 4]);

        // (2, 3) spans the boundary and must not be counted.
        assert_eq!(stats.count((2, 3)), 0);
        assert_eq!(stats.count((1, 2)), 1);
        assert_eq!(stats.count((3, 4)), 1);
    }

    #[test]
    fn test_short_chunks_contribute_nothing() {
        type T = u32;

        let mut stats = PairStats::<T>::new();
        stats.update_from_chunk(&[]);
        stats.update_from_chunk(&[7]);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_top_pair_max_count() {
        type T = u32;

        let mut stats = PairStats::<T>::new();
        stats.update_from_chunk(&[5, 6, 5, 6, 9]);
        assert_eq!(stats.top_pair(), Some((5, 6)));
    }

    #[test]
    fn test_top_pair_tie_breaks_to_first_seen() {
        type T = u32;

        // (8, 9) and (1, 2) both occur twice; (8, 9) is seen first.
        let mut stats = PairStats::<T>::new();
        stats.update_from_chunk(&[8, 9, 8, 9]);
        stats.update_from_chunk(&[1, 2, 1, 2]);
        assert_eq!(stats.top_pair(), Some((8, 9)));

        // Fold order decides, not pair value order.
        let mut stats = PairStats::<T>::new();
        stats.update_from_chunk(&[1, 2, 1, 2]);
        stats.update_from_chunk(&[8, 9, 8, 9]);
        assert_eq!(stats.top_pair(), Some((1, 2)));
    }
}
