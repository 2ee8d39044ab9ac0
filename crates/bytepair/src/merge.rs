//! # Pair Merge Engine

use crate::types::{Pair, TokenType};

/// Replace every non-overlapping occurrence of `pair` with `replacement`.
///
/// Scans left to right; once a match is consumed at position `i`, scanning
/// resumes at `i + 2`, so overlapping occurrences are not double-merged:
/// merging `(a, a)` in `[a, a, a]` yields `[new, a]`. The input is not
/// mutated.
pub fn merge_pair<T: TokenType>(
    ids: &[T],
    pair: Pair<T>,
    replacement: T,
) -> Vec<T> {
    let n = ids.len();
    let mut out = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        if i + 1 < n && pair == (ids[i], ids[i + 1]) {
            out.push(replacement);
            i += 2;
        } else {
            out.push(ids[i]);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_pair() {
        type T = u32;

        let ids: Vec<T> = vec![1, 2, 3, 1, 2, 2, 1];
        let merged = merge_pair(&ids, (1, 2), 300);

        assert_eq!(merged, vec![300, 3, 300, 2, 1]);
        // Input untouched.
        assert_eq!(ids, vec![1, 2, 3, 1, 2, 2, 1]);
    }

    #[test]
    fn test_merge_pair_no_overlap() {
        type T = u32;

        // Only the first occurrence of (5, 5) merges; scan resumes past it.
        let merged = merge_pair::<T>(&[5, 5, 5], (5, 5), 9);
        assert_eq!(merged, vec![9, 5]);

        let merged = merge_pair::<T>(&[5, 5, 5, 5], (5, 5), 9);
        assert_eq!(merged, vec![9, 9]);
    }

    #[test]
    fn test_merge_pair_absent() {
        type T = u32;

        let merged = merge_pair::<T>(&[1, 2, 3], (7, 8), 300);
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_pair_short_inputs() {
        type T = u32;

        assert_eq!(merge_pair::<T>(&[], (1, 2), 300), Vec::<T>::new());
        assert_eq!(merge_pair::<T>(&[1], (1, 2), 300), vec![1]);
    }
}
