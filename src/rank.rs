//! Rank type and rank-bound utilities.
//!
//! # Why u8?
//!
//! The rank of a node is its number of children. In a forest built by
//! consolidation and cascading cuts, a node of rank `k` roots a subtree of
//! at least `F(k+2)` nodes, where `F` is the Fibonacci sequence. The maximum
//! rank is therefore bounded by `log_φ(n) ≈ 1.44 · log₂(n)`:
//!
//! - 2⁶⁴ elements → max rank ~92
//!
//! `u8` covers that with room to spare and keeps the node record small.
//!
//! # Bucket counts
//!
//! Consolidation needs one bucket per possible rank. [`max_rank`] returns
//! that bucket count for a forest of a given size; [`binary_bound`],
//! [`fibonacci_bound`] and [`sqrt_bound`] are the individual formulas it and
//! the experiment strategy are built from.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This should never happen in practice since
/// it would require a forest with more than `F(257)` elements.
///
/// # Example
///
/// ```rust
/// use priority_forest::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: this should be impossible since max rank is log_φ(n) \
         and u8::MAX (255) supports forests with up to F(257) elements",
    )
}

/// Safely decrement a rank value, panicking on underflow.
///
/// Only `remove` decrements a rank, and only on a parent that still has the
/// removed child, so an underflow means the rank no longer matches the
/// child ring.
///
/// # Panics
///
/// Panics if `rank == 0`.
#[inline]
pub fn checked_decrement(rank: Rank) -> Rank {
    rank.checked_sub(1).expect("rank underflow: removed a child from a node of rank 0")
}

/// Smallest `r >= 1` with `2^r > size`.
///
/// This is the classic bucket count for binomial-style consolidation.
///
/// ```rust
/// use priority_forest::rank::binary_bound;
///
/// assert_eq!(binary_bound(0), 1);
/// assert_eq!(binary_bound(1), 1);
/// assert_eq!(binary_bound(2), 2);
/// assert_eq!(binary_bound(7), 3);
/// assert_eq!(binary_bound(8), 4);
/// ```
#[inline]
pub fn binary_bound(size: usize) -> usize {
    let mut r = 1;
    while r < usize::BITS as usize && (1usize << r) <= size {
        r += 1;
    }
    r
}

/// One more than the largest `k` with `F(k+2) <= size` (at least 1).
///
/// A tree of rank `k` holds at least `F(k+2)` nodes, so no tree of a forest
/// with `size` nodes can have a rank at or above this bound.
///
/// ```rust
/// use priority_forest::rank::fibonacci_bound;
///
/// assert_eq!(fibonacci_bound(0), 1);
/// assert_eq!(fibonacci_bound(1), 1);
/// assert_eq!(fibonacci_bound(2), 2);
/// assert_eq!(fibonacci_bound(5), 4);
/// ```
pub fn fibonacci_bound(size: usize) -> usize {
    // (a, b) = (F(k+2), F(k+3)), starting at k = 0
    let (mut a, mut b) = (1usize, 2usize);
    let mut k = 0;
    while b <= size {
        k += 1;
        match a.checked_add(b) {
            Some(next) => {
                a = b;
                b = next;
            }
            // F(k+3) does not fit in usize, so it exceeds any size
            None => return k + 1,
        }
    }
    if a <= size {
        k + 1
    } else {
        1
    }
}

/// `floor(sqrt(2 * max_size)) + 2`.
///
/// Without cascading cuts a tree of rank `k` may shrink to `k + 1` nodes,
/// but building it took `k(k+1)/2` insertions, hence the square root.
pub fn sqrt_bound(max_size: usize) -> usize {
    let target = max_size.saturating_mul(2);
    let mut root = 0usize;
    while (root + 1).saturating_mul(root + 1) <= target {
        root += 1;
    }
    root + 2
}

/// Bucket count used by the default consolidation for a forest of `size`
/// nodes: the larger of [`binary_bound`] and [`fibonacci_bound`].
#[inline]
pub fn max_rank(size: usize) -> usize {
    binary_bound(size).max(fibonacci_bound(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fibonacci(n: usize) -> usize {
        let (mut a, mut b) = (0usize, 1usize);
        for _ in 0..n {
            let next = a + b;
            a = b;
            b = next;
        }
        a
    }

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(127), 128);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(MAX_RANK);
    }

    #[test]
    fn test_checked_decrement() {
        assert_eq!(checked_decrement(5), 4);
        assert_eq!(checked_decrement(1), 0);
    }

    #[test]
    #[should_panic(expected = "rank underflow")]
    fn test_checked_decrement_underflow() {
        checked_decrement(0);
    }

    #[test]
    fn test_binary_bound_matches_definition() {
        for size in 0..1000usize {
            let r = binary_bound(size);
            assert!(r >= 1);
            assert!((1usize << r) > size);
            if r > 1 {
                assert!((1usize << (r - 1)) <= size);
            }
        }
    }

    #[test]
    fn test_fibonacci_bound_matches_definition() {
        for size in 1..1000usize {
            let bound = fibonacci_bound(size);
            // rank bound - 1 is still possible, rank bound is not
            assert!(fibonacci(bound + 1) <= size, "size {size}");
            assert!(fibonacci(bound + 2) > size, "size {size}");
        }
    }

    #[test]
    fn test_fibonacci_bound_covers_sparse_trees() {
        // rank 3 needs only F(5) = 5 nodes, one more rank than log2 allows
        assert_eq!(binary_bound(5), 3);
        assert_eq!(fibonacci_bound(5), 4);
        assert_eq!(max_rank(5), 4);
    }

    #[test]
    fn test_max_rank_never_below_binary() {
        for size in 0..5000usize {
            assert!(max_rank(size) >= binary_bound(size));
        }
    }

    #[test]
    fn test_sqrt_bound() {
        assert_eq!(sqrt_bound(0), 2);
        assert_eq!(sqrt_bound(2), 4);
        assert_eq!(sqrt_bound(8), 6);
        assert_eq!(sqrt_bound(50), 12);
    }

    #[test]
    fn test_max_rank_sufficient() {
        assert!(max_rank(usize::MAX) < MAX_RANK as usize);
        assert_eq!(std::mem::size_of::<Rank>(), 1);
    }
}
