//! Coinductive cycle handling for recursive type comparisons.
//!
//! Structural comparison of recursive type definitions cannot terminate by
//! unrolling: a struct whose field references its own type would be compared
//! forever. [`CoinductionGuard`] makes the descent finite by recording every
//! pair of definitions currently assumed equal; re-encountering a recorded
//! pair means the comparison has come back around to an assumption already
//! in force, and the correct coinductive answer is "equal unless a
//! contradiction is found elsewhere".
//!
//! Assumptions are never retracted within one query: once a pair has been
//! assumed, any later encounter of the same pair (on any path) resolves the
//! same way. The guard is transient working memory, created per query and
//! dropped with it; nothing is retained between queries.
//!
//! Unlike depth- or iteration-limited guards, this one imposes no limits.
//! Termination is guaranteed by the memo itself: there are finitely many
//! definition pairs, and each is descended into at most once.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Outcome of [`CoinductionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coinduction {
    /// First encounter; descend into the pair's structure.
    Entered,
    /// Already assumed equal on this query; do not descend again.
    Assumed,
}

impl Coinduction {
    #[inline]
    pub fn is_assumed(self) -> bool {
        matches!(self, Self::Assumed)
    }
}

/// Set of keys assumed "related" for the duration of one query.
#[derive(Debug)]
pub struct CoinductionGuard<K: Hash + Eq + Copy> {
    assumed: FxHashSet<K>,
}

impl<K: Hash + Eq + Copy> CoinductionGuard<K> {
    pub fn new() -> Self {
        Self {
            assumed: FxHashSet::default(),
        }
    }

    /// Record `key` as assumed.
    ///
    /// Returns [`Coinduction::Assumed`] if the key was already recorded, in
    /// which case the caller must treat the pair as related without
    /// descending further.
    pub fn enter(&mut self, key: K) -> Coinduction {
        if self.assumed.insert(key) {
            Coinduction::Entered
        } else {
            Coinduction::Assumed
        }
    }

    /// Drop every assumption.
    ///
    /// Needed between top-level queries: a failed comparison leaves behind
    /// assumptions that were never verified, and they must not leak into
    /// the next query.
    pub fn clear(&mut self) {
        self.assumed.clear();
    }

    /// Number of assumptions currently in force.
    pub fn len(&self) -> usize {
        self.assumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assumed.is_empty()
    }
}

impl<K: Hash + Eq + Copy> Default for CoinductionGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_descends() {
        let mut guard = CoinductionGuard::new();
        assert_eq!(guard.enter((0u32, 1u32)), Coinduction::Entered);
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn second_entry_is_assumed() {
        let mut guard = CoinductionGuard::new();
        guard.enter((0u32, 1u32));
        assert!(guard.enter((0u32, 1u32)).is_assumed());
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn distinct_keys_are_independent() {
        let mut guard = CoinductionGuard::new();
        guard.enter((0u32, 1u32));
        assert_eq!(guard.enter((1u32, 0u32)), Coinduction::Entered);
        assert_eq!(guard.len(), 2);
    }
}
