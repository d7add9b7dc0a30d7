//! Closed set of expanded state keys.
//!
//! Backed by a `BTreeSet` (not `HashSet`) so iteration order is stable
//! wherever the set is inspected or serialized.

use std::collections::BTreeSet;

use pathwise_kernel::key::CanonicalKey;

/// Keys of states that have been expanded in one search run.
///
/// Grows monotonically: a key, once inserted, is never removed, and the
/// state it names is never expanded again. The first closed cost wins.
#[derive(Debug, Default)]
pub struct ClosedSet {
    keys: BTreeSet<CanonicalKey>,
}

impl ClosedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close `key`. Returns `false` if it was already closed.
    pub fn insert(&mut self, key: CanonicalKey) -> bool {
        self.keys.insert(key)
    }

    #[must_use]
    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Closed keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.keys.iter()
    }
}
