//! Best-first frontier.
//!
//! A priority multiset of nodes. The frontier does not deduplicate: the same
//! state may sit here several times at different costs, and the closed set
//! drops the stale copies when they are popped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::SearchError;
use crate::node::{FrontierKey, SearchNode};
use crate::strategy::SearchStrategy;

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest key first.
#[derive(Debug)]
struct FrontierEntry<S> {
    key: Reverse<FrontierKey>,
    node: SearchNode<S>,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier ordered by a [`SearchStrategy`].
#[derive(Debug)]
pub struct Frontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    strategy: SearchStrategy,
    high_water: usize,
}

impl<S> Frontier<S> {
    #[must_use]
    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            heap: BinaryHeap::new(),
            strategy,
            high_water: 0,
        }
    }

    /// Insert a node in O(log n).
    pub fn push(&mut self, node: SearchNode<S>) {
        let key = self.strategy.frontier_key(&node);
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the node with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyFrontier`] if the frontier is empty.
    pub fn pop(&mut self) -> Result<SearchNode<S>, SearchError> {
        self.heap
            .pop()
            .map(|entry| entry.node)
            .ok_or(SearchError::EmptyFrontier)
    }

    /// Key of the node `pop` would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|entry| entry.key.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }
}
