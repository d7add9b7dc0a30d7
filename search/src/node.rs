//! Search node and frontier ordering key.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};

/// An immutable search node.
///
/// `node_id` is assigned from a per-run counter at creation, so it doubles as
/// the insertion sequence used to break priority ties. `parent` is the
/// expansion slot of the node that generated this one (see
/// [`crate::search::reconstruct_path`]); it is never used for ordering.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    node_id: u64,
    parent: Option<usize>,
    state: S,
    key: CanonicalKey,
    depth: u32,
    g_cost: i64,
    h_cost: i64,
}

impl<S: CanonicalState> SearchNode<S> {
    /// Build a node. The canonical key is derived from `state` here, once.
    #[must_use]
    pub fn new(
        node_id: u64,
        parent: Option<usize>,
        state: S,
        depth: u32,
        g_cost: i64,
        h_cost: i64,
    ) -> Self {
        let key = state.canonical_key();
        Self::with_key(node_id, parent, state, key, depth, g_cost, h_cost)
    }
}

impl<S> SearchNode<S> {
    /// Build a node whose key the caller already computed from `state`.
    pub(crate) fn with_key(
        node_id: u64,
        parent: Option<usize>,
        state: S,
        key: CanonicalKey,
        depth: u32,
        g_cost: i64,
        h_cost: i64,
    ) -> Self {
        Self {
            node_id,
            parent,
            state,
            key,
            depth,
            g_cost,
            h_cost,
        }
    }

    #[must_use]
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Expansion slot of the parent (`None` for the root).
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Tree depth (root = 0).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Accumulated path cost from the start state.
    #[must_use]
    pub fn g_cost(&self) -> i64 {
        self.g_cost
    }

    /// Heuristic estimate to a goal.
    #[must_use]
    pub fn h_cost(&self) -> i64 {
        self.h_cost
    }

    /// `g + h`, the A* evaluation.
    #[must_use]
    pub fn f_cost(&self) -> i64 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// The frontier ordering key: `(priority, sequence)`.
///
/// Lower priority first; ties go to the older node (smaller sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub priority: i64,
    pub sequence: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}
