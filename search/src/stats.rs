//! Per-run counters.

use serde_json::{json, Value};

/// Counters owned by a single `search()` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Distinct states added to the closed set.
    pub nodes_expanded: u64,
    /// Nodes pushed onto the frontier, root included.
    pub nodes_generated: u64,
    /// Popped nodes discarded because their state was already closed.
    pub stale_pops: u64,
    /// Successors not pushed because their state was already closed.
    pub successors_suppressed: u64,
    /// Largest frontier size observed.
    pub max_frontier_size: u64,
}

impl SearchStatistics {
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "max_frontier_size": self.max_frontier_size,
            "nodes_expanded": self.nodes_expanded,
            "nodes_generated": self.nodes_generated,
            "stale_pops": self.stale_pops,
            "successors_suppressed": self.successors_suppressed,
        })
    }
}
