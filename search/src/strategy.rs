//! Ordering rules for the frontier.
//!
//! One [`SearchNode`] type serves every strategy; the strategy only decides
//! how a node's `g`, `h` and depth collapse into a frontier priority.

use crate::node::{FrontierKey, SearchNode};

/// Which evaluation function orders the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// `f = g + h`.
    #[default]
    AStar,
    /// `f = h` (pure greedy best-first).
    GreedyBestFirst,
    /// `f = g`; the heuristic is ignored.
    UniformCost,
    /// `f = depth`; costs and heuristic are ignored.
    BreadthFirst,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 4] = [
        Self::AStar,
        Self::GreedyBestFirst,
        Self::UniformCost,
        Self::BreadthFirst,
    ];

    /// Collapse node costs into a frontier priority.
    #[must_use]
    pub fn priority(self, g_cost: i64, h_cost: i64, depth: u32) -> i64 {
        match self {
            Self::AStar => g_cost.saturating_add(h_cost),
            Self::GreedyBestFirst => h_cost,
            Self::UniformCost => g_cost,
            Self::BreadthFirst => i64::from(depth),
        }
    }

    /// The ordering key for `node` under this strategy.
    #[must_use]
    pub fn frontier_key<S>(self, node: &SearchNode<S>) -> FrontierKey {
        FrontierKey {
            priority: self.priority(node.g_cost(), node.h_cost(), node.depth()),
            sequence: node.node_id(),
        }
    }

    /// Whether the heuristic participates in ordering.
    #[must_use]
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Self::AStar | Self::GreedyBestFirst)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "a_star",
            Self::GreedyBestFirst => "greedy_best_first",
            Self::UniformCost => "uniform_cost",
            Self::BreadthFirst => "breadth_first",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
