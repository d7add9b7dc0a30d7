//! Search entry point and expansion loop.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};

use crate::closed::ClosedSet;
use crate::contract::{SearchProblem, Successor};
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::graph::{
    ExpandEvent, SearchGraph, SearchGraphMetadata, SuccessorOutcome, SuccessorRecord,
    TerminationReason,
};
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::stats::SearchStatistics;

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<S> {
    /// A goal state was closed. `path` runs from the start state to the goal.
    Success {
        path: Vec<S>,
        total_cost: i64,
        stats: SearchStatistics,
    },
    /// The frontier emptied: no goal is reachable from the start state.
    Exhausted { stats: SearchStatistics },
    /// The expansion ceiling was reached before the search could finish.
    /// Nothing is proven about reachability.
    LimitExceeded {
        limit: u64,
        stats: SearchStatistics,
    },
}

impl<S> Outcome<S> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The solution path, if the search succeeded.
    #[must_use]
    pub fn path(&self) -> Option<&[S]> {
        match self {
            Self::Success { path, .. } => Some(path),
            _ => None,
        }
    }

    #[must_use]
    pub fn total_cost(&self) -> Option<i64> {
        match self {
            Self::Success { total_cost, .. } => Some(*total_cost),
            _ => None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStatistics {
        match self {
            Self::Success { stats, .. }
            | Self::Exhausted { stats }
            | Self::LimitExceeded { stats, .. } => stats,
        }
    }

    /// Stable name: `"success"`, `"exhausted"` or `"limit_exceeded"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Exhausted { .. } => "exhausted",
            Self::LimitExceeded { .. } => "limit_exceeded",
        }
    }
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    pub outcome: Outcome<S>,
    /// Audit trail, present when the policy asked for it.
    pub graph: Option<SearchGraph>,
}

/// Run best-first search over `problem`.
///
/// The loop pops the lowest-keyed node, drops it if its state is already
/// closed, closes it, tests it against the goal, and otherwise pushes every
/// successor whose state is not closed. Reaching an empty frontier yields
/// [`Outcome::Exhausted`]; hitting `policy.max_expansions` yields
/// [`Outcome::LimitExceeded`].
///
/// Closed states are never reopened, so the returned cost is optimal only
/// under a consistent heuristic (or none). Strategies that ignore the
/// heuristic never call [`SearchProblem::heuristic`]; their nodes carry
/// `h = 0`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
/// [`SearchError::EmptyFrontier`] would indicate a bug in this loop.
pub fn search<P>(problem: &P, policy: &SearchPolicy) -> Result<SearchResult<P::State>, SearchError>
where
    P: SearchProblem + ?Sized,
{
    policy.validate()?;

    #[cfg(feature = "tracing")]
    let span = tracing::info_span!(
        "search",
        problem = problem.problem_id(),
        strategy = policy.strategy.as_str()
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut frontier: Frontier<P::State> = Frontier::new(policy.strategy);
    let mut closed = ClosedSet::new();
    let mut expanded: Vec<SearchNode<P::State>> = Vec::new();
    let mut events: Vec<ExpandEvent> = Vec::new();
    let mut stats = SearchStatistics::default();
    let mut next_node_id: u64 = 0;

    let estimate = |state: &P::State| {
        if policy.strategy.uses_heuristic() {
            problem.heuristic(state)
        } else {
            0
        }
    };

    let start = problem.start_state();
    let start_h = estimate(&start);
    note_heuristic(start_h, next_node_id);
    let root = SearchNode::new(next_node_id, None, start, 0, 0, start_h);
    next_node_id += 1;
    let root_fingerprint = root.key().fingerprint().hex_digest().to_string();
    frontier.push(root);
    stats.nodes_generated += 1;

    let termination = loop {
        if frontier.is_empty() {
            break TerminationReason::FrontierExhausted;
        }
        let current = frontier.pop()?;

        // Lazy deletion: a stale copy of an already-closed state.
        if closed.contains(current.key()) {
            stats.stale_pops += 1;
            continue;
        }

        if let Some(limit) = policy.max_expansions {
            if stats.nodes_expanded >= limit {
                break TerminationReason::ExpansionLimitExceeded { limit };
            }
        }

        closed.insert(current.key().clone());
        stats.nodes_expanded += 1;
        let slot = expanded.len();
        let pop_key = policy.strategy.frontier_key(&current);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id = current.node_id(),
            g = current.g_cost(),
            h = current.h_cost(),
            priority = pop_key.priority,
            frontier = frontier.len(),
            "expand"
        );

        if problem.is_goal(current.state()) {
            let node_id = current.node_id();
            if policy.record_graph {
                events.push(expand_event(&current, slot, pop_key, &expanded, Vec::new()));
            }
            expanded.push(current);
            break TerminationReason::GoalReached { node_id };
        }

        let mut records = Vec::new();
        for (index, Successor { state, cost }) in problem
            .successors(current.state())
            .into_iter()
            .enumerate()
        {
            let key = state.canonical_key();
            if closed.contains(&key) {
                stats.successors_suppressed += 1;
                if policy.record_graph {
                    records.push(SuccessorRecord {
                        index: index as u64,
                        step_cost: cost,
                        outcome: SuccessorOutcome::ClosedSuppressed {
                            existing_fingerprint: fingerprint_hex(&key),
                        },
                    });
                }
                continue;
            }

            let h_cost = estimate(&state);
            note_heuristic(h_cost, next_node_id);
            let child = SearchNode::with_key(
                next_node_id,
                Some(slot),
                state,
                key,
                current.depth() + 1,
                current.g_cost().saturating_add(cost),
                h_cost,
            );
            if policy.record_graph {
                records.push(SuccessorRecord {
                    index: index as u64,
                    step_cost: cost,
                    outcome: SuccessorOutcome::Pushed {
                        to_node: next_node_id,
                    },
                });
            }
            next_node_id += 1;
            frontier.push(child);
            stats.nodes_generated += 1;
        }

        if policy.record_graph {
            events.push(expand_event(&current, slot, pop_key, &expanded, records));
        }
        expanded.push(current);
    };

    stats.max_frontier_size = frontier.high_water() as u64;

    #[cfg(feature = "tracing")]
    tracing::info!(
        termination = termination.as_str(),
        nodes_expanded = stats.nodes_expanded,
        max_frontier_size = stats.max_frontier_size,
        "search finished"
    );

    let outcome = match termination {
        TerminationReason::GoalReached { .. } => {
            let goal_slot = expanded.len() - 1;
            Outcome::Success {
                path: reconstruct_path(&expanded, goal_slot),
                total_cost: expanded[goal_slot].g_cost(),
                stats,
            }
        }
        TerminationReason::FrontierExhausted => Outcome::Exhausted { stats },
        TerminationReason::ExpansionLimitExceeded { limit } => {
            Outcome::LimitExceeded { limit, stats }
        }
    };

    let graph = policy.record_graph.then(|| SearchGraph {
        expansions: events,
        metadata: SearchGraphMetadata {
            problem_id: problem.problem_id().to_string(),
            strategy: policy.strategy,
            root_state_fingerprint: root_fingerprint,
            max_expansions: policy.max_expansions,
            stats,
            termination_reason: termination,
        },
    });

    Ok(SearchResult { outcome, graph })
}

/// Reconstruct the path from the root to the node in `goal_slot`.
///
/// `expanded` is the run's expansion arena: slot `i` holds the `i`-th closed
/// node, and every node's `parent` names an earlier slot.
///
/// # Panics
///
/// Panics if `goal_slot` or any parent slot is out of range, which cannot
/// happen for an arena built by [`search`].
#[must_use]
pub fn reconstruct_path<S: Clone>(expanded: &[SearchNode<S>], goal_slot: usize) -> Vec<S> {
    let mut path = Vec::new();
    let mut slot = Some(goal_slot);

    while let Some(i) = slot {
        let node = &expanded[i];
        path.push(node.state().clone());
        slot = node.parent();
    }

    path.reverse();
    path
}

fn expand_event<S>(
    node: &SearchNode<S>,
    slot: usize,
    pop_key: crate::node::FrontierKey,
    expanded: &[SearchNode<S>],
    successors: Vec<SuccessorRecord>,
) -> ExpandEvent {
    ExpandEvent {
        expansion_order: slot as u64,
        node_id: node.node_id(),
        parent_node_id: node.parent().map(|p| expanded[p].node_id()),
        state_fingerprint: fingerprint_hex(node.key()),
        pop_key,
        g_cost: node.g_cost(),
        h_cost: node.h_cost(),
        successors,
    }
}

fn fingerprint_hex(key: &CanonicalKey) -> String {
    key.fingerprint().hex_digest().to_string()
}

/// Negative heuristic values are tolerated; they only void optimality.
fn note_heuristic(h_cost: i64, node_id: u64) {
    #[cfg(feature = "tracing")]
    if h_cost < 0 {
        tracing::warn!(node_id, h_cost, "negative heuristic value");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (h_cost, node_id);
}
