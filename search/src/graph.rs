//! `SearchGraph`: expansion-event audit log.
//!
//! The ordered list of [`ExpandEvent`]s is the decision record of a run: which
//! node was closed at each step, under which key, and what happened to each
//! of its successors. Two runs with identical inputs must produce identical
//! canonical bytes.

use pathwise_kernel::canon::{canonical_json_bytes, CanonError};
use pathwise_kernel::hash::{canonical_hash, ContentHash, HashDomain};
use serde_json::{json, Value};

use crate::node::FrontierKey;
use crate::stats::SearchStatistics;
use crate::strategy::SearchStrategy;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// Expansion events in closing order.
    pub expansions: Vec<ExpandEvent>,
    pub metadata: SearchGraphMetadata,
}

/// One frontier pop that closed a new state.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Position in closing order (the node's expansion slot).
    pub expansion_order: u64,
    pub node_id: u64,
    /// `None` for the root.
    pub parent_node_id: Option<u64>,
    /// Hex fingerprint of the node's canonical key.
    pub state_fingerprint: String,
    /// Frontier key at pop time.
    pub pop_key: FrontierKey,
    pub g_cost: i64,
    pub h_cost: i64,
    /// Successor decision log, in the order the problem produced them.
    /// Empty for the goal node, which is never expanded.
    pub successors: Vec<SuccessorRecord>,
}

/// A successor with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecord {
    /// Index in the problem's successor list.
    pub index: u64,
    pub step_cost: i64,
    pub outcome: SuccessorOutcome,
}

/// What happened to a successor during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessorOutcome {
    /// Pushed to the frontier as a new node.
    Pushed { to_node: u64 },
    /// Its state was already closed (first-closed wins).
    ClosedSuppressed { existing_fingerprint: String },
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub problem_id: String,
    pub strategy: SearchStrategy,
    pub root_state_fingerprint: String,
    pub max_expansions: Option<u64>,
    pub stats: SearchStatistics,
    pub termination_reason: TerminationReason,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal state was closed.
    GoalReached { node_id: u64 },
    /// The frontier emptied without reaching a goal.
    FrontierExhausted,
    /// The expansion ceiling was hit before the search completed.
    ExpansionLimitExceeded { limit: u64 },
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionLimitExceeded { .. } => "expansion_limit_exceeded",
        }
    }
}

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes under [`HashDomain::SearchGraph`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }

    /// Node ids in closing order.
    #[must_use]
    pub fn expansion_order(&self) -> Vec<u64> {
        self.expansions.iter().map(|e| e.node_id).collect()
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> Value {
    json!({
        "expansion_order": e.expansion_order,
        "g_cost": e.g_cost,
        "h_cost": e.h_cost,
        "node_id": e.node_id,
        "parent_node_id": e.parent_node_id,
        "pop_key": {
            "priority": e.pop_key.priority,
            "sequence": e.pop_key.sequence,
        },
        "state_fingerprint": e.state_fingerprint,
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json(r: &SuccessorRecord) -> Value {
    let outcome = match &r.outcome {
        SuccessorOutcome::Pushed { to_node } => json!({"to_node": to_node, "type": "pushed"}),
        SuccessorOutcome::ClosedSuppressed {
            existing_fingerprint,
        } => json!({
            "existing_fingerprint": existing_fingerprint,
            "type": "closed_suppressed",
        }),
    };
    json!({
        "index": r.index,
        "outcome": outcome,
        "step_cost": r.step_cost,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> Value {
    json!({
        "max_expansions": m.max_expansions,
        "problem_id": m.problem_id,
        "root_state_fingerprint": m.root_state_fingerprint,
        "stats": m.stats.to_json_value(),
        "strategy": m.strategy.as_str(),
        "termination_reason": termination_reason_to_json(m.termination_reason),
    })
}

fn termination_reason_to_json(r: TerminationReason) -> Value {
    match r {
        TerminationReason::GoalReached { node_id } => {
            json!({"node_id": node_id, "type": r.as_str()})
        }
        TerminationReason::FrontierExhausted => json!({"type": r.as_str()}),
        TerminationReason::ExpansionLimitExceeded { limit } => {
            json!({"limit": limit, "type": r.as_str()})
        }
    }
}
