//! Search policy: strategy selection and budgets.

use serde_json::{json, Value};

use crate::error::SearchError;
use crate::strategy::SearchStrategy;

/// Configuration for one `search()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Frontier ordering rule.
    pub strategy: SearchStrategy,
    /// Ceiling on distinct states expanded. `None` runs to completion.
    pub max_expansions: Option<u64>,
    /// Record a [`crate::graph::SearchGraph`] audit trail.
    pub record_graph: bool,
}

impl SearchPolicy {
    #[must_use]
    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion ceiling,
    /// which could never expand even the start state.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// JSON projection used in digests and run configs.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "max_expansions": self.max_expansions,
            "record_graph": self.record_graph,
            "strategy": self.strategy.as_str(),
        })
    }

    /// Parse a policy from its JSON projection. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for unknown strategy names or
    /// fields of the wrong type, and for anything [`Self::validate`] rejects.
    pub fn from_json_value(value: &Value) -> Result<Self, SearchError> {
        let obj = value.as_object().ok_or_else(|| SearchError::InvalidPolicy {
            detail: "policy must be a JSON object".into(),
        })?;
        let mut policy = Self::default();

        if let Some(v) = obj.get("strategy") {
            let name = v.as_str().ok_or_else(|| invalid("strategy must be a string"))?;
            policy.strategy = SearchStrategy::parse(name)
                .ok_or_else(|| invalid(&format!("unknown strategy {name:?}")))?;
        }
        match obj.get("max_expansions") {
            None | Some(Value::Null) => {}
            Some(v) => {
                let limit = v
                    .as_u64()
                    .ok_or_else(|| invalid("max_expansions must be a non-negative integer"))?;
                policy.max_expansions = Some(limit);
            }
        }
        if let Some(v) = obj.get("record_graph") {
            policy.record_graph = v
                .as_bool()
                .ok_or_else(|| invalid("record_graph must be a boolean"))?;
        }

        policy.validate()?;
        Ok(policy)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::AStar,
            max_expansions: None,
            record_graph: true,
        }
    }
}

fn invalid(detail: &str) -> SearchError {
    SearchError::InvalidPolicy {
        detail: detail.to_string(),
    }
}
