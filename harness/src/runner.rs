//! Harness runner: search a problem and package the result as a report.
//!
//! The runner uses only engine and kernel APIs. It does not order the
//! frontier or judge states itself.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → search() → render path
//!   → search_graph.json (if recorded) → policy.json → outcome.json
//!   → path.txt → build_report()
//! ```

use pathwise_kernel::canon::canonical_json_bytes;
use pathwise_kernel::hash::canonical_hash;
use pathwise_kernel::key::CanonicalState;
use pathwise_search::error::SearchError;
use pathwise_search::policy::SearchPolicy;
use pathwise_search::search::{search, Outcome};
use serde_json::{json, Value};

use crate::config::ConfigError;
use crate::contract::DescribeState;
use crate::report::{
    build_report, ArtifactInput, ReportBuildError, RunReport, DOMAIN_REPORT_ARTIFACT,
    OUTCOME_ARTIFACT, PATH_ARTIFACT, POLICY_ARTIFACT, SEARCH_GRAPH_ARTIFACT,
};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The engine rejected the policy.
    Search(SearchError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
    /// Report assembly failed.
    ReportFailed(ReportBuildError),
    /// The configured problem could not be built.
    Config(ConfigError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::ReportFailed(e) => write!(f, "report assembly failed: {e}"),
            Self::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<ReportBuildError> for RunError {
    fn from(e: ReportBuildError) -> Self {
        Self::ReportFailed(e)
    }
}

/// Termination name shared with `search_graph.json` metadata.
#[must_use]
pub fn termination_name<S>(outcome: &Outcome<S>) -> &'static str {
    match outcome {
        Outcome::Success { .. } => "goal_reached",
        Outcome::Exhausted { .. } => "frontier_exhausted",
        Outcome::LimitExceeded { .. } => "expansion_limit_exceeded",
    }
}

/// Run `problem` under `policy` and assemble a [`RunReport`].
///
/// # Errors
///
/// Returns [`RunError`] if the policy is invalid or an artifact cannot be
/// serialized. Unreachable goals and exhausted budgets are reported inside
/// `outcome.json`, not as errors.
pub fn run_search<P>(problem: &P, policy: &SearchPolicy) -> Result<RunReport, RunError>
where
    P: DescribeState + ?Sized,
{
    let result = search(problem, policy)?;
    let outcome = &result.outcome;

    let mut inputs: Vec<ArtifactInput> = Vec::new();

    let graph_hash = match &result.graph {
        Some(graph) => {
            let bytes = graph.to_canonical_json_bytes().map_err(canon_failed)?;
            let hash = canonical_hash(DOMAIN_REPORT_ARTIFACT, &bytes);
            inputs.push(ArtifactInput {
                name: SEARCH_GRAPH_ARTIFACT.into(),
                content: bytes,
                normative: true,
                precomputed_hash: Some(hash.clone()),
            });
            Some(hash)
        }
        None => None,
    };

    let policy_bytes = canonical_json_bytes(&policy.to_json_value()).map_err(canon_failed)?;
    let policy_hash = canonical_hash(DOMAIN_REPORT_ARTIFACT, &policy_bytes);
    inputs.push(ArtifactInput {
        name: POLICY_ARTIFACT.into(),
        content: policy_bytes,
        normative: true,
        precomputed_hash: Some(policy_hash.clone()),
    });

    let rendered: Option<Vec<String>> = outcome
        .path()
        .map(|path| path.iter().map(|s| problem.describe_state(s)).collect());
    let start = problem.start_state();

    let limit = match outcome {
        Outcome::LimitExceeded { limit, .. } => Some(*limit),
        _ => None,
    };
    let outcome_value = json!({
        "limit": limit,
        "outcome": outcome.kind(),
        "path": rendered,
        "path_length": rendered.as_ref().map(Vec::len),
        "policy_digest": policy_hash.as_str(),
        "problem_id": problem.problem_id(),
        "search_graph_digest": graph_hash.as_ref().map(|h| h.as_str().to_string()),
        "start_key_hex": hex::encode(start.canonical_key().to_bytes()),
        "start_state": problem.describe_state(&start),
        "stats": outcome.stats().to_json_value(),
        "strategy": policy.strategy.as_str(),
        "termination": termination_name(outcome),
        "total_cost": outcome.total_cost(),
    });
    let outcome_bytes = canonical_json_bytes(&outcome_value).map_err(canon_failed)?;
    inputs.push((OUTCOME_ARTIFACT.to_string(), outcome_bytes, true).into());

    inputs.push((PATH_ARTIFACT.to_string(), render_path_text(rendered.as_deref(), outcome), false).into());

    Ok(build_report(inputs)?)
}

fn render_path_text<S>(rendered: Option<&[String]>, outcome: &Outcome<S>) -> Vec<u8> {
    let mut text = String::new();
    match rendered {
        Some(states) => {
            for (step, state) in states.iter().enumerate() {
                text.push_str(&format!("{step:>4}  {state}\n"));
            }
            if let Some(cost) = outcome.total_cost() {
                text.push_str(&format!("total cost: {cost}\n"));
            }
        }
        None => text.push_str(&format!("no path ({})\n", outcome.kind())),
    }
    text.into_bytes()
}

fn canon_failed(e: impl std::fmt::Display) -> RunError {
    RunError::CanonFailed {
        detail: e.to_string(),
    }
}

/// Parsed `outcome.json` of a report, or `Value::Null` when absent.
#[must_use]
pub fn outcome_json(report: &RunReport) -> Value {
    report.json(OUTCOME_ARTIFACT).unwrap_or(Value::Null)
}
