//! Shared test helpers for mutating and rebuilding run reports.
//!
//! These helpers keep digests consistent when modifying artifacts, so a
//! negative test trips the semantic check it targets instead of a plain
//! content-hash mismatch.

use pathwise_harness::report::{
    build_report, RunReport, DOMAIN_REPORT_ARTIFACT, OUTCOME_ARTIFACT, SEARCH_GRAPH_ARTIFACT,
};
use pathwise_kernel::canon::canonical_json_bytes;
use pathwise_kernel::hash::canonical_hash;

/// Modify `search_graph.json` and rebuild with `outcome.json` re-bound to the
/// modified graph's hash, so only the graph/outcome agreement check can fire.
///
/// # Panics
///
/// Panics if the report lacks `search_graph.json` or `outcome.json`, or if
/// either is not valid JSON.
pub fn rebuild_with_modified_graph(
    report: &RunReport,
    modify: impl FnOnce(&mut serde_json::Value),
) -> RunReport {
    let mut graph_json = report
        .json(SEARCH_GRAPH_ARTIFACT)
        .unwrap_or_else(|| panic!("report has no parseable {SEARCH_GRAPH_ARTIFACT}"));
    modify(&mut graph_json);
    let graph_bytes = canonical_json_bytes(&graph_json).unwrap_or_else(|e| panic!("{e}"));
    let graph_hash = canonical_hash(DOMAIN_REPORT_ARTIFACT, &graph_bytes);

    let mut outcome_json = report
        .json(OUTCOME_ARTIFACT)
        .unwrap_or_else(|| panic!("report has no parseable {OUTCOME_ARTIFACT}"));
    outcome_json["search_graph_digest"] = serde_json::json!(graph_hash.as_str());
    let outcome_bytes = canonical_json_bytes(&outcome_json).unwrap_or_else(|e| panic!("{e}"));

    rebuild_with(report, |name, content| match name {
        SEARCH_GRAPH_ARTIFACT => Some(graph_bytes.clone()),
        OUTCOME_ARTIFACT => Some(outcome_bytes.clone()),
        _ => Some(content.to_vec()),
    })
}

/// Rebuild `report` with `name` removed.
///
/// # Panics
///
/// Panics if the remaining artifacts cannot be assembled.
pub fn rebuild_without_artifact(report: &RunReport, name: &str) -> RunReport {
    rebuild_with(report, |artifact, content| {
        (artifact != name).then(|| content.to_vec())
    })
}

/// Rebuild `report` with `name`'s content replaced.
///
/// # Panics
///
/// Panics if the artifacts cannot be assembled.
pub fn rebuild_with_replaced(report: &RunReport, name: &str, content: &[u8]) -> RunReport {
    rebuild_with(report, |artifact, old| {
        Some(if artifact == name {
            content.to_vec()
        } else {
            old.to_vec()
        })
    })
}

fn rebuild_with(
    report: &RunReport,
    mut content_for: impl FnMut(&str, &[u8]) -> Option<Vec<u8>>,
) -> RunReport {
    let artifacts: Vec<(String, Vec<u8>, bool)> = report
        .artifacts
        .values()
        .filter_map(|a| {
            content_for(&a.name, &a.content).map(|content| (a.name.clone(), content, a.normative))
        })
        .collect();
    build_report(artifacts).unwrap_or_else(|e| panic!("rebuild failed: {e}"))
}
