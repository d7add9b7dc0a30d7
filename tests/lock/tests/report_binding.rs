//! Run-report integrity: tampering with any artifact or binding is caught.

use lock_tests::report_test_helpers::{
    rebuild_with_modified_graph, rebuild_with_replaced, rebuild_without_artifact,
};
use pathwise_harness::config::{run_config, RunConfig};
use pathwise_harness::report::{
    verify_report, ReportVerifyError, RunReport, OUTCOME_ARTIFACT, PATH_ARTIFACT,
    POLICY_ARTIFACT, SEARCH_GRAPH_ARTIFACT,
};
use pathwise_harness::runner::run_search;
use pathwise_harness::worlds::missionaries::Missionaries;
use pathwise_search::policy::SearchPolicy;
use pathwise_search::strategy::SearchStrategy;

fn baseline() -> RunReport {
    run_search(&Missionaries::classic(), &SearchPolicy::default()).unwrap()
}

#[test]
fn baseline_report_verifies() {
    let report = baseline();
    verify_report(&report).unwrap();
    let names: Vec<&str> = report.artifacts.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![OUTCOME_ARTIFACT, PATH_ARTIFACT, POLICY_ARTIFACT, SEARCH_GRAPH_ARTIFACT]
    );
    assert!(!report.artifacts[PATH_ARTIFACT].normative);
}

#[test]
fn tampered_content_without_rehash_is_caught() {
    let mut report = baseline();
    report
        .artifacts
        .get_mut(OUTCOME_ARTIFACT)
        .unwrap()
        .content
        .push(b' ');
    assert!(matches!(
        verify_report(&report),
        Err(ReportVerifyError::ContentHashMismatch { .. })
    ));
}

#[test]
fn tampered_digest_is_caught() {
    let mut report = baseline();
    let other = run_search(
        &Missionaries::classic(),
        &SearchPolicy::with_strategy(SearchStrategy::BreadthFirst),
    )
    .unwrap();
    report.digest = other.digest;
    assert!(matches!(
        verify_report(&report),
        Err(ReportVerifyError::DigestMismatch { .. })
    ));
}

#[test]
fn swapped_policy_breaks_binding() {
    let report = baseline();
    let other_policy = br#"{"max_expansions":null,"record_graph":true,"strategy":"uniform_cost"}"#;
    let tampered = rebuild_with_replaced(&report, POLICY_ARTIFACT, other_policy);
    assert!(matches!(
        verify_report(&tampered),
        Err(ReportVerifyError::PolicyDigestMismatch { .. })
    ));
}

#[test]
fn missing_graph_is_caught() {
    let tampered = rebuild_without_artifact(&baseline(), SEARCH_GRAPH_ARTIFACT);
    assert_eq!(
        verify_report(&tampered),
        Err(ReportVerifyError::SearchGraphArtifactMissing)
    );
}

#[test]
fn missing_policy_is_caught() {
    let tampered = rebuild_without_artifact(&baseline(), POLICY_ARTIFACT);
    assert_eq!(
        verify_report(&tampered),
        Err(ReportVerifyError::PolicyArtifactMissing)
    );
}

#[test]
fn rebound_graph_with_wrong_stats_is_caught() {
    let tampered = rebuild_with_modified_graph(&baseline(), |graph| {
        graph["metadata"]["stats"]["nodes_expanded"] = serde_json::json!(1);
    });
    assert_eq!(
        verify_report(&tampered),
        Err(ReportVerifyError::GraphOutcomeMismatch { field: "stats" })
    );
}

#[test]
fn rebound_graph_with_wrong_termination_is_caught() {
    let tampered = rebuild_with_modified_graph(&baseline(), |graph| {
        graph["metadata"]["termination_reason"] =
            serde_json::json!({"type": "frontier_exhausted"});
    });
    assert_eq!(
        verify_report(&tampered),
        Err(ReportVerifyError::GraphOutcomeMismatch {
            field: "termination"
        })
    );
}

#[test]
fn rebound_graph_unchanged_still_verifies() {
    let report = baseline();
    let rebuilt = rebuild_with_modified_graph(&report, |_| {});
    verify_report(&rebuilt).unwrap();
    assert_eq!(rebuilt.digest, report.digest);
}

#[test]
fn editing_path_text_keeps_digest() {
    let report = baseline();
    let edited = rebuild_with_replaced(&report, PATH_ARTIFACT, b"annotated by a human\n");
    verify_report(&edited).unwrap();
    assert_eq!(edited.digest, report.digest);
    assert_ne!(edited.manifest, report.manifest);
}

#[test]
fn config_run_matches_direct_run() {
    let config = RunConfig::from_json_bytes(br#"{"problem":"missionaries"}"#).unwrap();
    let via_config = run_config(&config).unwrap();
    assert_eq!(via_config.digest, baseline().digest);
}
