//! In-memory run report: the output of a harness run.
//!
//! No file I/O in this module. A report is a deterministic set of named
//! artifacts plus a manifest and a digest.
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the report digest)
//! or observational (listed in the manifest but excluded from the digest).
//! `path.txt` is observational: it is a human rendering of what
//! `outcome.json` already commits to.
//!
//! The report digest is computed over the **digest basis**: a canonical JSON
//! projection of normative artifact hashes only.

use std::collections::BTreeMap;

use pathwise_kernel::canon::canonical_json_bytes;
use pathwise_kernel::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain prefix for artifact content hashing.
pub const DOMAIN_REPORT_ARTIFACT: HashDomain = HashDomain::ReportArtifact;

/// Domain prefix for the report digest.
pub const DOMAIN_REPORT_DIGEST: HashDomain = HashDomain::ReportDigest;

pub const SEARCH_GRAPH_ARTIFACT: &str = "search_graph.json";
pub const OUTCOME_ARTIFACT: &str = "outcome.json";
pub const POLICY_ARTIFACT: &str = "policy.json";
pub const PATH_ARTIFACT: &str = "path.txt";

/// A single artifact in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Logical filename (e.g., `"outcome.json"`).
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the report digest.
    pub normative: bool,
}

/// The complete report from a harness run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Artifacts indexed by logical name, in sorted order.
    pub artifacts: BTreeMap<String, ReportArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

impl RunReport {
    /// Parsed content of a JSON artifact, if present and well-formed.
    #[must_use]
    pub fn json(&self, name: &str) -> Option<serde_json::Value> {
        let artifact = self.artifacts.get(name)?;
        serde_json::from_slice(&artifact.content).ok()
    }
}

/// Error building a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBuildError {
    /// Canonical JSON serialization failed.
    CanonError { detail: String },
    /// Caller-provided `precomputed_hash` does not match the recomputed hash.
    PrecomputedHashMismatch {
        name: String,
        expected: String,
        computed: String,
    },
}

impl std::fmt::Display for ReportBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::PrecomputedHashMismatch {
                name,
                expected,
                computed,
            } => write!(
                f,
                "precomputed hash for {name} is {expected}, content hashes to {computed}"
            ),
        }
    }
}

impl std::error::Error for ReportBuildError {}

/// Input for report assembly.
///
/// If `precomputed_hash` is provided, it must equal
/// `canonical_hash(DOMAIN_REPORT_ARTIFACT, &content)`.
pub struct ArtifactInput {
    pub name: String,
    pub content: Vec<u8>,
    pub normative: bool,
    /// If provided, `build_report` checks and reuses this hash.
    pub precomputed_hash: Option<ContentHash>,
}

impl From<(String, Vec<u8>, bool)> for ArtifactInput {
    fn from((name, content, normative): (String, Vec<u8>, bool)) -> Self {
        Self {
            name,
            content,
            normative,
            precomputed_hash: None,
        }
    }
}

/// Build a [`RunReport`] from a list of artifact inputs.
///
/// Accepts `Vec<ArtifactInput>` or `Vec<(String, Vec<u8>, bool)>`.
///
/// # Errors
///
/// Returns [`ReportBuildError`] if canonical JSON serialization fails or a
/// precomputed hash is wrong.
pub fn build_report(
    artifacts: Vec<impl Into<ArtifactInput>>,
) -> Result<RunReport, ReportBuildError> {
    let mut artifact_map = BTreeMap::new();

    for input in artifacts {
        let input = input.into();
        let recomputed = canonical_hash(DOMAIN_REPORT_ARTIFACT, &input.content);
        if let Some(h) = input.precomputed_hash {
            if h != recomputed {
                return Err(ReportBuildError::PrecomputedHashMismatch {
                    name: input.name,
                    expected: h.as_str().to_string(),
                    computed: recomputed.as_str().to_string(),
                });
            }
        }
        artifact_map.insert(
            input.name.clone(),
            ReportArtifact {
                name: input.name,
                content: input.content,
                content_hash: recomputed,
                normative: input.normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&artifact_map)
        .map_err(|detail| ReportBuildError::CanonError { detail })?;
    let digest_basis = compute_digest_basis_bytes(&artifact_map)
        .map_err(|detail| ReportBuildError::CanonError { detail })?;
    let digest = canonical_hash(DOMAIN_REPORT_DIGEST, &digest_basis);

    Ok(RunReport {
        artifacts: artifact_map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from report integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportVerifyError {
    /// An artifact's stored `content_hash` does not match its content.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    ManifestMismatch,
    ManifestNotCanonical,
    DigestBasisMismatch,
    DigestBasisNotCanonical,
    DigestMismatch { expected: String, actual: String },
    /// A normative JSON artifact is not in canonical JSON form.
    ArtifactNotCanonical { artifact: String },
    /// `outcome.json` is missing or not a JSON object.
    OutcomeMissing,
    /// `outcome.json` lacks a field the bindings need.
    OutcomeFieldMissing { field: &'static str },
    /// `outcome.json` names a `policy_digest` that is not `policy.json`'s hash.
    PolicyDigestMismatch { declared: String, recomputed: String },
    PolicyArtifactMissing,
    /// `outcome.json` names a `search_graph_digest` that is not
    /// `search_graph.json`'s hash.
    SearchGraphDigestMismatch { declared: String, recomputed: String },
    /// `outcome.json` declares a graph digest but the graph is absent.
    SearchGraphArtifactMissing,
    /// `search_graph.json` exists but `outcome.json` does not bind it.
    SearchGraphDigestMissing,
    /// Graph metadata and `outcome.json` disagree on a shared field.
    GraphOutcomeMismatch { field: &'static str },
}

impl std::fmt::Display for ReportVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(f, "{artifact}: stored hash {expected}, content hashes to {actual}"),
            Self::ManifestMismatch => write!(f, "manifest does not match artifacts"),
            Self::ManifestNotCanonical => write!(f, "manifest is not canonical JSON"),
            Self::DigestBasisMismatch => write!(f, "digest basis does not match artifacts"),
            Self::DigestBasisNotCanonical => write!(f, "digest basis is not canonical JSON"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "report digest {expected} does not match {actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "{artifact} is not canonical JSON")
            }
            Self::OutcomeMissing => write!(f, "outcome.json missing or malformed"),
            Self::OutcomeFieldMissing { field } => {
                write!(f, "outcome.json missing field {field}")
            }
            Self::PolicyDigestMismatch {
                declared,
                recomputed,
            } => write!(f, "policy digest {declared} does not match {recomputed}"),
            Self::PolicyArtifactMissing => write!(f, "policy.json missing"),
            Self::SearchGraphDigestMismatch {
                declared,
                recomputed,
            } => write!(f, "search graph digest {declared} does not match {recomputed}"),
            Self::SearchGraphArtifactMissing => {
                write!(f, "outcome.json binds a search graph that is absent")
            }
            Self::SearchGraphDigestMissing => {
                write!(f, "search_graph.json present but unbound by outcome.json")
            }
            Self::GraphOutcomeMismatch { field } => {
                write!(f, "search graph and outcome disagree on {field}")
            }
        }
    }
}

impl std::error::Error for ReportVerifyError {}

/// Verify the internal consistency of a report.
///
/// This is a pure integrity check; it does not rerun the search. It proves:
///
/// 1. Each artifact's `content_hash` matches its content.
/// 2. `manifest` and `digest_basis` match the projections recomputed from the
///    artifacts, and both are canonical JSON.
/// 3. `digest` matches `canonical_hash(DOMAIN_REPORT_DIGEST, digest_basis)`.
/// 4. Normative JSON artifacts are canonical.
/// 5. `outcome.json` binds `policy.json` and, when present,
///    `search_graph.json` by content hash.
/// 6. The graph's termination and statistics agree with `outcome.json`.
///
/// # Errors
///
/// Returns the first [`ReportVerifyError`] encountered.
pub fn verify_report(report: &RunReport) -> Result<(), ReportVerifyError> {
    for artifact in report.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_REPORT_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(ReportVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    let expected_manifest = compute_manifest_bytes(&report.artifacts)
        .map_err(|_| ReportVerifyError::ManifestNotCanonical)?;
    if expected_manifest != report.manifest {
        return Err(ReportVerifyError::ManifestMismatch);
    }
    if !is_canonical_json(&report.manifest) {
        return Err(ReportVerifyError::ManifestNotCanonical);
    }

    let expected_basis = compute_digest_basis_bytes(&report.artifacts)
        .map_err(|_| ReportVerifyError::DigestBasisNotCanonical)?;
    if expected_basis != report.digest_basis {
        return Err(ReportVerifyError::DigestBasisMismatch);
    }
    if !is_canonical_json(&report.digest_basis) {
        return Err(ReportVerifyError::DigestBasisNotCanonical);
    }

    let recomputed_digest = canonical_hash(DOMAIN_REPORT_DIGEST, &report.digest_basis);
    if recomputed_digest != report.digest {
        return Err(ReportVerifyError::DigestMismatch {
            expected: report.digest.as_str().to_string(),
            actual: recomputed_digest.as_str().to_string(),
        });
    }

    for artifact in report.artifacts.values() {
        if artifact.normative
            && artifact.name.ends_with(".json")
            && !is_canonical_json(&artifact.content)
        {
            return Err(ReportVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_outcome_bindings(report)
}

/// Check the digests `outcome.json` declares against the artifacts present.
/// Reports without `outcome.json` (hand-assembled ones) skip this step.
fn verify_outcome_bindings(report: &RunReport) -> Result<(), ReportVerifyError> {
    if !report.artifacts.contains_key(OUTCOME_ARTIFACT) {
        return Ok(());
    }
    let outcome = report
        .json(OUTCOME_ARTIFACT)
        .filter(serde_json::Value::is_object)
        .ok_or(ReportVerifyError::OutcomeMissing)?;

    let declared_policy = outcome["policy_digest"]
        .as_str()
        .ok_or(ReportVerifyError::OutcomeFieldMissing {
            field: "policy_digest",
        })?;
    let policy = report
        .artifacts
        .get(POLICY_ARTIFACT)
        .ok_or(ReportVerifyError::PolicyArtifactMissing)?;
    if declared_policy != policy.content_hash.as_str() {
        return Err(ReportVerifyError::PolicyDigestMismatch {
            declared: declared_policy.to_string(),
            recomputed: policy.content_hash.as_str().to_string(),
        });
    }

    let graph = report.artifacts.get(SEARCH_GRAPH_ARTIFACT);
    match (outcome["search_graph_digest"].as_str(), graph) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(ReportVerifyError::SearchGraphDigestMissing),
        (Some(_), None) => Err(ReportVerifyError::SearchGraphArtifactMissing),
        (Some(declared), Some(graph)) => {
            if declared != graph.content_hash.as_str() {
                return Err(ReportVerifyError::SearchGraphDigestMismatch {
                    declared: declared.to_string(),
                    recomputed: graph.content_hash.as_str().to_string(),
                });
            }
            verify_graph_outcome_agreement(report, &outcome)
        }
    }
}

fn verify_graph_outcome_agreement(
    report: &RunReport,
    outcome: &serde_json::Value,
) -> Result<(), ReportVerifyError> {
    let graph = report
        .json(SEARCH_GRAPH_ARTIFACT)
        .ok_or(ReportVerifyError::ArtifactNotCanonical {
            artifact: SEARCH_GRAPH_ARTIFACT.to_string(),
        })?;
    let metadata = &graph["metadata"];
    if metadata["termination_reason"]["type"] != outcome["termination"] {
        return Err(ReportVerifyError::GraphOutcomeMismatch {
            field: "termination",
        });
    }
    if metadata["stats"] != outcome["stats"] {
        return Err(ReportVerifyError::GraphOutcomeMismatch { field: "stats" });
    }
    if metadata["problem_id"] != outcome["problem_id"] {
        return Err(ReportVerifyError::GraphOutcomeMismatch {
            field: "problem_id",
        });
    }
    Ok(())
}

/// Recompute manifest bytes from all artifacts.
fn compute_manifest_bytes(
    artifacts: &BTreeMap<String, ReportArtifact>,
) -> Result<Vec<u8>, String> {
    let manifest_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    let manifest_value = serde_json::json!({
        "artifacts": manifest_artifacts,
        "schema_version": "run_report.v1",
    });

    canonical_json_bytes(&manifest_value).map_err(|e| e.to_string())
}

/// Recompute digest basis bytes from normative artifacts only.
fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, ReportArtifact>,
) -> Result<Vec<u8>, String> {
    let normative_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    let digest_basis_value = serde_json::json!({
        "artifacts": normative_artifacts,
        "schema_version": "run_report_digest_basis.v1",
    });

    canonical_json_bytes(&digest_basis_value).map_err(|e| e.to_string())
}

/// Parse, re-canonicalize, compare.
fn is_canonical_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .and_then(|v| canonical_json_bytes(&v).ok())
        .is_some_and(|recanonized| recanonized == bytes)
}
