//! Canonical JSON bytes: the single serialization-for-hashing path.
//!
//! Rules:
//!
//! 1. Object keys sorted lexicographically (byte order).
//! 2. Compact form, no whitespace.
//! 3. Numbers must be integers; floats are rejected so digests never depend
//!    on float formatting.

use serde_json::Value;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { raw: String },
    /// `serde_json` failed to write the value.
    Serialize { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::Serialize { detail } => write!(f, "canonical JSON write failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// `serde_json::Map` is a `BTreeMap` in this workspace (the `preserve_order`
/// feature is never enabled), so compact serialization already emits sorted
/// keys once the integer-only rule has been checked.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] for any non-integer number.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    reject_non_integers(value)?;
    serde_json::to_vec(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

fn reject_non_integers(value: &Value) -> Result<(), CanonError> {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(CanonError::NonIntegerNumber { raw: n.to_string() })
        }
        Value::Array(items) => items.iter().try_for_each(reject_non_integers),
        Value::Object(map) => map.values().try_for_each(reject_non_integers),
        _ => Ok(()),
    }
}
