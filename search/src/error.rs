//! Typed search errors.
//!
//! `SearchError` covers misuse only. An unreachable goal or an exhausted
//! expansion budget is a normal [`crate::search::Outcome`], never an error.

/// Typed failure for search misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `pop` was called on an empty frontier. Indicates a driver bug.
    EmptyFrontier,
    /// The policy failed pre-flight validation. No search steps were taken.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFrontier => write!(f, "pop called on an empty frontier"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
