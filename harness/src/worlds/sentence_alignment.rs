//! `SentenceAlignment`: align the sentences of two documents.
//!
//! A state `(i, j, last)` means the first `i` sentences of the left document
//! and the first `j` of the right one are accounted for. From there the
//! alignment can pair the next two sentences (cost: character edit
//! distance), insert the next right sentence (cost: its length) or delete the
//! next left sentence (cost: its length). The cheapest full alignment pairs
//! near-identical sentences, which is what plagiarism screening looks for.

use pathwise_kernel::key::{CanonicalKey, CanonicalState};
use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

/// Edit distance at or below which an aligned pair is flagged.
pub const DEFAULT_PLAGIARISM_THRESHOLD: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlignMove {
    /// Pair left sentence `i` with right sentence `j`.
    Align,
    /// Right sentence `j` has no counterpart.
    Insert,
    /// Left sentence `i` has no counterpart.
    Delete,
}

impl AlignMove {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Align => "ALIGN",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
        }
    }

    fn code(self) -> i64 {
        match self {
            Self::Align => 0,
            Self::Insert => 1,
            Self::Delete => 2,
        }
    }
}

/// Progress through both documents plus the move that got here (`None` at
/// the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlignState {
    pub left: usize,
    pub right: usize,
    pub last: Option<AlignMove>,
}

impl CanonicalState for AlignState {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::builder()
            .int(as_i64(self.left))
            .int(as_i64(self.right))
            .int(self.last.map_or(-1, AlignMove::code))
            .build()
    }
}

/// One row of a reconstructed alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub op: AlignMove,
    pub left: Option<String>,
    pub right: Option<String>,
    /// Edit distance, for [`AlignMove::Align`] rows.
    pub distance: Option<usize>,
    /// Aligned with an edit distance at or below the threshold.
    pub suspicious: bool,
}

#[derive(Debug, Clone)]
pub struct SentenceAlignment {
    left: Vec<String>,
    right: Vec<String>,
    threshold: usize,
}

impl SentenceAlignment {
    #[must_use]
    pub fn new(left: Vec<String>, right: Vec<String>) -> Self {
        Self {
            left,
            right,
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
        }
    }

    /// Split both texts with [`split_sentences`] and align the results.
    #[must_use]
    pub fn from_texts(left: &str, right: &str) -> Self {
        Self::new(split_sentences(left), split_sentences(right))
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn left(&self) -> &[String] {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &[String] {
        &self.right
    }

    fn step_cost(&self, next: &AlignState) -> i64 {
        let cost = match next.last {
            Some(AlignMove::Align) => {
                edit_distance(&self.left[next.left - 1], &self.right[next.right - 1])
            }
            Some(AlignMove::Insert) => self.right[next.right - 1].chars().count(),
            Some(AlignMove::Delete) => self.left[next.left - 1].chars().count(),
            None => 0,
        };
        as_i64(cost)
    }

    /// Turn a search path into alignment rows. The start state contributes
    /// no row.
    #[must_use]
    pub fn alignment_pairs(&self, path: &[AlignState]) -> Vec<AlignedPair> {
        path.iter()
            .filter_map(|state| {
                let op = state.last?;
                let left = matches!(op, AlignMove::Align | AlignMove::Delete)
                    .then(|| self.left.get(state.left.checked_sub(1)?).cloned())
                    .flatten();
                let right = matches!(op, AlignMove::Align | AlignMove::Insert)
                    .then(|| self.right.get(state.right.checked_sub(1)?).cloned())
                    .flatten();
                let distance = match (&left, &right) {
                    (Some(l), Some(r)) => Some(edit_distance(l, r)),
                    _ => None,
                };
                Some(AlignedPair {
                    op,
                    left,
                    right,
                    distance,
                    suspicious: distance.is_some_and(|d| d <= self.threshold),
                })
            })
            .collect()
    }
}

impl SearchProblem for SentenceAlignment {
    type State = AlignState;

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_id(&self) -> &str {
        "sentence_alignment"
    }

    fn start_state(&self) -> AlignState {
        AlignState {
            left: 0,
            right: 0,
            last: None,
        }
    }

    fn is_goal(&self, state: &AlignState) -> bool {
        state.left == self.left.len() && state.right == self.right.len()
    }

    fn successors(&self, state: &AlignState) -> Vec<Successor<AlignState>> {
        [
            (1, 1, AlignMove::Align),
            (0, 1, AlignMove::Insert),
            (1, 0, AlignMove::Delete),
        ]
        .into_iter()
        .filter_map(|(di, dj, op)| {
            let next = AlignState {
                left: state.left + di,
                right: state.right + dj,
                last: Some(op),
            };
            (next.left <= self.left.len() && next.right <= self.right.len()).then(|| {
                let cost = self.step_cost(&next);
                Successor::new(next, cost)
            })
        })
        .collect()
    }

    /// Unmatched sentence count difference: each must be inserted or
    /// deleted, and every sentence has at least one character.
    fn heuristic(&self, state: &AlignState) -> i64 {
        let remaining_left = self.left.len() - state.left.min(self.left.len());
        let remaining_right = self.right.len() - state.right.min(self.right.len());
        as_i64(remaining_left.abs_diff(remaining_right))
    }
}

impl DescribeState for SentenceAlignment {
    fn describe_state(&self, state: &AlignState) -> String {
        let op = state.last.map_or("START", AlignMove::as_str);
        format!("({},{}) {op}", state.left, state.right)
    }
}

/// Lowercase `text`, split it on `.`, `!` and `?`, strip remaining ASCII
/// punctuation and collapse whitespace. Empty sentences are dropped.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(['.', '!', '?'])
        .map(|raw| {
            raw.chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Levenshtein distance over `char`s.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn as_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
