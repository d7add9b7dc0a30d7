//! Harness-side problem contract.
//!
//! The engine only needs [`SearchProblem`]. Reports and fixture binaries also
//! need to show states to a human, which is what [`DescribeState`] adds.
//! Problems may NOT implement hashing, report assembly or verification;
//! those are runner concerns.

use pathwise_search::contract::SearchProblem;

/// A problem whose states can be rendered as one line of text.
pub trait DescribeState: SearchProblem {
    /// Render `state` compactly. Must be deterministic: the rendering ends up
    /// in `outcome.json`, which participates in the report digest.
    fn describe_state(&self, state: &Self::State) -> String;
}

impl<P: DescribeState + ?Sized> DescribeState for &P {
    fn describe_state(&self, state: &Self::State) -> String {
        (**self).describe_state(state)
    }
}
