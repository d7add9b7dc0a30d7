//! Problem adapters for the harness runner.

pub mod eight_puzzle;
pub mod missionaries;
pub mod peg_solitaire;
pub mod rabbit_leap;
pub mod sentence_alignment;
pub mod weighted_graph;
