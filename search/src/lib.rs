//! Pathwise Search: deterministic best-first graph search.
//!
//! This crate is the engine. It depends only on `pathwise_kernel` and knows
//! nothing about concrete problems; those live in `pathwise_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! pathwise_kernel  ←  pathwise_search  ←  pathwise_harness
//! (keys, hashing)     (frontier, loop)    (worlds, reports, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`]: the adapter a problem implements
//! - [`SearchNode`]: immutable node carrying `g`, `h` and a parent slot
//! - [`Frontier`] / [`ClosedSet`]: open priority queue and dedup set
//! - [`SearchStrategy`]: A*, greedy, uniform-cost or breadth-first ordering
//! - [`SearchPolicy`]: strategy, expansion ceiling, audit switch
//! - [`Outcome`]: `Success`, `Exhausted` or `LimitExceeded`
//! - [`SearchGraph`]: expansion-event audit log

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod closed;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod strategy;

pub use closed::ClosedSet;
pub use contract::{SearchProblem, Successor};
pub use error::SearchError;
pub use frontier::Frontier;
pub use graph::{SearchGraph, TerminationReason};
pub use node::{FrontierKey, SearchNode};
pub use policy::SearchPolicy;
pub use search::{reconstruct_path, search, Outcome, SearchResult};
pub use stats::SearchStatistics;
pub use strategy::SearchStrategy;
