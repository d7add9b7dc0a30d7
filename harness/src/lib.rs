//! Pathwise Harness: concrete problems and run reports for the search engine.
//!
//! The harness builds a problem (from code or a JSON [`config::RunConfig`]),
//! hands it to `pathwise_search::search`, and packages the result as a
//! content-addressed [`report::RunReport`].
//!
//! The harness does NOT order the frontier or decide dedup; that is the
//! engine's job. Problems provide states and transitions only; the harness
//! owns rendering, hashing and report assembly.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod contract;
pub mod experiment;
pub mod report;
pub mod runner;
pub mod worlds;
