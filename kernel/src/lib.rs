//! Pathwise Kernel: state identity and digests shared by every crate.
//!
//! # API Surface
//!
//! - [`key::CanonicalKey`] / [`key::CanonicalState`] -- explicit state identity
//!   for closed-set deduplication
//! - [`hash::canonical_hash`] -- the one domain-separated SHA-256 entry point
//! - [`canon::canonical_json_bytes`] -- the one JSON-for-hashing serializer
//!
//! # Module Dependency Direction
//!
//! `hash_domain` ← `hash` ← `key`; `canon` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod hash;
pub mod hash_domain;
pub mod key;
