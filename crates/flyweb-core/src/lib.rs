#![deny(missing_docs)]

//! # flyweb-core — Discovery Protocol Types and Validator
//!
//! The FlyWeb protocol lets a website declare, at
//! `/.well-known/flyweb.json`, what structured resources it exposes for
//! automated agents — in the spirit of `robots.txt`, but machine-queryable.
//!
//! This crate defines the document model and the one non-trivial routine in
//! the protocol: [`validate`], which walks an untrusted decoded-JSON value
//! and reports *every* structural violation against the document schema as
//! a field-qualified message. Serving adapters, the fetch client, and the
//! CLI all build on this crate.
//!
//! ## Design Principles
//!
//! 1. **Validate the raw value, not a typed struct.** Inbound documents are
//!    checked as `serde_json::Value` so that a single type mismatch yields a
//!    precise per-field message instead of a serde parse abort.
//!
//! 2. **Accumulate, never throw.** The validator has no failure mode of its
//!    own; the `{valid, errors}` result is the error channel, and callers
//!    decide severity (warn on the write path, fail on the check path).
//!
//! 3. **Closed format enum, open entity vocabulary.** [`ResourceFormat`] is
//!    exhaustive; `entityType` is any non-empty string.

pub mod document;
pub mod validate;

pub use document::{
    DiscoveryDocument, FormatParseError, Resource, ResourceFormat, PROTOCOL_VERSION,
    WELL_KNOWN_PATH,
};
pub use validate::{validate, ValidationResult};
