//! # flyweb-server — Axum Serving Adapters
//!
//! Producer-side adapters for the FlyWeb discovery protocol, built on Axum:
//!
//! - [`document_router`] — serves the discovery document at
//!   `/.well-known/flyweb.json` (validate once, warn on violations, serve
//!   anyway).
//! - [`ResourceEndpoint`] — serves a declared resource's record list with
//!   query-parameter filtering and capped offset/limit pagination, as JSON
//!   or newline-delimited JSON.
//! - [`write_well_known`] — build-step publisher for static sites.
//!
//! ## Crate Policy
//!
//! Route handlers hold no business logic beyond filtering and encoding; the
//! schema contract lives entirely in `flyweb-core`. Write-path validation
//! failures are warnings — only the explicit check surfaces treat them as
//! fatal.

pub mod document;
pub mod publish;
pub mod resource;

pub use document::document_router;
pub use publish::{write_well_known, PublishError};
pub use resource::{ResourceEndpoint, ServeFormat};
