//! # flyweb-cli — FlyWeb Command-Line Interface
//!
//! Provides the `flyweb` binary.
//!
//! ## Subcommands
//!
//! - `flyweb check <url>` — Fetch a website's `/.well-known/flyweb.json`
//!   and validate it. Every schema violation is printed; any violation is
//!   a non-zero exit.
//! - `flyweb check <file>` — Validate a local `flyweb.json`.
//! - `flyweb init` — Emit a starter document to stdout or a file.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers return the
//!   process exit code (0 success, 1 check failure, 2 operational error).
//! - No protocol logic here — validation lives in `flyweb-core`, fetching
//!   in `flyweb-client`.

pub mod check;
pub mod init;
