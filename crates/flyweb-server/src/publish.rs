//! # Static Document Publisher
//!
//! Writes a discovery document to `<public>/.well-known/flyweb.json` during
//! a build step, for sites that serve static files instead of mounting the
//! document route. Same write-path semantics as the route: violations are
//! logged, never fatal.

use std::path::{Path, PathBuf};

use thiserror::Error;

use flyweb_core::DiscoveryDocument;

/// Errors while persisting the discovery document.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The `.well-known` directory could not be created.
    #[error("failed to create {dir}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        dir: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document file could not be written.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// File path that could not be written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Write `document` as pretty-printed JSON under `public_dir/.well-known/`,
/// returning the path of the written file.
///
/// Validation violations are logged as a warning and the file is written
/// anyway; only I/O failures are errors.
pub fn write_well_known(
    public_dir: &Path,
    document: &DiscoveryDocument,
) -> Result<PathBuf, PublishError> {
    let result = document.validate();
    if !result.valid {
        tracing::warn!(
            errors = ?result.errors,
            "publishing discovery document with schema violations"
        );
    }

    let well_known_dir = public_dir.join(".well-known");
    std::fs::create_dir_all(&well_known_dir).map_err(|source| PublishError::CreateDir {
        dir: well_known_dir.display().to_string(),
        source,
    })?;

    let file_path = well_known_dir.join("flyweb.json");
    // Serialization of the typed document cannot fail.
    let body = serde_json::to_string_pretty(document).unwrap_or_else(|_| "{}".to_string());
    std::fs::write(&file_path, body).map_err(|source| PublishError::WriteFile {
        path: file_path.display().to_string(),
        source,
    })?;

    tracing::info!(path = %file_path.display(), "generated discovery document");
    Ok(file_path)
}
