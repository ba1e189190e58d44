//! Client error types.
//!
//! Transport failures, non-2xx responses, and malformed JSON are distinct
//! classes from schema violations: a consumer reporting "HTTP 404" or
//! "invalid JSON" must never conflate that with the validator's own error
//! list, which only exists once a document has been fetched and parsed.

use thiserror::Error;

/// Errors from FlyWeb client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    /// HTTP transport error (connection, TLS, timeout).
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        /// The URL that was being fetched.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("no FlyWeb document at {url} (HTTP {status})")]
    Status {
        /// The URL that was fetched.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The response body was not syntactically valid JSON.
    #[error("invalid JSON in response from {url}: {reason}")]
    InvalidJson {
        /// The URL that was fetched.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document parsed but failed schema validation.
    #[error("invalid FlyWeb document at {url}: {}", errors.join("; "))]
    InvalidDocument {
        /// The URL the document was fetched from.
        url: String,
        /// The full violation list from the validator.
        errors: Vec<String>,
    },

    /// The base URL could not be combined with a resource path.
    #[error("cannot build resource URL from \"{base}\" and \"{path}\": {reason}")]
    InvalidUrl {
        /// The caller-supplied base URL.
        base: String,
        /// The resource path from the document.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },
}
