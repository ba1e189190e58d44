//! # Well-Known Document Route
//!
//! Serves a site's discovery document at the fixed well-known path.
//!
//! The document is validated once when the router is built. Violations are
//! logged as a warning and the document is served anyway: the discovery
//! layer must never take down content serving, and the explicit check
//! surfaces (`flyweb check`, client `discover`) are where violations become
//! fatal.

use std::sync::Arc;

use axum::http::header::{self, HeaderName};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use flyweb_core::{DiscoveryDocument, PROTOCOL_VERSION, WELL_KNOWN_PATH};

/// Protocol version response header.
pub(crate) const VERSION_HEADER: HeaderName = HeaderName::from_static("x-flyweb-version");

/// Build a router serving `document` at [`WELL_KNOWN_PATH`].
///
/// The rendered body is fixed at construction time; handlers only clone a
/// shared string. Merge the result into an application router:
///
/// ```no_run
/// use flyweb_core::DiscoveryDocument;
///
/// let app: axum::Router = axum::Router::new()
///     .merge(flyweb_server::document_router(&DiscoveryDocument::starter()));
/// ```
pub fn document_router(document: &DiscoveryDocument) -> Router {
    let result = document.validate();
    if !result.valid {
        tracing::warn!(
            errors = ?result.errors,
            "serving discovery document with schema violations"
        );
    }

    // Serialization of the typed document cannot fail; the fallback keeps
    // the handler infallible.
    let body: Arc<str> = serde_json::to_string_pretty(document)
        .unwrap_or_else(|_| "{}".to_string())
        .into();

    Router::new().route(
        WELL_KNOWN_PATH,
        get(move || {
            let body = Arc::clone(&body);
            async move {
                (
                    [
                        (
                            header::CONTENT_TYPE,
                            "application/json; charset=utf-8",
                        ),
                        (
                            header::CACHE_CONTROL,
                            "public, max-age=3600, s-maxage=3600",
                        ),
                        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                        (VERSION_HEADER, PROTOCOL_VERSION),
                    ],
                    body.to_string(),
                )
                    .into_response()
            }
        }),
    )
}
