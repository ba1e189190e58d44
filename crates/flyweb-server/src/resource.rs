//! # Resource Data Endpoints
//!
//! Serves in-memory record lists at the paths a discovery document declares,
//! with per-field filtering driven by query parameters and offset/limit
//! pagination capped per endpoint.
//!
//! These endpoints do not call the validator — they only need the declared
//! `path`/`format`/`fields` to be self-consistent with what the validator
//! already checked on the document route.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use flyweb_core::PROTOCOL_VERSION;

use crate::document::VERSION_HEADER;

/// Default pagination cap when [`ResourceEndpoint::max_limit`] is not set.
const DEFAULT_MAX_LIMIT: usize = 100;

/// Body encoding for a resource endpoint.
///
/// Only the two formats the serving adapters implement; `csv`/`xml` remain
/// valid *declared* formats in the document but have no built-in encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeFormat {
    /// One JSON array per response.
    Json,
    /// Newline-delimited JSON, one record per line (`application/x-ndjson`).
    Jsonl,
}

type Source = Arc<dyn Fn() -> Vec<Value> + Send + Sync>;

/// Configuration for one resource data endpoint.
///
/// ```no_run
/// use flyweb_server::{ResourceEndpoint, ServeFormat};
/// use serde_json::json;
///
/// let posts = vec![json!({"title": "Hello", "tags": ["intro"]})];
/// let app: axum::Router = ResourceEndpoint::new(ServeFormat::Jsonl, posts)
///     .queryable(["tags"])
///     .max_limit(50)
///     .into_router("/.flyweb/posts");
/// ```
#[derive(Clone)]
pub struct ResourceEndpoint {
    format: ServeFormat,
    source: Source,
    queryable: Vec<String>,
    max_limit: usize,
}

impl ResourceEndpoint {
    /// Endpoint over a fixed record list.
    pub fn new(format: ServeFormat, records: Vec<Value>) -> Self {
        let records = Arc::new(records);
        Self::with_source(format, move || records.as_ref().clone())
    }

    /// Endpoint over a record source invoked per request.
    pub fn with_source(
        format: ServeFormat,
        source: impl Fn() -> Vec<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            format,
            source: Arc::new(source),
            queryable: Vec::new(),
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }

    /// Record fields that query parameters may filter on. Parameters for
    /// any other name (other than `limit`/`offset`) are ignored.
    pub fn queryable(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.queryable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Cap on records per response, applied even without a `limit` parameter.
    pub fn max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    /// Mount this endpoint at `path` on a fresh router.
    pub fn into_router(self, path: &str) -> Router {
        let endpoint = Arc::new(self);
        Router::new().route(
            path,
            get(move |Query(params): Query<HashMap<String, String>>| {
                let endpoint = Arc::clone(&endpoint);
                async move { endpoint.respond(&params) }
            }),
        )
    }

    /// Filter, paginate, and encode one response.
    fn respond(&self, params: &HashMap<String, String>) -> Response {
        let mut records = (self.source)();

        for field in &self.queryable {
            let Some(wanted) = params.get(field) else {
                continue;
            };
            records.retain(|record| field_matches(record.get(field), wanted));
        }

        let offset = parse_param(params.get("offset"));
        if offset > 0 {
            records = records.into_iter().skip(offset).collect();
        }

        let limit = parse_param(params.get("limit"));
        let effective_limit = if limit > 0 {
            limit.min(self.max_limit)
        } else {
            self.max_limit
        };
        records.truncate(effective_limit);

        let common = [
            (header::CACHE_CONTROL, "public, max-age=60, s-maxage=60"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (VERSION_HEADER, PROTOCOL_VERSION),
        ];

        match self.format {
            ServeFormat::Jsonl => {
                let body = records
                    .iter()
                    // Value serialization cannot fail.
                    .map(|r| serde_json::to_string(r).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join("\n");
                (
                    common,
                    [(
                        header::CONTENT_TYPE,
                        "application/x-ndjson; charset=utf-8",
                    )],
                    body,
                )
                    .into_response()
            }
            ServeFormat::Json => {
                let body = serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string());
                (
                    common,
                    [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                    body,
                )
                    .into_response()
            }
        }
    }
}

impl std::fmt::Debug for ResourceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEndpoint")
            .field("format", &self.format)
            .field("queryable", &self.queryable)
            .field("max_limit", &self.max_limit)
            .finish_non_exhaustive()
    }
}

/// Equality/containment match for one filterable field.
///
/// Array fields match when any element equals the parameter; scalar fields
/// compare their stringified form. A record missing the field never matches.
fn field_matches(field_value: Option<&Value>, wanted: &str) -> bool {
    match field_value {
        None => false,
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(wanted)),
        Some(Value::String(s)) => s == wanted,
        Some(other) => other.to_string() == wanted,
    }
}

/// Parse a pagination parameter; absent or malformed values become 0.
fn parse_param(raw: Option<&String>) -> usize {
    raw.and_then(|v| v.parse().ok()).unwrap_or(0)
}
