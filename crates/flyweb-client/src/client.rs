//! # FlyWeb HTTP Client
//!
//! Wraps a `reqwest::Client` with the protocol conventions: the well-known
//! document path, a protocol `User-Agent`, a per-request timeout, and
//! format-aware resource-body parsing.
//!
//! URL building and body parsing live in free functions so they can be
//! exercised without a network.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use flyweb_core::{validate, DiscoveryDocument, Resource, ResourceFormat, WELL_KNOWN_PATH};

use crate::error::ClientError;

/// User-Agent sent with every protocol request.
const USER_AGENT: &str = "flyweb-client/1.0";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A discovered site: the validated document and the URL it came from.
#[derive(Debug, Clone)]
pub struct Discovery {
    /// The validated, typed discovery document.
    pub document: DiscoveryDocument,
    /// The full well-known URL the document was fetched from.
    pub url: String,
}

/// Options for fetching records from a resource endpoint.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Query parameters to pass through (e.g. a `tag` filter).
    pub params: Vec<(String, String)>,
    /// Maximum number of records (sets the `limit` parameter).
    pub limit: Option<usize>,
    /// Pagination offset (sets the `offset` parameter).
    pub offset: Option<usize>,
}

/// HTTP client for consuming FlyWeb sites.
///
/// Cheap to clone (the inner `reqwest::Client` is reference-counted) and
/// safe to share across async tasks.
#[derive(Debug, Clone)]
pub struct FlywebClient {
    client: reqwest::Client,
}

impl FlywebClient {
    /// Build a client with the default timeout and protocol headers.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build a client with an explicit per-request timeout.
    ///
    /// Timeout and retry policy belong here, on the fetching side — the
    /// validator itself has nothing to time out.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and parse a site's discovery document without validating it.
    ///
    /// Returns the well-known URL and the raw JSON value. Transport, status,
    /// and JSON-syntax failures are reported as their own error classes —
    /// callers that want to print the *validator's* error list (the CLI)
    /// use this and run [`flyweb_core::validate`] themselves.
    pub async fn fetch_raw(&self, base_url: &str) -> Result<(String, Value), ClientError> {
        let url = well_known_url(base_url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|source| ClientError::Http {
            url: url.clone(),
            source,
        })?;

        let value = serde_json::from_str(&text).map_err(|e| ClientError::InvalidJson {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        Ok((url, value))
    }

    /// Discover a site: fetch the well-known document, validate it, and
    /// return the typed result.
    ///
    /// Schema violations are a hard failure here — the full violation list
    /// is carried in [`ClientError::InvalidDocument`].
    pub async fn discover(&self, base_url: &str) -> Result<Discovery, ClientError> {
        let (url, value) = self.fetch_raw(base_url).await?;

        let result = validate(&value);
        if !result.valid {
            return Err(ClientError::InvalidDocument {
                url,
                errors: result.errors,
            });
        }

        let document: DiscoveryDocument =
            serde_json::from_value(value).map_err(|e| ClientError::InvalidJson {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Discovery { document, url })
    }

    /// Fetch records from a resource endpoint declared in a document.
    ///
    /// Builds the endpoint URL from the resource's declared `path`, applies
    /// the fetch options as query parameters, and parses the body according
    /// to the declared format (`jsonl` is split per line; everything else is
    /// parsed as JSON, with a non-array body wrapped in a one-element vec).
    pub async fn fetch_resource(
        &self,
        base_url: &str,
        resource: &Resource,
        options: &FetchOptions,
    ) -> Result<Vec<Value>, ClientError> {
        let url = build_resource_url(base_url, &resource.path, options)?;
        let url_str = url.to_string();

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|source| ClientError::Http {
            url: url_str.clone(),
            source,
        })?;

        parse_resource_body(resource.format, &text).map_err(|e| ClientError::InvalidJson {
            url: url_str,
            reason: e.to_string(),
        })
    }
}

/// The well-known document URL for a site base URL.
pub fn well_known_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), WELL_KNOWN_PATH)
}

/// Build a resource endpoint URL with filter and pagination parameters.
fn build_resource_url(
    base_url: &str,
    path: &str,
    options: &FetchOptions,
) -> Result<Url, ClientError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
        base: base_url.to_string(),
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    // query_pairs_mut leaves a dangling "?" behind when nothing is appended
    if !options.params.is_empty() || options.limit.is_some() || options.offset.is_some() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &options.params {
            pairs.append_pair(key, value);
        }
        if let Some(limit) = options.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(offset) = options.offset {
            pairs.append_pair("offset", &offset.to_string());
        }
    }

    Ok(url)
}

/// Parse a resource response body according to its declared format.
fn parse_resource_body(
    format: ResourceFormat,
    text: &str,
) -> Result<Vec<Value>, serde_json::Error> {
    if format == ResourceFormat::Jsonl {
        return text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect();
    }

    let parsed: Value = serde_json::from_str(text)?;
    Ok(match parsed {
        Value::Array(items) => items,
        other => vec![other],
    })
}
