//! # Discovery Document Model
//!
//! Typed shapes for the FlyWeb discovery document: the JSON object a site
//! serves at [`WELL_KNOWN_PATH`] to declare which structured resources it
//! exposes to automated agents.
//!
//! These types exist for *producers* — code that builds a document and
//! serializes it. Untrusted inbound documents are never deserialized into
//! these types directly; they go through [`crate::validate::validate`]
//! first, which reports every structural violation instead of failing on
//! the first serde type mismatch.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single accepted protocol version literal.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Fixed relative path where the discovery document is served.
pub const WELL_KNOWN_PATH: &str = "/.well-known/flyweb.json";

/// Data format a resource endpoint serves its records in.
///
/// This is a closed set — the validator rejects anything outside it.
/// Note the contrast with `entityType`, which is deliberately an open
/// string: a preferred vocabulary exists, but custom values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    /// One JSON array per response.
    Json,
    /// Newline-delimited JSON, one record per line.
    Jsonl,
    /// Comma-separated values.
    Csv,
    /// XML document.
    Xml,
}

impl ResourceFormat {
    /// All accepted formats, in the order they appear in error messages.
    pub const ACCEPTED: [ResourceFormat; 4] = [Self::Json, Self::Jsonl, Self::Csv, Self::Xml];

    /// The lowercase wire name of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonl => "jsonl",
            Self::Csv => "csv",
            Self::Xml => "xml",
        }
    }

    /// Comma-separated list of accepted format names, for error messages.
    pub fn accepted_list() -> String {
        Self::ACCEPTED
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized format name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown resource format \"{name}\", must be one of json, jsonl, csv, xml")]
pub struct FormatParseError {
    /// The unrecognized format name.
    pub name: String,
}

impl FromStr for ResourceFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::Jsonl),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            other => Err(FormatParseError {
                name: other.to_string(),
            }),
        }
    }
}

/// A named structured-data endpoint declared in the discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// URL path where this resource's records are served. Must start with `/`.
    pub path: String,

    /// Data format of the response body.
    pub format: ResourceFormat,

    /// Field names present in the returned records.
    pub fields: Vec<String>,

    /// Query URL pattern with parameter placeholders, e.g. `?tag={tag}&limit={n}`.
    /// The template syntax is not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Human-readable description of this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this resource requires authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<bool>,
}

impl Resource {
    /// Create a resource with the required fields; optionals start empty.
    pub fn new(
        path: impl Into<String>,
        format: ResourceFormat,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            path: path.into(),
            format,
            fields: fields.into_iter().map(Into::into).collect(),
            query: None,
            description: None,
            auth: None,
        }
    }
}

/// The root discovery document.
///
/// Optional fields are skipped during serialization so that any document
/// built from these types round-trips through the validator as valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    /// Protocol version. Must be [`PROTOCOL_VERSION`].
    pub protocol_version: String,

    /// Name of the entity (website, organization, or app).
    pub entity: String,

    /// Kind of content this entity primarily serves (open vocabulary:
    /// `blog`, `news`, `docs`, `ecommerce`, ... or any non-empty string).
    pub entity_type: String,

    /// Human-readable description of the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Canonical URL of the website. Syntax is not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Resources exposed by this entity, keyed by name. Must be non-empty.
    pub resources: BTreeMap<String, Resource>,
}

impl DiscoveryDocument {
    /// Create a document with the required root fields and no resources.
    pub fn new(
        entity: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            entity: entity.into(),
            entity_type: entity_type.into(),
            description: None,
            url: None,
            resources: BTreeMap::new(),
        }
    }

    /// Add a named resource, returning `self` for chaining.
    pub fn with_resource(mut self, name: impl Into<String>, resource: Resource) -> Self {
        self.resources.insert(name.into(), resource);
        self
    }

    /// The starter document emitted by `flyweb init`: a blog entity with a
    /// single `posts` resource.
    pub fn starter() -> Self {
        let posts = Resource {
            path: "/.flyweb/posts".to_string(),
            format: ResourceFormat::Jsonl,
            fields: ["title", "author", "date", "summary", "content", "tags"]
                .into_iter()
                .map(String::from)
                .collect(),
            query: Some("?tag={tag}&limit={n}".to_string()),
            description: None,
            auth: None,
        };
        Self::new("My Website", "blog").with_resource("posts", posts)
    }

    /// Serialize this document and run the structural validator over it.
    ///
    /// Producers call this before serving or persisting a document; a
    /// `valid: false` result is advisory on the write path.
    pub fn validate(&self) -> crate::validate::ValidationResult {
        // Serialization of these plain types cannot fail; fall back to Null
        // (reported as "not a plain object") rather than panicking.
        let value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        crate::validate::validate(&value)
    }
}
