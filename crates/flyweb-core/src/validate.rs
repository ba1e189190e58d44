//! # Discovery Document Validation
//!
//! Structural validation of untrusted, decoded-JSON discovery documents.
//!
//! ## Contract
//!
//! [`validate`] never fails and never stops at the first violation: it walks
//! the whole document and returns *every* structural violation as a
//! field-qualified, human-readable string (`resources.posts.fields[2]: ...`).
//! Malformed input is exactly what this routine exists to report, so the
//! input type is the broadest decoded-JSON value — documents are never
//! deserialized into typed shapes before validation, or a single type
//! mismatch would abort parsing with a far less specific message.
//!
//! ## Severity is the caller's decision
//!
//! Producers (route handlers, static publishers) treat `valid: false` as a
//! warning and serve the document anyway; consumers (`flyweb check`, the
//! client's `discover`) treat it as a hard failure. This asymmetry is part
//! of the protocol: a broken document must never take down content serving,
//! while an explicit check must catch it loudly.

use serde_json::{Map, Value};

use crate::document::{ResourceFormat, PROTOCOL_VERSION};

/// Outcome of validating one document: a validity flag and the ordered list
/// of violations. `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the document conforms to the schema.
    pub valid: bool,
    /// One human-readable message per violation, in check order: root
    /// fields first, then resources in document order, then fields within
    /// each resource.
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate an arbitrary decoded-JSON value against the discovery-document
/// schema.
///
/// Pure function: the input is only read, never retained or mutated. Safe
/// to call concurrently from any number of threads.
pub fn validate(document: &Value) -> ValidationResult {
    let Some(doc) = document.as_object() else {
        return ValidationResult {
            valid: false,
            errors: vec!["<root> must be a plain object".to_string()],
        };
    };

    let mut errors = Vec::new();

    // protocolVersion: literal equality against the accepted version.
    match doc.get("protocolVersion") {
        Some(Value::String(v)) if v == PROTOCOL_VERSION => {}
        Some(other) => errors.push(format!(
            "protocolVersion: must be \"{PROTOCOL_VERSION}\", got {other}"
        )),
        None => errors.push(format!(
            "protocolVersion: must be \"{PROTOCOL_VERSION}\", got nothing"
        )),
    }

    if !is_non_empty_string(doc.get("entity")) {
        errors.push("entity: required, must be a non-empty string".to_string());
    }

    if !is_non_empty_string(doc.get("entityType")) {
        errors.push("entityType: required, must be a non-empty string".to_string());
    }

    check_optional_string(doc, "description", "", &mut errors);
    check_optional_string(doc, "url", "", &mut errors);

    match doc.get("resources") {
        Some(Value::Object(resources)) => {
            if resources.is_empty() {
                errors.push("resources: must contain at least one resource".to_string());
            }
            // Insertion order: serde_json's preserve_order feature keeps
            // map iteration in document order.
            for (name, resource) in resources {
                validate_resource(name, resource, &mut errors);
            }
        }
        _ => errors.push("resources: required, must be an object".to_string()),
    }

    ValidationResult::from_errors(errors)
}

/// Check one entry of the `resources` map, prefixing every message with
/// `resources.<name>`.
fn validate_resource(name: &str, resource: &Value, errors: &mut Vec<String>) {
    let prefix = format!("resources.{name}");

    let Some(r) = resource.as_object() else {
        errors.push(format!("{prefix}: must be an object"));
        return;
    };

    // path: the missing/wrong-type and wrong-prefix errors are mutually
    // exclusive — at most one fires per resource.
    match r.get("path") {
        Some(Value::String(path)) if !path.is_empty() => {
            if !path.starts_with('/') {
                errors.push(format!("{prefix}.path: must start with \"/\""));
            }
        }
        _ => errors.push(format!(
            "{prefix}.path: required, must be a non-empty string"
        )),
    }

    let accepted = ResourceFormat::accepted_list();
    match r.get("format") {
        Some(Value::String(format)) if !format.is_empty() => {
            if format.parse::<ResourceFormat>().is_err() {
                errors.push(format!(
                    "{prefix}.format: must be one of {accepted}, got \"{format}\""
                ));
            }
        }
        _ => errors.push(format!("{prefix}.format: required, must be one of {accepted}")),
    }

    match r.get("fields") {
        Some(Value::Array(fields)) => {
            if fields.is_empty() {
                errors.push(format!("{prefix}.fields: must contain at least one field"));
            } else {
                for (i, field) in fields.iter().enumerate() {
                    if !field.is_string() {
                        errors.push(format!("{prefix}.fields[{i}]: must be a string"));
                    }
                }
            }
        }
        _ => errors.push(format!(
            "{prefix}.fields: required, must be an array of strings"
        )),
    }

    check_optional_string(r, "query", &prefix, errors);
    check_optional_string(r, "description", &prefix, errors);

    if let Some(auth) = r.get("auth") {
        if !auth.is_boolean() {
            errors.push(format!("{prefix}.auth: must be a boolean if provided"));
        }
    }
}

/// True when the value is a string with at least one character.
fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.is_empty())
}

/// Append an error when an optional field is present but not a string.
/// An empty `prefix` qualifies root-level fields.
fn check_optional_string(obj: &Map<String, Value>, key: &str, prefix: &str, errors: &mut Vec<String>) {
    if let Some(value) = obj.get(key) {
        if !value.is_string() {
            if prefix.is_empty() {
                errors.push(format!("{key}: must be a string if provided"));
            } else {
                errors.push(format!("{prefix}.{key}: must be a string if provided"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_valid() -> Value {
        json!({
            "protocolVersion": "1.0",
            "entity": "Acme",
            "entityType": "blog",
            "resources": {
                "posts": {
                    "path": "/.flyweb/posts",
                    "format": "jsonl",
                    "fields": ["title", "date"]
                }
            }
        })
    }

    #[test]
    fn accepts_minimal_valid_document() {
        let result = validate(&minimal_valid());
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn accepts_document_with_all_optionals() {
        let result = validate(&json!({
            "protocolVersion": "1.0",
            "entity": "Acme",
            "entityType": "news",
            "description": "A news site",
            "url": "https://acme.example",
            "resources": {
                "articles": {
                    "path": "/.flyweb/articles",
                    "format": "json",
                    "fields": ["headline"],
                    "query": "?tag={tag}",
                    "description": "Published articles",
                    "auth": false
                }
            }
        }));
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
    }

    // -- Non-object roots ---------------------------------------------------

    #[test]
    fn rejects_non_object_roots_with_single_error() {
        for input in [
            json!(null),
            json!(true),
            json!(42),
            json!("flyweb"),
            json!(["not", "an", "object"]),
        ] {
            let result = validate(&input);
            assert!(!result.valid);
            assert_eq!(
                result.errors,
                vec!["<root> must be a plain object".to_string()],
                "input: {input}"
            );
        }
    }

    // -- Root-level fields --------------------------------------------------

    #[test]
    fn reports_wrong_protocol_version_with_expected_and_actual() {
        let mut doc = minimal_valid();
        doc["protocolVersion"] = json!("2.0");
        let result = validate(&doc);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("\"1.0\""));
        assert!(result.errors[0].contains("2.0"));
    }

    #[test]
    fn reports_missing_protocol_version() {
        let mut doc = minimal_valid();
        doc.as_object_mut().unwrap().remove("protocolVersion");
        let result = validate(&doc);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("protocolVersion"));
    }

    #[test]
    fn reports_empty_entity_as_missing() {
        let mut doc = minimal_valid();
        doc["entity"] = json!("");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["entity: required, must be a non-empty string".to_string()]
        );
    }

    #[test]
    fn reports_non_string_entity_type() {
        let mut doc = minimal_valid();
        doc["entityType"] = json!(7);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["entityType: required, must be a non-empty string".to_string()]
        );
    }

    #[test]
    fn entity_type_is_open_vocabulary() {
        let mut doc = minimal_valid();
        doc["entityType"] = json!("interpretive-dance-archive");
        assert!(validate(&doc).valid);
    }

    #[test]
    fn optional_root_fields_must_be_strings_when_present() {
        let mut doc = minimal_valid();
        doc["description"] = json!(17);
        doc["url"] = json!(["https://acme.example"]);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec![
                "description: must be a string if provided".to_string(),
                "url: must be a string if provided".to_string(),
            ]
        );
    }

    // -- Multiplicity and ordering ------------------------------------------

    #[test]
    fn accumulates_multiple_root_violations_in_check_order() {
        // Wrong version AND missing entity/entityType AND empty resources:
        // all reported together, root fields in declaration order.
        let result = validate(&json!({
            "protocolVersion": "2.0",
            "resources": {}
        }));
        assert!(!result.valid);
        assert!(result.errors.len() >= 4, "errors: {:?}", result.errors);
        assert!(result.errors[0].starts_with("protocolVersion"));
        assert!(result.errors[1].starts_with("entity:"));
        assert!(result.errors[2].starts_with("entityType"));
        assert!(result.errors[3].contains("at least one resource"));
    }

    #[test]
    fn resource_errors_follow_root_errors() {
        let result = validate(&json!({
            "protocolVersion": "1.0",
            "entity": "",
            "entityType": "blog",
            "resources": {
                "posts": { "path": 5, "format": "jsonl", "fields": ["a"] }
            }
        }));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].starts_with("entity:"));
        assert!(result.errors[1].starts_with("resources.posts.path"));
    }

    // -- resources map ------------------------------------------------------

    #[test]
    fn missing_resources_reported_without_per_resource_checks() {
        let result = validate(&json!({
            "protocolVersion": "1.0",
            "entity": "Acme",
            "entityType": "blog"
        }));
        assert_eq!(
            result.errors,
            vec!["resources: required, must be an object".to_string()]
        );
    }

    #[test]
    fn array_resources_is_not_an_object() {
        let mut doc = minimal_valid();
        doc["resources"] = json!([]);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources: required, must be an object".to_string()]
        );
    }

    #[test]
    fn empty_resources_distinct_from_missing() {
        let mut doc = minimal_valid();
        doc["resources"] = json!({});
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources: must contain at least one resource".to_string()]
        );
    }

    #[test]
    fn non_object_resource_short_circuits_field_checks() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"] = json!("not an object");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts: must be an object".to_string()]
        );
    }

    #[test]
    fn resources_checked_in_insertion_order() {
        let result = validate(&json!({
            "protocolVersion": "1.0",
            "entity": "Acme",
            "entityType": "blog",
            "resources": {
                "zeta": { "path": "bad" },
                "alpha": { "path": "also-bad" }
            }
        }));
        let zeta_pos = result.errors.iter().position(|e| e.contains("zeta"));
        let alpha_pos = result.errors.iter().position(|e| e.contains("alpha"));
        assert!(zeta_pos < alpha_pos, "errors: {:?}", result.errors);
    }

    // -- path ---------------------------------------------------------------

    #[test]
    fn path_without_leading_slash() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["path"] = json!("flyweb/posts");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.path: must start with \"/\"".to_string()]
        );
    }

    #[test]
    fn path_with_leading_slash_passes() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["path"] = json!("/flyweb/posts");
        assert!(validate(&doc).valid);
    }

    #[test]
    fn path_errors_are_mutually_exclusive() {
        // A missing path never *also* reports the prefix violation.
        let mut doc = minimal_valid();
        doc["resources"]["posts"]
            .as_object_mut()
            .unwrap()
            .remove("path");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.path: required, must be a non-empty string".to_string()]
        );
    }

    #[test]
    fn empty_path_treated_as_missing() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["path"] = json!("");
        let result = validate(&doc);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("required"));
    }

    // -- format -------------------------------------------------------------

    #[test]
    fn unknown_format_lists_accepted_values() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["format"] = json!("yaml");
        let result = validate(&doc);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("json, jsonl, csv, xml"));
        assert!(result.errors[0].contains("\"yaml\""));
    }

    #[test]
    fn every_accepted_format_passes() {
        for format in ["json", "jsonl", "csv", "xml"] {
            let mut doc = minimal_valid();
            doc["resources"]["posts"]["format"] = json!(format);
            assert!(validate(&doc).valid, "format {format} rejected");
        }
    }

    #[test]
    fn missing_format_lists_accepted_values() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]
            .as_object_mut()
            .unwrap()
            .remove("format");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec![
                "resources.posts.format: required, must be one of json, jsonl, csv, xml"
                    .to_string()
            ]
        );
    }

    // -- fields -------------------------------------------------------------

    #[test]
    fn non_string_field_elements_reported_by_index() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["fields"] = json!(["title", 42, "date"]);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.fields[1]: must be a string".to_string()]
        );
    }

    #[test]
    fn multiple_bad_field_elements_each_reported() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["fields"] = json!([1, "ok", null, {"x": 1}]);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec![
                "resources.posts.fields[0]: must be a string".to_string(),
                "resources.posts.fields[2]: must be a string".to_string(),
                "resources.posts.fields[3]: must be a string".to_string(),
            ]
        );
    }

    #[test]
    fn empty_fields_array() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["fields"] = json!([]);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.fields: must contain at least one field".to_string()]
        );
    }

    #[test]
    fn non_array_fields_emits_one_error_without_element_checks() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["fields"] = json!("title,date");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.fields: required, must be an array of strings".to_string()]
        );
    }

    // -- optional resource fields -------------------------------------------

    #[test]
    fn optional_resource_fields_type_checked_when_present() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["query"] = json!(3);
        doc["resources"]["posts"]["description"] = json!(false);
        doc["resources"]["posts"]["auth"] = json!("yes");
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec![
                "resources.posts.query: must be a string if provided".to_string(),
                "resources.posts.description: must be a string if provided".to_string(),
                "resources.posts.auth: must be a boolean if provided".to_string(),
            ]
        );
    }

    #[test]
    fn null_optional_field_is_present_and_wrong_type() {
        let mut doc = minimal_valid();
        doc["resources"]["posts"]["query"] = json!(null);
        let result = validate(&doc);
        assert_eq!(
            result.errors,
            vec!["resources.posts.query: must be a string if provided".to_string()]
        );
    }

    // -- Purity -------------------------------------------------------------

    #[test]
    fn input_is_not_mutated() {
        let doc = json!({ "protocolVersion": "2.0", "resources": {} });
        let before = doc.clone();
        let _ = validate(&doc);
        assert_eq!(doc, before);
    }
}
