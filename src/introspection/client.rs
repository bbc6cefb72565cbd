//! Introspection fetch over HTTP and from saved payloads.

use std::collections::BTreeMap;
use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use super::types::{INTROSPECTION_QUERY, IntrospectionResponse, IntrospectionSchema};
use crate::core::GqldocsError;

/// HTTP client for the standard introspection query.
///
/// Carries the extra headers (typically auth) configured under
/// `[endpoint.headers]` in `gqldocs.toml`; they are sent with every request.
#[derive(Debug)]
pub struct SchemaClient {
    http: reqwest::Client,
    headers: HeaderMap,
}

impl SchemaClient {
    /// Build a client with optional extra request headers.
    ///
    /// # Errors
    ///
    /// Fails with [`GqldocsError::ConfigParseError`] when a configured header
    /// name or value is not valid HTTP.
    pub fn new(extra_headers: &BTreeMap<String, String>) -> Result<Self, GqldocsError> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                GqldocsError::ConfigParseError {
                    file: "gqldocs.toml".to_string(),
                    reason: format!("invalid header name '{name}': {e}"),
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|e| GqldocsError::ConfigParseError {
                    file: "gqldocs.toml".to_string(),
                    reason: format!("invalid value for header '{name}': {e}"),
                })?;
            headers.insert(name, value);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            headers,
        })
    }

    /// POST the introspection query to `url` and return the schema.
    ///
    /// # Errors
    ///
    /// - [`GqldocsError::IntrospectionRequestFailed`] when the request never
    ///   completes (DNS, connection, timeout).
    /// - [`GqldocsError::IntrospectionHttpStatus`] on a non-2xx response.
    /// - [`GqldocsError::IntrospectionErrors`] when the GraphQL response
    ///   carries `errors` (e.g. introspection disabled).
    /// - [`GqldocsError::SchemaPayloadInvalid`] when the body is not a
    ///   recognizable introspection result.
    pub async fn fetch(&self, url: &str) -> Result<IntrospectionSchema, GqldocsError> {
        debug!("sending introspection query to {url}");

        let response = self
            .http
            .post(url)
            .headers(self.headers.clone())
            .json(&serde_json::json!({ "query": INTROSPECTION_QUERY }))
            .send()
            .await
            .map_err(|e| GqldocsError::IntrospectionRequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("introspection request to {url} failed with {status}");
            return Err(GqldocsError::IntrospectionHttpStatus {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let body: IntrospectionResponse =
            response
                .json()
                .await
                .map_err(|e| GqldocsError::SchemaPayloadInvalid {
                    origin: url.to_string(),
                    reason: e.to_string(),
                })?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let messages = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GqldocsError::IntrospectionErrors {
                url: url.to_string(),
                messages,
            });
        }

        let schema = body
            .data
            .ok_or_else(|| GqldocsError::SchemaPayloadInvalid {
                origin: url.to_string(),
                reason: "response has neither data nor errors".to_string(),
            })?
            .schema;

        debug!(
            "introspection returned {} types from {url}",
            schema.types.len()
        );
        Ok(schema)
    }
}

/// Load a saved introspection payload from disk.
///
/// Accepts either the full response envelope (`{"data": {"__schema": ...}}`)
/// or a bare `{"__schema": ...}` object, which is what most tools emit.
///
/// # Errors
///
/// [`GqldocsError::IoError`] when the file cannot be read,
/// [`GqldocsError::SchemaPayloadInvalid`] when it is not an introspection
/// result.
pub fn load_schema_file(path: &Path) -> Result<IntrospectionSchema, GqldocsError> {
    debug!("loading introspection payload from {}", path.display());
    let raw = std::fs::read_to_string(path)?;

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| GqldocsError::SchemaPayloadInvalid {
            origin: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let schema_value = value
        .get("data")
        .and_then(|d| d.get("__schema"))
        .or_else(|| value.get("__schema"))
        .cloned()
        .ok_or_else(|| GqldocsError::SchemaPayloadInvalid {
            origin: path.display().to_string(),
            reason: "no __schema object found".to_string(),
        })?;

    serde_json::from_value(schema_value).map_err(|e| GqldocsError::SchemaPayloadInvalid {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_SCHEMA: &str = r#"{
        "queryType": { "name": "Query" },
        "mutationType": null,
        "subscriptionType": null,
        "types": [],
        "directives": []
    }"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bare_schema_object() {
        let file = write_temp(&format!("{{\"__schema\": {MINIMAL_SCHEMA}}}"));
        let schema = load_schema_file(file.path()).unwrap();
        assert_eq!(schema.query_type.name, "Query");
    }

    #[test]
    fn test_load_full_envelope() {
        let file = write_temp(&format!(
            "{{\"data\": {{\"__schema\": {MINIMAL_SCHEMA}}}}}"
        ));
        let schema = load_schema_file(file.path()).unwrap();
        assert_eq!(schema.query_type.name, "Query");
    }

    #[test]
    fn test_load_rejects_unrelated_json() {
        let file = write_temp("{\"hello\": \"world\"}");
        let err = load_schema_file(file.path()).unwrap_err();
        assert!(matches!(err, GqldocsError::SchemaPayloadInvalid { .. }));
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let mut headers = BTreeMap::new();
        headers.insert("bad header\n".to_string(), "x".to_string());
        let err = SchemaClient::new(&headers).unwrap_err();
        assert!(matches!(err, GqldocsError::ConfigParseError { .. }));
    }
}
