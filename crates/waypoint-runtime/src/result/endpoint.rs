//! Resolved endpoint

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property carrying the list of authentication schemes
pub const AUTH_SCHEMES_PROPERTY: &str = "authSchemes";

/// A fully rendered endpoint, ready for the transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    url: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    headers: IndexMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, serde_json::Value>,
}

impl Endpoint {
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in declaration order
    pub fn headers(&self) -> &IndexMap<String, Vec<String>> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.headers.get(name).map(Vec::as_slice)
    }

    pub fn properties(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    /// The `authSchemes` property, if it is a list
    pub fn auth_schemes(&self) -> Option<&[serde_json::Value]> {
        self.properties
            .get(AUTH_SCHEMES_PROPERTY)
            .and_then(serde_json::Value::as_array)
            .map(Vec::as_slice)
    }
}

/// Builder for [`Endpoint`]
#[derive(Debug, Clone, Default)]
pub struct EndpointBuilder {
    url: String,
    headers: IndexMap<String, Vec<String>>,
    properties: BTreeMap<String, serde_json::Value>,
}

impl EndpointBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append a value to a header, creating it if needed
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Declare a header with no values yet
    pub fn empty_header(mut self, name: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default();
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn build(self) -> Endpoint {
        Endpoint {
            url: self.url,
            headers: self.headers,
            properties: self.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_accumulates_header_values() {
        let endpoint = Endpoint::builder()
            .url("https://example.com")
            .header("x-amz-a", "1")
            .header("x-amz-b", "2")
            .header("x-amz-a", "3")
            .build();

        assert_eq!(endpoint.url(), "https://example.com");
        assert_eq!(endpoint.header("x-amz-a"), Some(&["1".to_string(), "3".to_string()][..]));
        let names: Vec<_> = endpoint.headers().keys().cloned().collect();
        assert_eq!(names, vec!["x-amz-a", "x-amz-b"]);
    }

    #[test]
    fn test_auth_schemes() {
        let endpoint = Endpoint::builder()
            .url("https://example.com")
            .property(
                "authSchemes",
                json!([{"name": "sigv4", "signingRegion": "us-east-1"}]),
            )
            .build();

        let schemes = endpoint.auth_schemes().unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0]["name"], json!("sigv4"));
    }

    #[test]
    fn test_auth_schemes_absent_or_not_a_list() {
        let endpoint = Endpoint::builder().url("https://example.com").build();
        assert!(endpoint.auth_schemes().is_none());

        let endpoint = Endpoint::builder()
            .url("https://example.com")
            .property("authSchemes", json!("sigv4"))
            .build();
        assert!(endpoint.auth_schemes().is_none());
    }

    #[test]
    fn test_serialization_skips_empty_maps() {
        let endpoint = Endpoint::builder().url("https://example.com").build();
        assert_eq!(
            serde_json::to_value(&endpoint).unwrap(),
            json!({"url": "https://example.com"})
        );
    }
}
