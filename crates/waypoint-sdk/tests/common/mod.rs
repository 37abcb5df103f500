//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use serde_json::{json, Value as Json};
use std::path::{Path, PathBuf};
use waypoint_sdk::{DiagramFormat, Endpoint, EndpointResolver, EndpointResolverBuilder};

const RESULT_REF_OFFSET: i64 = 100_000_000;

/// Encoded reference to decision node `index`
pub fn node(index: i64) -> i64 {
    index + 2
}

/// Encoded reference to result `index`
pub fn result(index: i64) -> i64 {
    RESULT_REF_OFFSET + index
}

/// Test helper to assemble a decision diagram document piece by piece
pub struct DiagramFixture {
    parameters: serde_json::Map<String, Json>,
    conditions: Vec<Json>,
    nodes: Vec<Json>,
    results: Vec<Json>,
    root: i64,
}

impl DiagramFixture {
    /// Create an empty fixture whose root is the FALSE terminal
    pub fn new() -> Self {
        Self {
            parameters: serde_json::Map::new(),
            conditions: Vec::new(),
            nodes: Vec::new(),
            results: Vec::new(),
            root: -1,
        }
    }

    /// Declare a parameter
    pub fn with_parameter(mut self, name: &str, def: Json) -> Self {
        self.parameters.insert(name.to_string(), def);
        self
    }

    /// Append a condition
    pub fn with_condition(mut self, condition: Json) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append a decision node
    pub fn with_node(mut self, condition: usize, high: i64, low: i64) -> Self {
        self.nodes.push(json!([condition, high, low]));
        self
    }

    /// Append a result
    pub fn with_result(mut self, result: Json) -> Self {
        self.results.push(result);
        self
    }

    pub fn with_root(mut self, root: i64) -> Self {
        self.root = root;
        self
    }

    /// The diagram document
    pub fn to_json(&self) -> Json {
        json!({
            "version": "1.0",
            "parameters": self.parameters,
            "conditions": self.conditions,
            "nodes": self.nodes,
            "root": self.root,
            "results": self.results,
        })
    }

    /// Write the diagram as JSON into `dir`
    pub fn write_json(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(format!("{}.json", name));
        std::fs::write(&path, serde_json::to_string_pretty(&self.to_json()).unwrap()).unwrap();
        path
    }

    /// Write the diagram as YAML into `dir`
    pub fn write_yaml(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(format!("{}.yaml", name));
        std::fs::write(&path, serde_yaml::to_string(&self.to_json()).unwrap()).unwrap();
        path
    }

    /// Builder preloaded with this diagram
    pub fn builder(&self) -> EndpointResolverBuilder {
        EndpointResolverBuilder::new()
            .with_diagram_content(self.to_json().to_string(), DiagramFormat::Json)
    }

    /// Resolver with default settings
    pub fn resolver(&self) -> EndpointResolver {
        self.builder().build().expect("fixture builds")
    }
}

impl Default for DiagramFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A regional service diagram with FIPS, dual-stack and custom endpoint support
pub fn regional_service() -> DiagramFixture {
    DiagramFixture::new()
        .with_parameter(
            "Region",
            json!({"type": "string", "builtIn": "AWS::Region", "required": true}),
        )
        .with_parameter(
            "UseFIPS",
            json!({"type": "boolean", "builtIn": "AWS::UseFIPS", "required": true, "default": false}),
        )
        .with_parameter(
            "UseDualStack",
            json!({"type": "boolean", "builtIn": "AWS::UseDualStack", "required": true, "default": false}),
        )
        .with_parameter(
            "Endpoint",
            json!({"type": "string", "builtIn": "SDK::Endpoint"}),
        )
        // 0
        .with_condition(json!({"fn": "isSet", "argv": [{"ref": "Endpoint"}]}))
        // 1
        .with_condition(json!({"fn": "parseURL", "argv": [{"ref": "Endpoint"}], "assign": "url"}))
        // 2
        .with_condition(json!({"fn": "aws.partition", "argv": [{"ref": "Region"}], "assign": "PartitionResult"}))
        // 3
        .with_condition(json!({"fn": "booleanEquals", "argv": [{"ref": "UseFIPS"}, true]}))
        // 4
        .with_condition(json!({"fn": "booleanEquals", "argv": [{"ref": "UseDualStack"}, true]}))
        // 5
        .with_condition(json!({
            "fn": "booleanEquals",
            "argv": [{"fn": "getAttr", "argv": [{"ref": "PartitionResult"}, "supportsFIPS"]}, true]
        }))
        .with_node(0, node(1), node(2))
        .with_node(1, result(0), result(1))
        .with_node(2, node(3), result(2))
        .with_node(3, node(4), node(6))
        .with_node(5, node(5), result(3))
        .with_node(4, result(4), result(7))
        .with_node(4, result(5), result(6))
        .with_root(node(0))
        // 0
        .with_result(json!({"type": "endpoint", "url": "{url#scheme}://{url#authority}{url#normalizedPath}"}))
        // 1
        .with_result(json!({"type": "error", "error": "Invalid Configuration: Custom endpoint `{Endpoint}` was not a valid URI"}))
        // 2
        .with_result(json!({"type": "error", "error": "Invalid Configuration: Missing Region"}))
        // 3
        .with_result(json!({"type": "error", "error": "FIPS is enabled but this partition does not support FIPS"}))
        // 4
        .with_result(json!({"type": "endpoint", "url": "https://svc-fips.{Region}.{PartitionResult#dualStackDnsSuffix}"}))
        // 5
        .with_result(json!({"type": "endpoint", "url": "https://svc.{Region}.{PartitionResult#dualStackDnsSuffix}"}))
        // 6
        .with_result(json!({
            "type": "endpoint",
            "url": "https://svc.{Region}.{PartitionResult#dnsSuffix}",
            "properties": {
                "authSchemes": [{"name": "sigv4", "signingName": "svc", "signingRegion": "{Region}"}]
            }
        }))
        // 7
        .with_result(json!({"type": "endpoint", "url": "https://svc-fips.{Region}.{PartitionResult#dnsSuffix}"}))
}

/// Assertion helpers for resolved endpoints
pub trait EndpointAssertions {
    fn assert_url(&self, expected: &str);
    fn assert_header(&self, name: &str, expected: &[&str]);
    fn assert_signing_region(&self, expected: &str);
}

impl EndpointAssertions for Endpoint {
    fn assert_url(&self, expected: &str) {
        assert_eq!(self.url(), expected, "Expected url {}, got {}", expected, self.url());
    }

    fn assert_header(&self, name: &str, expected: &[&str]) {
        let actual = self
            .header(name)
            .unwrap_or_else(|| panic!("Expected header {} to be present", name));
        assert_eq!(actual, expected, "Header {} mismatch", name);
    }

    fn assert_signing_region(&self, expected: &str) {
        let schemes = self.auth_schemes().expect("Expected authSchemes property");
        assert_eq!(
            schemes[0]["signingRegion"],
            Json::String(expected.to_string()),
            "Expected signing region {}",
            expected
        );
    }
}
