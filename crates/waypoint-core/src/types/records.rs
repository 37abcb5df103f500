//! Structured records produced by the function library
//!
//! Each record exposes its members to `getAttr` and template placeholders
//! under the camelCase names used in rule sets (e.g. `{url#normalizedPath}`).

use serde::{Deserialize, Serialize};

/// Components of a parsed endpoint URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Url {
    /// `http` or `https`
    pub scheme: String,
    /// Host and optional port exactly as written
    pub authority: String,
    /// Path exactly as written; empty when the URL has no path
    pub path: String,
    /// Path with guaranteed leading and trailing `/`
    pub normalized_path: String,
    /// Whether the host is an IPv4 or IPv6 literal
    pub is_ip: bool,
}

impl Url {
    /// Look up a member by its rule-set name
    pub fn member(&self, name: &str) -> Option<super::Value> {
        use super::Value;
        match name {
            "scheme" => Some(Value::String(self.scheme.clone())),
            "authority" => Some(Value::String(self.authority.clone())),
            "path" => Some(Value::String(self.path.clone())),
            "normalizedPath" => Some(Value::String(self.normalized_path.clone())),
            "isIp" => Some(Value::Bool(self.is_ip)),
            _ => None,
        }
    }
}

/// Partition metadata for a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub name: String,
    pub dns_suffix: String,
    pub dual_stack_dns_suffix: String,
    #[serde(rename = "supportsFIPS")]
    pub supports_fips: bool,
    pub supports_dual_stack: bool,
    pub implicit_global_region: String,
}

impl Partition {
    /// Look up a member by its rule-set name
    pub fn member(&self, name: &str) -> Option<super::Value> {
        use super::Value;
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "dnsSuffix" => Some(Value::String(self.dns_suffix.clone())),
            "dualStackDnsSuffix" => Some(Value::String(self.dual_stack_dns_suffix.clone())),
            "supportsFIPS" => Some(Value::Bool(self.supports_fips)),
            "supportsDualStack" => Some(Value::Bool(self.supports_dual_stack)),
            "implicitGlobalRegion" => Some(Value::String(self.implicit_global_region.clone())),
            _ => None,
        }
    }
}

/// Components of an Amazon Resource Name
///
/// `arn:partition:service:region:account-id:resource`, with the resource
/// split on `:` and `/` into `resource_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource_id: Vec<String>,
}

impl Arn {
    /// Look up a member by its rule-set name
    pub fn member(&self, name: &str) -> Option<super::Value> {
        use super::Value;
        match name {
            "partition" => Some(Value::String(self.partition.clone())),
            "service" => Some(Value::String(self.service.clone())),
            "region" => Some(Value::String(self.region.clone())),
            "accountId" => Some(Value::String(self.account_id.clone())),
            "resourceId" => Some(Value::StringList(self.resource_id.clone())),
            _ => None,
        }
    }
}
