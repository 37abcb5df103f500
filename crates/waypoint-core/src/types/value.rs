//! Runtime value types for Waypoint expressions
//!
//! The `Value` enum is the tagged union stored in the resolution context and
//! passed between library functions. Absence is never a `Value`; it is
//! modelled as `Option<Value>` by the code that evaluates expressions.

use crate::ast::{AttrPath, PathSegment};
use crate::types::records::{Arn, Partition, Url};
use serde::Serialize;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Integer value (only produced by literals)
    Integer(i64),
    /// String value
    String(String),
    /// List of strings
    StringList(Vec<String>),
    /// Parsed URL record
    Url(Url),
    /// Partition record
    Partition(Partition),
    /// Parsed ARN record
    Arn(Arn),
    /// Free-form document (record and array literals)
    Document(serde_json::Value),
}

impl Value {
    /// Name of the value's type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::StringList(_) => "stringArray",
            Value::Url(_) => "url",
            Value::Partition(_) => "partition",
            Value::Arn(_) => "arn",
            Value::Document(_) => "document",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Document(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Document(serde_json::Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Document(doc) => doc.as_i64(),
            _ => None,
        }
    }

    /// Borrow or convert to a list of strings.
    ///
    /// Document arrays qualify only when every element is a string.
    pub fn to_string_list(&self) -> Option<Vec<String>> {
        match self {
            Value::StringList(list) => Some(list.clone()),
            Value::Document(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// Render the value into a template.
    ///
    /// Only scalar values can be spliced into a string.
    pub fn to_template_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Document(serde_json::Value::String(s)) => Some(s.clone()),
            Value::Document(serde_json::Value::Bool(b)) => Some(b.to_string()),
            Value::Document(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Convert into a generic document for endpoint properties
    pub fn to_document(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::StringList(list) => serde_json::Value::Array(
                list.iter().cloned().map(serde_json::Value::String).collect(),
            ),
            Value::Document(doc) => doc.clone(),
            // Records serialize with their rule-set member names
            Value::Url(_) | Value::Partition(_) | Value::Arn(_) => {
                serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
            }
        }
    }

    /// Walk an attribute path (`authority`, `resourceId[0]`, `a.b[1]`).
    ///
    /// Returns `None` when a member does not exist or an index is out of
    /// bounds.
    pub fn get_attr(&self, path: &AttrPath) -> Option<Value> {
        let mut current = self.clone();
        for segment in path.segments() {
            current = current.get_segment(segment)?;
        }
        Some(current)
    }

    fn get_segment(&self, segment: &PathSegment) -> Option<Value> {
        match (self, segment) {
            (Value::Url(url), PathSegment::Field(name)) => url.member(name),
            (Value::Partition(partition), PathSegment::Field(name)) => partition.member(name),
            (Value::Arn(arn), PathSegment::Field(name)) => arn.member(name),
            (Value::StringList(list), PathSegment::Index(index)) => {
                list.get(*index).cloned().map(Value::String)
            }
            (Value::Document(serde_json::Value::Object(map)), PathSegment::Field(name)) => {
                map.get(name).map(Value::from_document)
            }
            (Value::Document(serde_json::Value::Array(items)), PathSegment::Index(index)) => {
                items.get(*index).map(Value::from_document)
            }
            _ => None,
        }
    }

    /// Lift a document into the most specific value variant
    pub fn from_document(doc: &serde_json::Value) -> Value {
        match doc {
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) if n.is_i64() => {
                Value::Integer(n.as_i64().unwrap_or_default())
            }
            other => Value::Document(other.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(list: Vec<String>) -> Self {
        Value::StringList(list)
    }
}

impl From<Vec<&str>> for Value {
    fn from(list: Vec<&str>) -> Self {
        Value::StringList(list.into_iter().map(str::to_string).collect())
    }
}
