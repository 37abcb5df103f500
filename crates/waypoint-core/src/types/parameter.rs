//! Parameter declarations
//!
//! Parameters are the typed, named inputs of a resolution. Their declarations
//! ship with the compiled diagram; values are supplied per call.

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Declared type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamType {
    String,
    #[serde(alias = "stringList")]
    StringArray,
    Boolean,
}

impl ParamType {
    /// Whether a value is acceptable for this parameter type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.as_str().is_some(),
            ParamType::Boolean => value.as_bool().is_some(),
            ParamType::StringArray => value.to_string_list().is_some(),
        }
    }

    /// The zero value substituted by lenient evaluation
    pub fn zero_value(&self) -> Value {
        match self {
            ParamType::String => Value::String(String::new()),
            ParamType::Boolean => Value::Bool(false),
            ParamType::StringArray => Value::StringList(Vec::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::StringArray => "stringArray",
            ParamType::Boolean => "boolean",
        }
    }
}

/// A literal parameter value as it appears in documents (defaults, builtins)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    String(String),
    StringList(Vec<String>),
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(b),
            Literal::String(s) => Value::String(s),
            Literal::StringList(list) => Value::StringList(list),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Vec<String>> for Literal {
    fn from(list: Vec<String>) -> Self {
        Literal::StringList(list)
    }
}

/// Deprecation notice attached to a parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Declaration of a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDef {
    /// Declared type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Whether resolution requires a value (after defaults are applied)
    #[serde(default)]
    pub required: bool,

    /// Value used when the caller does not supply one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,

    /// Host setting that populates this parameter (e.g. `AWS::Region`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub built_in: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
}

impl ParameterDef {
    /// Create a new parameter declaration
    pub fn new(param_type: ParamType) -> Self {
        Self {
            param_type,
            required: false,
            default: None,
            built_in: None,
            documentation: None,
            deprecated: None,
        }
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the builtIn binding
    pub fn with_built_in(mut self, built_in: impl Into<String>) -> Self {
        self.built_in = Some(built_in.into());
        self
    }

    /// Default value lifted into a `Value`
    pub fn default_value(&self) -> Option<Value> {
        self.default.clone().map(Value::from)
    }
}
