//! Error types for Waypoint Core

use thiserror::Error;

/// Core error type
///
/// Every variant describes a malformed build-time artifact. None of them can
/// be produced while resolving; they surface when a diagram is loaded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid node reference: {0}")]
    InvalidNodeRef(i64),

    #[error("Node reference {reference} points outside of {kind} table (len {len})")]
    RefOutOfRange {
        reference: i64,
        kind: &'static str,
        len: usize,
    },

    #[error("Node {node} references condition {condition}, but only {count} conditions exist")]
    ConditionOutOfRange {
        node: usize,
        condition: usize,
        count: usize,
    },

    #[error("Decision diagram contains a cycle through node {0}")]
    CyclicDiagram(usize),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function `{function}` expects {expected} arguments, got {actual}")]
    ArityMismatch {
        function: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("Invalid template `{template}`: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Invalid attribute path `{0}`")]
    InvalidAttrPath(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
