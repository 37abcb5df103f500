//! Runtime error types

use thiserror::Error;

/// Resolution error
///
/// `NoMatch` and `Rule` are ordinary outcomes on legitimate input. The other
/// variants indicate a malformed diagram, a contract violation by the host,
/// or (in strict mode) a reference the diagram should never have reached.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Traversal reached the no-match terminal
    #[error("No endpoint rule matched. Parameters: {params}")]
    NoMatch { params: String },

    /// Traversal reached an explicit error result
    #[error("{message}")]
    Rule { message: String },

    /// A context name was written twice in one resolution
    #[error("Binding violation: {0}")]
    BindingViolation(String),

    /// Strict mode: an absent value was consumed where a value is required
    #[error("Unbound reference: {0}")]
    UnboundReference(String),

    /// Parameter set rejected at the boundary
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The diagram violates an invariant that validation could not catch
    #[error("Malformed diagram: {0}")]
    MalformedDiagram(String),

    /// Partition table could not be loaded
    #[error("Invalid partition table: {0}")]
    InvalidPartitionTable(String),
}

impl ResolveError {
    /// Whether the error is a legitimate resolution outcome rather than a defect
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, ResolveError::NoMatch { .. } | ResolveError::Rule { .. })
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_error_is_verbatim() {
        let error = ResolveError::Rule {
            message: "Invalid region: region was not a valid DNS name.".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid region: region was not a valid DNS name."
        );
        assert!(error.is_resolution_failure());
    }

    #[test]
    fn test_no_match_includes_params() {
        let error = ResolveError::NoMatch {
            params: "{Region: \"us-east-1\"}".to_string(),
        };
        assert!(error.to_string().contains("us-east-1"));
        assert!(error.is_resolution_failure());
    }

    #[test]
    fn test_contract_violations_are_not_resolution_failures() {
        assert!(!ResolveError::BindingViolation("url".to_string()).is_resolution_failure());
        assert!(!ResolveError::MalformedDiagram("x".to_string()).is_resolution_failure());
    }
}
