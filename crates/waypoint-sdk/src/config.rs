//! Configuration types for EndpointResolver

use crate::error::Result;
use crate::loader::DiagramFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use waypoint_core::{Literal, Value};
use waypoint_runtime::Strictness;

/// Resolver configuration
///
/// ```yaml
/// diagram_file: rules/s3.json
/// partitions_file: rules/partitions.json
/// strictness: strict
/// enable_trace: true
/// builtins:
///   AWS::Region: us-west-2
///   AWS::UseFIPS: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Decision diagram file (JSON or YAML)
    pub diagram_file: Option<PathBuf>,

    /// Decision diagram content - alternative to file path
    #[serde(skip)]
    pub diagram_content: Option<(String, DiagramFormat)>,

    /// Partition table replacing the built-in one
    pub partitions_file: Option<PathBuf>,

    /// Handling of absent values
    pub strictness: Strictness,

    /// Record a trace for every resolution and log it at debug level
    pub enable_trace: bool,

    /// Host settings, keyed by builtIn name (e.g. `AWS::Region`)
    pub builtins: HashMap<String, Literal>,
}

impl ResolverConfig {
    /// Create a new resolver configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML or JSON file
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: ResolverConfig = match DiagramFormat::from_path(path)? {
            DiagramFormat::Json => serde_json::from_str(&content)?,
            DiagramFormat::Yaml => serde_yaml::from_str(&content)?,
        };

        if let Some(base) = path.parent() {
            config.diagram_file = config.diagram_file.map(|file| base.join(file));
            config.partitions_file = config.partitions_file.map(|file| base.join(file));
        }
        Ok(config)
    }

    /// Set the diagram file
    pub fn with_diagram_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagram_file = Some(path.into());
        self
    }

    /// Set the diagram content directly
    pub fn with_diagram_content(mut self, content: impl Into<String>, format: DiagramFormat) -> Self {
        self.diagram_content = Some((content.into(), format));
        self
    }

    /// Set the partition table file
    pub fn with_partitions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.partitions_file = Some(path.into());
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Enable tracing
    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.enable_trace = enable;
        self
    }

    /// Set a host builtIn value
    pub fn with_builtin(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.builtins.insert(name.into(), value.into());
        self
    }

    /// Builtins lifted into runtime values
    pub fn builtin_values(&self) -> HashMap<String, Value> {
        self.builtins
            .iter()
            .map(|(name, literal)| (name.clone(), Value::from(literal.clone())))
            .collect()
    }
}
