//! Builder pattern for EndpointResolver

use crate::config::ResolverConfig;
use crate::error::{Result, SdkError};
use crate::loader::{self, DiagramFormat};
use crate::resolver::EndpointResolver;
use std::path::PathBuf;
use std::sync::Arc;
use waypoint_core::{Literal, Program};
use waypoint_runtime::{PartitionResolver, RuleEngine, Strictness};

/// Builder for EndpointResolver
///
/// # Example
///
/// ```rust,ignore
/// use waypoint_sdk::{EndpointResolverBuilder, Strictness};
///
/// // From a compiled diagram on disk
/// let resolver = EndpointResolverBuilder::new()
///     .with_diagram_file("rules/s3.json")
///     .with_builtin("AWS::Region", "us-west-2")
///     .build()?;
///
/// // From a config file
/// let resolver = EndpointResolverBuilder::from_config_file("resolver.yaml")?.build()?;
/// ```
pub struct EndpointResolverBuilder {
    config: ResolverConfig,
    program: Option<Arc<Program>>,
    partitions: Option<Arc<PartitionResolver>>,
}

impl EndpointResolverBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::from_config(ResolverConfig::new())
    }

    /// Start from an existing configuration
    pub fn from_config(config: ResolverConfig) -> Self {
        Self {
            config,
            program: None,
            partitions: None,
        }
    }

    /// Start from a YAML or JSON configuration file
    pub fn from_config_file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::from_config(ResolverConfig::from_file(path.into())?))
    }

    /// Load the diagram from a file
    pub fn with_diagram_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.diagram_file = Some(path.into());
        self
    }

    /// Use diagram content directly (alternative to file path)
    pub fn with_diagram_content(mut self, content: impl Into<String>, format: DiagramFormat) -> Self {
        self.config.diagram_content = Some((content.into(), format));
        self
    }

    /// Use an already validated program, shared with other resolvers
    pub fn with_program(mut self, program: Arc<Program>) -> Self {
        self.program = Some(program);
        self
    }

    /// Load the partition table from a file
    pub fn with_partitions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.partitions_file = Some(path.into());
        self
    }

    /// Use a partition table shared with other resolvers
    pub fn with_partitions(mut self, partitions: Arc<PartitionResolver>) -> Self {
        self.partitions = Some(partitions);
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.config.strictness = strictness;
        self
    }

    /// Enable tracing
    pub fn enable_trace(mut self, enable: bool) -> Self {
        self.config.enable_trace = enable;
        self
    }

    /// Set a host builtIn value
    pub fn with_builtin(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.config.builtins.insert(name.into(), value.into());
        self
    }

    /// Build the endpoint resolver
    ///
    /// The diagram source is picked in order: an explicit program, inline
    /// content, then the diagram file.
    pub fn build(self) -> Result<EndpointResolver> {
        let program = match (self.program, &self.config.diagram_content, &self.config.diagram_file) {
            (Some(program), _, _) => program,
            (None, Some((content, format)), _) => Arc::new(loader::parse_program(content, *format)?),
            (None, None, Some(path)) => Arc::new(loader::load_program(path)?),
            (None, None, None) => {
                return Err(SdkError::ConfigError(
                    "no decision diagram configured".to_string(),
                ));
            }
        };

        let partitions = match (self.partitions, &self.config.partitions_file) {
            (Some(partitions), _) => partitions,
            (None, Some(path)) => Arc::new(loader::load_partitions(path)?),
            (None, None) => PartitionResolver::default_shared(),
        };

        tracing::info!(
            version = program.version(),
            parameters = program.parameters().len(),
            conditions = program.condition_count(),
            nodes = program.node_count(),
            results = program.diagram().results.len(),
            strictness = ?self.config.strictness,
            trace = self.config.enable_trace,
            "endpoint resolver built"
        );

        let engine = RuleEngine::new(program)
            .with_partitions(partitions)
            .with_strictness(self.config.strictness);

        Ok(EndpointResolver::new(
            engine,
            self.config.builtin_values(),
            self.config.enable_trace,
        ))
    }
}

impl Default for EndpointResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = r#"{
        "parameters": {"Region": {"type": "string", "builtIn": "AWS::Region"}},
        "root": 100000000,
        "results": [{"type": "endpoint", "url": "https://{Region}.example.com"}]
    }"#;

    #[test]
    fn test_builder_requires_a_diagram() {
        let err = EndpointResolverBuilder::new().build().unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_builder_with_options() {
        let builder = EndpointResolverBuilder::new()
            .with_diagram_content(DIAGRAM, DiagramFormat::Json)
            .with_strictness(Strictness::Strict)
            .enable_trace(true)
            .with_builtin("AWS::Region", "us-east-2");

        assert!(builder.config.enable_trace);
        assert_eq!(builder.config.builtins.len(), 1);

        let resolver = builder.build().unwrap();
        assert_eq!(resolver.engine().strictness(), Strictness::Strict);
        assert!(resolver.trace_enabled());
    }

    #[test]
    fn test_explicit_program_wins() {
        let program = Arc::new(loader::parse_program(DIAGRAM, DiagramFormat::Json).unwrap());
        let resolver = EndpointResolverBuilder::new()
            .with_diagram_file("/nonexistent/diagram.json")
            .with_program(Arc::clone(&program))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(resolver.program(), &program));
    }
}
