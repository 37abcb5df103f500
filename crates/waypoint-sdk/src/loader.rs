//! Loading of build-time artifacts
//!
//! Decision diagrams and partition tables are read from JSON or YAML
//! documents. The format follows the file extension.

use crate::error::{Result, SdkError};
use std::path::Path;
use waypoint_core::{DecisionDiagram, Program};
use waypoint_runtime::PartitionResolver;

/// Document format of a diagram, partition table or config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    Json,
    Yaml,
}

impl DiagramFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(DiagramFormat::Json),
            Some("yaml") | Some("yml") => Ok(DiagramFormat::Yaml),
            _ => Err(SdkError::ConfigError(format!(
                "cannot infer document format of {}: expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Parse and validate a decision diagram
pub fn parse_program(content: &str, format: DiagramFormat) -> Result<Program> {
    let diagram: DecisionDiagram = match format {
        DiagramFormat::Json => serde_json::from_str(content)?,
        DiagramFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(Program::new(diagram)?)
}

/// Read, parse and validate a decision diagram file
pub fn load_program(path: &Path) -> Result<Program> {
    let format = DiagramFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let program = parse_program(&content, format)?;

    tracing::debug!(
        path = %path.display(),
        version = program.version(),
        conditions = program.condition_count(),
        nodes = program.node_count(),
        "loaded decision diagram"
    );
    Ok(program)
}

/// Parse a partition table
pub fn parse_partitions(content: &str, format: DiagramFormat) -> Result<PartitionResolver> {
    let resolver = match format {
        DiagramFormat::Json => PartitionResolver::from_json(content)?,
        DiagramFormat::Yaml => {
            let table: serde_json::Value = serde_yaml::from_str(content)?;
            PartitionResolver::from_json(&table.to_string())?
        }
    };
    Ok(resolver)
}

/// Read and parse a partition table file
pub fn load_partitions(path: &Path) -> Result<PartitionResolver> {
    let format = DiagramFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_partitions(&content, format)
}
