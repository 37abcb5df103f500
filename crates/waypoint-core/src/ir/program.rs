//! Validated program
//!
//! A program is a decision diagram that passed validation, paired with its
//! symbol table. It is built once and shared read-only by every resolution.

use crate::error::Result;
use crate::ir::{Condition, DecisionDiagram, DecisionNode, NodeRef, ResultTemplate, Symbols};
use crate::types::ParameterDef;
use indexmap::IndexMap;

/// A diagram ready for resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    diagram: DecisionDiagram,
    symbols: Symbols,
}

impl Program {
    /// Validate a diagram and build its symbol table
    pub fn new(diagram: DecisionDiagram) -> Result<Self> {
        let symbols = diagram.validate()?;
        Ok(Self { diagram, symbols })
    }

    /// Parse and validate a JSON diagram
    pub fn from_json(content: &str) -> Result<Self> {
        Self::new(DecisionDiagram::from_json(content)?)
    }

    pub fn diagram(&self) -> &DecisionDiagram {
        &self.diagram
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn version(&self) -> &str {
        &self.diagram.version
    }

    pub fn parameters(&self) -> &IndexMap<String, ParameterDef> {
        &self.diagram.parameters
    }

    pub fn root(&self) -> NodeRef {
        self.diagram.root
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.diagram.conditions
    }

    pub fn condition(&self, index: usize) -> Option<&Condition> {
        self.diagram.conditions.get(index)
    }

    pub fn node(&self, index: usize) -> Option<&DecisionNode> {
        self.diagram.nodes.get(index)
    }

    pub fn result(&self, index: usize) -> Option<&ResultTemplate> {
        self.diagram.results.get(index)
    }

    /// Get the number of conditions
    pub fn condition_count(&self) -> usize {
        self.diagram.conditions.len()
    }

    /// Get the number of decision nodes
    pub fn node_count(&self) -> usize {
        self.diagram.nodes.len()
    }

    /// Get the number of distinct context slots
    pub fn slot_count(&self) -> usize {
        self.symbols.slot_count()
    }
}
