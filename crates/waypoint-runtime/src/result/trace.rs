//! Resolution tracing
//!
//! A trace records the path a resolution took through the diagram, for
//! debugging rule sets. It is only collected on request.

use crate::engine::Terminal;
use serde::{Deserialize, Serialize};

/// One decision node visited during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeVisit {
    /// Index of the decision node
    pub node: usize,

    /// Whether the node was entered through a complement edge
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub complement: bool,

    /// Condition tested at the node
    pub condition: usize,

    /// Outcome of the condition
    pub outcome: bool,

    /// True when the outcome came from the memo table
    pub cached: bool,
}

/// Path of one resolution through the diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    pub visits: Vec<NodeVisit>,

    /// Terminal reached, if traversal completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<Terminal>,
}

impl ResolutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, visit: NodeVisit) {
        self.visits.push(visit);
    }

    /// Number of conditions actually evaluated (memo misses)
    pub fn evaluated_count(&self) -> usize {
        self.visits.iter().filter(|visit| !visit.cached).count()
    }

    /// Conditions evaluated, in evaluation order
    pub fn evaluated_conditions(&self) -> Vec<usize> {
        self.visits
            .iter()
            .filter(|visit| !visit.cached)
            .map(|visit| visit.condition)
            .collect()
    }
}
