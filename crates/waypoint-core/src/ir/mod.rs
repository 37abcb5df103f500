//! Compiled decision diagram for Waypoint
//!
//! The diagram is produced upstream and consumed read-only here. It is a
//! binary decision diagram over an indexed set of conditions whose terminals
//! select one of an indexed set of results.

pub mod condition;
pub mod diagram;
pub mod node;
pub mod program;
pub mod result;
pub mod symbols;

pub use condition::Condition;
pub use diagram::DecisionDiagram;
pub use node::{DecisionNode, NodeRef, RESULT_REF_OFFSET};
pub use program::Program;
pub use result::{EndpointTemplate, ResultTemplate};
pub use symbols::{Symbol, Symbols};
