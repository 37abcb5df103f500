//! Waypoint Runtime - Resolution engine for compiled endpoint rules
//!
//! This crate walks a compiled decision diagram for one set of parameters:
//! conditions are evaluated on demand (at most once each), their bound values
//! accumulate in a per-call context, and the selected result is rendered into
//! an endpoint or an error.

pub mod context;
pub mod engine;
pub mod error;
pub mod functions;
pub mod params;
pub mod result;

// Re-export main types
pub use context::ResolutionContext;
pub use engine::{
    EvaluateCondition, Evaluation, RuleEngine, StandardEvaluator, Strictness, Terminal, Walker,
};
pub use error::{ResolveError, Result};
pub use functions::PartitionResolver;
pub use params::{ParameterSet, ParameterSetBuilder};
pub use result::{Endpoint, EndpointBuilder, NodeVisit, Resolution, ResolutionTrace};
