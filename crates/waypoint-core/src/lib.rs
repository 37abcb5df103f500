//! Waypoint Core - Core types and definitions for the Waypoint endpoint resolver
//!
//! This crate provides the build-time artifacts consumed by the resolver:
//! - Value types produced and consumed during resolution
//! - Expressions, templates and the function catalog (`ast`)
//! - The compiled decision diagram: conditions, nodes, results (`ir`)
//! - Error types

pub mod ast;
pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use ast::{AttrPath, Expression, FunctionCall, FunctionKind, ReturnKind, Template};
pub use error::CoreError;
pub use ir::{
    Condition, DecisionDiagram, DecisionNode, EndpointTemplate, NodeRef, Program, ResultTemplate,
    Symbol, Symbols,
};
pub use types::{Arn, Literal, ParamType, ParameterDef, Partition, Url, Value};
