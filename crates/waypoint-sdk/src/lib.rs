//! Waypoint SDK
//!
//! High-level API for loading compiled endpoint rules and resolving
//! endpoints against them.

pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod resolver;

// Re-export main types
pub use builder::EndpointResolverBuilder;
pub use config::ResolverConfig;
pub use error::{Result, SdkError};
pub use loader::DiagramFormat;
pub use resolver::{EndpointResolver, ResolveEndpoint};

// Re-export commonly used types from dependencies
pub use waypoint_core::{Literal, Program, Value};
pub use waypoint_runtime::{
    Endpoint, ParameterSet, Resolution, ResolutionTrace, ResolveError, Strictness,
};
