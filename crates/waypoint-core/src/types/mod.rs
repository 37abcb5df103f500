//! Type definitions for Waypoint
//!
//! This module contains:
//! - `Value`: the tagged values bound into the resolution context
//! - Records produced by the function library (`Url`, `Partition`, `Arn`)
//! - Parameter declarations (`ParameterDef`, `ParamType`, `Literal`)

pub mod parameter;
pub mod records;
pub mod value;

pub use parameter::{Deprecation, Literal, ParamType, ParameterDef};
pub use records::{Arn, Partition, Url};
pub use value::Value;
