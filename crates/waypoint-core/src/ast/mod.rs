//! Expression language definitions for Waypoint
//!
//! This module contains the definitions shared by conditions and result
//! templates:
//! - Expressions (references, function calls, literals)
//! - String templates with `{name}` / `{name#path}` placeholders
//! - Attribute paths used by `getAttr`
//! - The closed catalog of library functions

pub mod expression;
pub mod function;
pub mod path;
pub mod template;

pub use expression::{Expression, FunctionCall};
pub use function::{Arity, FunctionKind, ReturnKind};
pub use path::{AttrPath, PathSegment};
pub use template::{Template, TemplatePart};
