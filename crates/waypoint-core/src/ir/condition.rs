//! Conditions
//!
//! A condition is a single function application. Its position in the
//! diagram's condition table is its index, which both decision nodes and the
//! per-resolution memo table key on.

use crate::ast::{Expression, FunctionCall, FunctionKind};
use serde::{Deserialize, Serialize};

/// A condition: `fn(argv...)`, optionally bound to a context name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The function being applied
    #[serde(rename = "fn")]
    pub function: FunctionKind,

    /// Argument expressions
    #[serde(rename = "argv")]
    pub args: Vec<Expression>,

    /// Context name the produced value is stored under
    #[serde(rename = "assign", default, skip_serializing_if = "Option::is_none")]
    pub bound_name: Option<String>,
}

impl Condition {
    /// Create a new condition without a binding
    pub fn new(function: FunctionKind, args: Vec<Expression>) -> Self {
        Self {
            function,
            args,
            bound_name: None,
        }
    }

    /// Bind the produced value under `name`
    pub fn assign(mut self, name: impl Into<String>) -> Self {
        self.bound_name = Some(name.into());
        self
    }

    /// `isSet(ref)`
    pub fn is_set(name: impl Into<String>) -> Self {
        Self::new(FunctionKind::IsSet, vec![Expression::reference(name)])
    }

    /// The condition as a call expression
    pub fn as_call(&self) -> FunctionCall {
        FunctionCall::new(self.function, self.args.clone())
    }
}
