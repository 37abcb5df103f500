//! Expression AST definitions
//!
//! Expressions appear as condition arguments and inside result templates.
//!
//! Wire encoding:
//! - `{"ref": "Region"}` is a reference to a parameter or bound name
//! - `{"fn": "parseURL", "argv": [...]}` is a function call
//! - a string is a template literal
//! - booleans and integers are literals
//! - arrays are array literals, any other object is a record literal

use crate::ast::{FunctionKind, Template};
use crate::error::{CoreError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpression", into = "RawExpression")]
pub enum Expression {
    /// Reference to a parameter or a bound context name
    Reference(String),

    /// Library function application
    Call(FunctionCall),

    /// String template
    Template(Template),

    /// Boolean literal
    Bool(bool),

    /// Integer literal
    Integer(i64),

    /// Array literal
    Array(Vec<Expression>),

    /// Record literal (key order preserved)
    Record(IndexMap<String, Expression>),
}

/// A function applied to argument expressions
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: FunctionKind,
    pub args: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(function: FunctionKind, args: Vec<Expression>) -> Self {
        Self { function, args }
    }
}

impl Expression {
    /// Create a reference expression
    pub fn reference(name: impl Into<String>) -> Self {
        Expression::Reference(name.into())
    }

    /// Create a function call expression
    pub fn call(function: FunctionKind, args: Vec<Expression>) -> Self {
        Expression::Call(FunctionCall::new(function, args))
    }

    /// Create a template expression
    pub fn template(source: &str) -> Result<Self> {
        Ok(Expression::Template(Template::parse(source)?))
    }

    /// Short human-readable rendering for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Expression::Reference(name) => name.clone(),
            Expression::Call(call) => format!("{}(..)", call.function),
            Expression::Template(template) => format!("\"{}\"", template),
            Expression::Bool(b) => b.to_string(),
            Expression::Integer(i) => i.to_string(),
            Expression::Array(_) => "[..]".to_string(),
            Expression::Record(_) => "{..}".to_string(),
        }
    }

    /// Visit every name this expression reads, including template placeholders
    pub fn visit_references<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Expression::Reference(name) => visit(name),
            Expression::Call(call) => {
                for arg in &call.args {
                    arg.visit_references(visit);
                }
            }
            Expression::Template(template) => {
                for name in template.references() {
                    visit(name);
                }
            }
            Expression::Array(items) => {
                for item in items {
                    item.visit_references(visit);
                }
            }
            Expression::Record(fields) => {
                for field in fields.values() {
                    field.visit_references(visit);
                }
            }
            Expression::Bool(_) | Expression::Integer(_) => {}
        }
    }

    /// Visit every function call in this expression, outermost first
    pub fn visit_calls<'a>(&'a self, visit: &mut impl FnMut(&'a FunctionCall) -> Result<()>) -> Result<()> {
        match self {
            Expression::Call(call) => {
                visit(call)?;
                for arg in &call.args {
                    arg.visit_calls(visit)?;
                }
                Ok(())
            }
            Expression::Array(items) => items.iter().try_for_each(|item| item.visit_calls(visit)),
            Expression::Record(fields) => fields
                .values()
                .try_for_each(|field| field.visit_calls(visit)),
            _ => Ok(()),
        }
    }
}

/// Serde representation of an expression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawExpression {
    Reference {
        #[serde(rename = "ref")]
        name: String,
    },
    Call {
        #[serde(rename = "fn")]
        function: String,
        argv: Vec<Expression>,
    },
    Bool(bool),
    Integer(i64),
    String(String),
    Array(Vec<Expression>),
    Record(IndexMap<String, Expression>),
}

impl TryFrom<RawExpression> for Expression {
    type Error = CoreError;

    fn try_from(raw: RawExpression) -> Result<Self> {
        Ok(match raw {
            RawExpression::Reference { name } => Expression::Reference(name),
            RawExpression::Call { function, argv } => Expression::Call(FunctionCall {
                function: function.parse()?,
                args: argv,
            }),
            RawExpression::Bool(b) => Expression::Bool(b),
            RawExpression::Integer(i) => Expression::Integer(i),
            RawExpression::String(s) => Expression::Template(Template::parse(s)?),
            RawExpression::Array(items) => Expression::Array(items),
            RawExpression::Record(fields) => Expression::Record(fields),
        })
    }
}

impl From<Expression> for RawExpression {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Reference(name) => RawExpression::Reference { name },
            Expression::Call(call) => RawExpression::Call {
                function: call.function.as_str().to_string(),
                argv: call.args,
            },
            Expression::Template(template) => RawExpression::String(template.into()),
            Expression::Bool(b) => RawExpression::Bool(b),
            Expression::Integer(i) => RawExpression::Integer(i),
            Expression::Array(items) => RawExpression::Array(items),
            Expression::Record(fields) => RawExpression::Record(fields),
        }
    }
}
