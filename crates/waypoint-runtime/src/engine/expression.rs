//! Expression evaluation
//!
//! An [`Evaluation`] is the read-only environment of one resolution: the
//! program, the parameters, the partition table and the strictness policy.
//! The mutable context is passed alongside, so conditions can bind into it
//! between evaluations.

use super::Strictness;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::functions::{self, PartitionResolver};
use crate::params::ParameterSet;
use waypoint_core::ast::TemplatePart;
use waypoint_core::{Expression, Program, Symbol, Template, Value};

/// Read-only environment of one resolution
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    program: &'a Program,
    params: &'a ParameterSet,
    partitions: &'a PartitionResolver,
    strictness: Strictness,
}

impl<'a> Evaluation<'a> {
    pub fn new(
        program: &'a Program,
        params: &'a ParameterSet,
        partitions: &'a PartitionResolver,
        strictness: Strictness,
    ) -> Self {
        Self {
            program,
            params,
            partitions,
            strictness,
        }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn params(&self) -> &'a ParameterSet {
        self.params
    }

    pub fn partitions(&self) -> &'a PartitionResolver {
        self.partitions
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Evaluate an expression; `None` means the value is absent
    pub fn eval(&self, expr: &Expression, ctx: &ResolutionContext) -> Result<Option<Value>> {
        match expr {
            Expression::Reference(name) => self.lookup(name, ctx),
            Expression::Call(call) => functions::call(self, call.function, &call.args, ctx),
            Expression::Template(template) => {
                self.render_template(template, ctx).map(|s| Some(Value::String(s)))
            }
            Expression::Bool(b) => Ok(Some(Value::Bool(*b))),
            Expression::Integer(i) => Ok(Some(Value::Integer(*i))),
            Expression::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match self.eval(item, ctx)? {
                        Some(value) => values.push(value),
                        None => self.omit(&item.describe())?,
                    }
                }
                Ok(Some(array_value(values)))
            }
            Expression::Record(fields) => {
                let mut object = serde_json::Map::with_capacity(fields.len());
                for (key, field) in fields {
                    match self.eval(field, ctx)? {
                        Some(value) => {
                            object.insert(key.clone(), value.to_document());
                        }
                        None => self.omit(&field.describe())?,
                    }
                }
                Ok(Some(Value::Document(serde_json::Value::Object(object))))
            }
        }
    }

    /// Read a parameter or bound name
    pub fn lookup(&self, name: &str, ctx: &ResolutionContext) -> Result<Option<Value>> {
        match self.program.symbols().lookup(name) {
            Some(Symbol::Parameter(index)) => Ok(self.params.get_index(index).cloned()),
            Some(Symbol::Binding(slot)) => Ok(ctx.get(slot).cloned()),
            None => Err(ResolveError::MalformedDiagram(format!(
                "unknown reference `{}`",
                name
            ))),
        }
    }

    /// Render a template to a string
    pub fn render_template(&self, template: &Template, ctx: &ResolutionContext) -> Result<String> {
        let mut rendered = String::new();
        for part in template.parts() {
            match part {
                TemplatePart::Literal(text) => rendered.push_str(text),
                TemplatePart::Placeholder { name, path } => {
                    let value = self.lookup(name, ctx)?;
                    let value = match path {
                        Some(path) => value.and_then(|v| v.get_attr(path)),
                        None => value,
                    };
                    let value = match value {
                        Some(value) => value,
                        None => {
                            let reference = match path {
                                Some(path) => format!("{}#{}", name, path),
                                None => name.to_string(),
                            };
                            self.substitute(&reference, Value::String(String::new()))?
                        }
                    };
                    let text = value.to_template_string().ok_or_else(|| {
                        ResolveError::MalformedDiagram(format!(
                            "cannot splice {} `{}` into template \"{}\"",
                            value.type_name(),
                            name,
                            template
                        ))
                    })?;
                    rendered.push_str(&text);
                }
            }
        }
        Ok(rendered)
    }

    /// Absent value where one is required: default it or fail, per strictness
    pub(crate) fn substitute(&self, what: &str, zero: Value) -> Result<Value> {
        match self.strictness {
            Strictness::Strict => Err(ResolveError::UnboundReference(what.to_string())),
            Strictness::Lenient => {
                tracing::debug!(
                    reference = what,
                    default = zero.type_name(),
                    "absent value replaced by type default"
                );
                Ok(zero)
            }
        }
    }

    /// Absent element of a collection: drop it or fail, per strictness
    pub(crate) fn omit(&self, what: &str) -> Result<()> {
        match self.strictness {
            Strictness::Strict => Err(ResolveError::UnboundReference(what.to_string())),
            Strictness::Lenient => {
                tracing::debug!(reference = what, "absent value omitted");
                Ok(())
            }
        }
    }
}

fn array_value(values: Vec<Value>) -> Value {
    if values.iter().all(|v| matches!(v, Value::String(_))) {
        Value::StringList(
            values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )
    } else {
        Value::Document(serde_json::Value::Array(
            values.iter().map(Value::to_document).collect(),
        ))
    }
}
