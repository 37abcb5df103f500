//! Function library
//!
//! Closed dispatch over [`FunctionKind`]: one branch per function. Functions
//! are pure; the only shared state they touch is the read-only partition
//! table.
//!
//! Arguments are evaluated lazily, per function. `isSet`, `coalesce`, the
//! `getAttr` receiver and the unselected `ite` branch see absence as-is;
//! every other argument must hold a value, and an absent one goes through
//! the strictness policy of the resolution.

mod arn;
mod partition;
mod s3;
mod string;
mod url;

pub use arn::parse_arn;
pub use partition::PartitionResolver;
pub use s3::is_virtual_hostable_s3_bucket;
pub use string::{is_valid_host_label, split, substring, uri_encode};
pub use self::url::parse_url;

use crate::context::ResolutionContext;
use crate::engine::Evaluation;
use crate::error::{ResolveError, Result};
use waypoint_core::{AttrPath, Expression, FunctionKind, Value};

/// Apply `function` to `args`
///
/// Returns `None` when an optional-returning function produces no value.
pub fn call(
    eval: &Evaluation<'_>,
    function: FunctionKind,
    args: &[Expression],
    ctx: &ResolutionContext,
) -> Result<Option<Value>> {
    let args = Args {
        eval,
        ctx,
        function,
        args,
    };

    let value = match function {
        FunctionKind::IsSet => Some(Value::Bool(args.optional(0)?.is_some())),
        FunctionKind::Not => Some(Value::Bool(!args.boolean(0)?)),
        FunctionKind::BooleanEquals => Some(Value::Bool(args.boolean(0)? == args.boolean(1)?)),
        FunctionKind::StringEquals => Some(Value::Bool(args.string(0)? == args.string(1)?)),
        FunctionKind::GetAttr => {
            let path = args.attr_path(1)?;
            args.optional(0)?.and_then(|value| value.get_attr(&path))
        }
        FunctionKind::Substring => {
            let input = args.string(0)?;
            let start = args.index(1)?;
            let stop = args.index(2)?;
            let reverse = args.boolean(3)?;
            match (start, stop) {
                (Some(start), Some(stop)) => {
                    substring(&input, start, stop, reverse).map(Value::String)
                }
                _ => None,
            }
        }
        FunctionKind::IsValidHostLabel => Some(Value::Bool(is_valid_host_label(
            &args.string(0)?,
            args.boolean(1)?,
        ))),
        FunctionKind::ParseUrl => parse_url(&args.string(0)?).map(Value::Url),
        FunctionKind::UriEncode => Some(Value::String(uri_encode(&args.string(0)?))),
        FunctionKind::Split => {
            let value = args.string(0)?;
            let delimiter = args.string(1)?;
            let limit = args.index(2)?.unwrap_or(0);
            Some(Value::StringList(split(&value, &delimiter, limit)))
        }
        FunctionKind::Coalesce => {
            let mut first = None;
            for index in 0..args.len() {
                if let Some(value) = args.optional(index)? {
                    first = Some(value);
                    break;
                }
            }
            first
        }
        FunctionKind::Ite => {
            if args.boolean(0)? {
                args.optional(1)?
            } else {
                args.optional(2)?
            }
        }
        FunctionKind::StringArrayContains => {
            let list = args.list(0)?;
            let needle = args.string(1)?;
            Some(Value::Bool(list.iter().any(|item| *item == needle)))
        }
        FunctionKind::AwsPartition => eval
            .partitions()
            .resolve(&args.string(0)?)
            .map(Value::Partition),
        FunctionKind::AwsParseArn => parse_arn(&args.string(0)?).map(Value::Arn),
        FunctionKind::AwsIsVirtualHostableS3Bucket => Some(Value::Bool(
            is_virtual_hostable_s3_bucket(&args.string(0)?, args.boolean(1)?),
        )),
    };

    Ok(value)
}

/// Typed, lazily evaluated arguments of one call
struct Args<'e, 'a> {
    eval: &'e Evaluation<'a>,
    ctx: &'e ResolutionContext,
    function: FunctionKind,
    args: &'e [Expression],
}

impl Args<'_, '_> {
    fn len(&self) -> usize {
        self.args.len()
    }

    fn expr(&self, index: usize) -> Result<&Expression> {
        self.args.get(index).ok_or_else(|| {
            ResolveError::MalformedDiagram(format!(
                "`{}` is missing argument {}",
                self.function, index
            ))
        })
    }

    /// Evaluate an argument, keeping absence
    fn optional(&self, index: usize) -> Result<Option<Value>> {
        self.eval.eval(self.expr(index)?, self.ctx)
    }

    /// Evaluate an argument that must hold a value
    fn required(&self, index: usize, zero: Value) -> Result<Value> {
        let expr = self.expr(index)?;
        match self.eval.eval(expr, self.ctx)? {
            Some(value) => Ok(value),
            None => self.eval.substitute(&expr.describe(), zero),
        }
    }

    fn string(&self, index: usize) -> Result<String> {
        let value = self.required(index, Value::String(String::new()))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(index, "string", &value))
    }

    fn boolean(&self, index: usize) -> Result<bool> {
        let value = self.required(index, Value::Bool(false))?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(index, "boolean", &value))
    }

    fn list(&self, index: usize) -> Result<Vec<String>> {
        let value = self.required(index, Value::StringList(Vec::new()))?;
        value
            .to_string_list()
            .ok_or_else(|| self.mismatch(index, "stringArray", &value))
    }

    /// A non-negative integer argument; negative values yield `None`
    fn index(&self, index: usize) -> Result<Option<usize>> {
        let value = self.required(index, Value::Integer(0))?;
        let integer = value
            .as_integer()
            .ok_or_else(|| self.mismatch(index, "integer", &value))?;
        Ok(usize::try_from(integer).ok())
    }

    fn attr_path(&self, index: usize) -> Result<AttrPath> {
        let path = match self.expr(index)? {
            Expression::Template(template) => template.as_literal(),
            _ => None,
        };
        let path = path.ok_or_else(|| {
            ResolveError::MalformedDiagram(format!(
                "`{}` path must be a string literal",
                self.function
            ))
        })?;
        AttrPath::parse(&path).map_err(|e| ResolveError::MalformedDiagram(e.to_string()))
    }

    fn mismatch(&self, index: usize, expected: &str, actual: &Value) -> ResolveError {
        ResolveError::MalformedDiagram(format!(
            "`{}` argument {} expects {}, got {}",
            self.function,
            index,
            expected,
            actual.type_name()
        ))
    }
}
