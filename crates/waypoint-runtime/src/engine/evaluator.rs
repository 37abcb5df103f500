//! Condition evaluation
//!
//! Turns one condition into a boolean outcome and, when the condition has
//! a bound name, writes the produced value into the context. The return
//! kind of the function decides both:
//!
//! | return kind  | outcome                  | binds                       |
//! |--------------|--------------------------|-----------------------------|
//! | `isSet`      | presence of the argument | never                       |
//! | `coalesce`   | presence of the result   | the result, when present    |
//! | optional     | presence of the result   | the result, when present    |
//! | boolean      | the boolean              | the boolean, either way     |
//! | infallible   | always `true`            | the result                  |

use super::Evaluation;
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::functions;
use waypoint_core::{Condition, ReturnKind, Value};

/// Evaluates a single condition
///
/// The walker calls this at most once per condition index per resolution.
pub trait EvaluateCondition {
    fn evaluate(
        &mut self,
        index: usize,
        condition: &Condition,
        eval: &Evaluation<'_>,
        ctx: &mut ResolutionContext,
    ) -> Result<bool>;
}

/// The evaluator used by [`RuleEngine`](super::RuleEngine)
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl EvaluateCondition for StandardEvaluator {
    fn evaluate(
        &mut self,
        index: usize,
        condition: &Condition,
        eval: &Evaluation<'_>,
        ctx: &mut ResolutionContext,
    ) -> Result<bool> {
        let produced = functions::call(eval, condition.function, &condition.args, ctx)?;

        match condition.function.return_kind() {
            ReturnKind::Presence => Ok(produced.and_then(|v| v.as_bool()).unwrap_or(false)),
            ReturnKind::Coalesce | ReturnKind::Optional => match produced {
                Some(value) => {
                    bind(index, condition, eval, ctx, value)?;
                    Ok(true)
                }
                None => Ok(false),
            },
            ReturnKind::Boolean => {
                let outcome = produced.as_ref().and_then(Value::as_bool).ok_or_else(|| {
                    ResolveError::MalformedDiagram(format!(
                        "condition {} (`{}`) did not produce a boolean",
                        index, condition.function
                    ))
                })?;
                bind(index, condition, eval, ctx, Value::Bool(outcome))?;
                Ok(outcome)
            }
            ReturnKind::Infallible => {
                if let Some(value) = produced {
                    bind(index, condition, eval, ctx, value)?;
                }
                Ok(true)
            }
        }
    }
}

fn bind(
    index: usize,
    condition: &Condition,
    eval: &Evaluation<'_>,
    ctx: &mut ResolutionContext,
    value: Value,
) -> Result<()> {
    let Some(name) = &condition.bound_name else {
        return Ok(());
    };
    let slot = eval.program().symbols().condition_slot(index).ok_or_else(|| {
        ResolveError::MalformedDiagram(format!(
            "condition {} assigns `{}` but has no context slot",
            index, name
        ))
    })?;

    ctx.set(slot, value).map_err(|e| match e {
        ResolveError::BindingViolation(_) => ResolveError::BindingViolation(format!(
            "`{}` bound twice (second write by condition {})",
            name, index
        )),
        other => other,
    })
}
