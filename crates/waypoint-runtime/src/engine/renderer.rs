//! Result rendering

use super::{Evaluation, Terminal};
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::result::Endpoint;
use waypoint_core::{EndpointTemplate, Expression, ResultTemplate, Value};

/// Render the terminal reached by traversal
pub(crate) fn render(
    eval: &Evaluation<'_>,
    ctx: &ResolutionContext,
    terminal: Terminal,
) -> Result<Endpoint> {
    let index = match terminal {
        Terminal::NoMatch => return Err(no_match(eval)),
        Terminal::Result(index) => index,
    };

    let result = eval.program().result(index).ok_or_else(|| {
        ResolveError::MalformedDiagram(format!("result {} out of range", index))
    })?;

    match result {
        ResultTemplate::Endpoint(template) => render_endpoint(eval, ctx, template),
        ResultTemplate::Error { message } => Err(ResolveError::Rule {
            message: render_string(eval, ctx, message)?,
        }),
        ResultTemplate::NoMatch => Err(no_match(eval)),
    }
}

fn no_match(eval: &Evaluation<'_>) -> ResolveError {
    ResolveError::NoMatch {
        params: eval.params().to_string(),
    }
}

fn render_endpoint(
    eval: &Evaluation<'_>,
    ctx: &ResolutionContext,
    template: &EndpointTemplate,
) -> Result<Endpoint> {
    let mut endpoint = Endpoint::builder().url(render_string(eval, ctx, &template.url)?);

    for (name, values) in &template.headers {
        endpoint = endpoint.empty_header(name);
        for expr in values {
            match eval.eval(expr, ctx)? {
                Some(Value::StringList(list)) => {
                    for item in list {
                        endpoint = endpoint.header(name, item);
                    }
                }
                Some(value) => {
                    let text = value.to_template_string().ok_or_else(|| {
                        ResolveError::MalformedDiagram(format!(
                            "header `{}` cannot hold a {}",
                            name,
                            value.type_name()
                        ))
                    })?;
                    endpoint = endpoint.header(name, text);
                }
                None => eval.omit(&expr.describe())?,
            }
        }
    }

    for (name, expr) in &template.properties {
        match eval.eval(expr, ctx)? {
            Some(value) => endpoint = endpoint.property(name, value.to_document()),
            None => eval.omit(&expr.describe())?,
        }
    }

    Ok(endpoint.build())
}

fn render_string(eval: &Evaluation<'_>, ctx: &ResolutionContext, expr: &Expression) -> Result<String> {
    let value = match eval.eval(expr, ctx)? {
        Some(value) => value,
        None => eval.substitute(&expr.describe(), Value::String(String::new()))?,
    };
    value.to_template_string().ok_or_else(|| {
        ResolveError::MalformedDiagram(format!(
            "expected a string, got {} from {}",
            value.type_name(),
            expr.describe()
        ))
    })
}
