//! Resolution engine
//!
//! [`RuleEngine`] owns a validated program and the shared partition table.
//! Each `resolve` call builds its own context and memo table, walks the
//! diagram from the root and renders the terminal it reaches.

mod evaluator;
mod expression;
mod renderer;
mod walker;

#[cfg(test)]
mod tests;

pub use evaluator::{EvaluateCondition, StandardEvaluator};
pub use expression::Evaluation;
pub use walker::Walker;

use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::functions::PartitionResolver;
use crate::params::{ParameterSet, ParameterSetBuilder};
use crate::result::{Endpoint, Resolution, ResolutionTrace};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use waypoint_core::Program;

/// How absent values consumed by functions and templates are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Substitute the type default (`""`, `false`, empty list)
    #[default]
    Lenient,
    /// Fail with `UnboundReference`
    Strict,
}

/// Where traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum Terminal {
    /// TRUE or FALSE terminal: no rule matched
    NoMatch,
    /// Result terminal
    Result(usize),
}

/// Endpoint rule engine
#[derive(Debug, Clone)]
pub struct RuleEngine {
    program: Arc<Program>,
    partitions: Arc<PartitionResolver>,
    strictness: Strictness,
}

impl RuleEngine {
    /// Create an engine using the built-in partition table
    pub fn new(program: Arc<Program>) -> Self {
        Self {
            program,
            partitions: PartitionResolver::default_shared(),
            strictness: Strictness::default(),
        }
    }

    /// Use a host-supplied partition table
    pub fn with_partitions(mut self, partitions: Arc<PartitionResolver>) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn partitions(&self) -> &Arc<PartitionResolver> {
        &self.partitions
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Start building parameters for this engine's program
    pub fn params(&self) -> ParameterSetBuilder<'_> {
        ParameterSet::builder(&self.program)
    }

    /// Resolve an endpoint
    pub fn resolve(&self, params: &ParameterSet) -> Result<Endpoint> {
        self.resolve_with(params, &mut StandardEvaluator, None)
    }

    /// Resolve an endpoint and record the path taken
    pub fn resolve_traced(&self, params: &ParameterSet) -> Resolution {
        let mut trace = ResolutionTrace::new();
        let result = self.resolve_with(params, &mut StandardEvaluator, Some(&mut trace));
        Resolution { result, trace }
    }

    /// Resolve with a custom condition evaluator
    pub fn resolve_with<E>(
        &self,
        params: &ParameterSet,
        evaluator: &mut E,
        trace: Option<&mut ResolutionTrace>,
    ) -> Result<Endpoint>
    where
        E: EvaluateCondition + ?Sized,
    {
        self.check_params(params)?;

        let eval = Evaluation::new(&self.program, params, &self.partitions, self.strictness);
        let mut ctx = ResolutionContext::new(self.program.slot_count());
        let mut walker = Walker::new(&self.program);

        let terminal = walker.walk(evaluator, &eval, &mut ctx, trace)?;
        tracing::debug!(
            terminal = ?terminal,
            bound = ctx.bound_count(),
            "resolution reached terminal"
        );

        renderer::render(&eval, &ctx, terminal)
    }

    fn check_params(&self, params: &ParameterSet) -> Result<()> {
        let declared = self.program.parameters().keys().map(String::as_str);
        if !params.iter().map(|(name, _)| name).eq(declared) {
            return Err(ResolveError::InvalidParameter(
                "parameter set was built for a different diagram".to_string(),
            ));
        }
        Ok(())
    }
}
