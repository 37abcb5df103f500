//! EndpointResolver - Main API for resolving endpoints

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use waypoint_core::{Program, Value};
use waypoint_runtime::{Endpoint, ParameterSet, ParameterSetBuilder, Resolution, RuleEngine};

/// Asynchronous endpoint resolution, for hosts built around async clients
///
/// Resolution itself never blocks or awaits; implementations resolve
/// synchronously inside the future.
#[async_trait]
pub trait ResolveEndpoint: Send + Sync {
    async fn resolve_endpoint(&self, params: &ParameterSet) -> Result<Endpoint>;
}

/// Resolves endpoints for one compiled diagram
///
/// Cheap to share: the program and partition table are behind `Arc`s and
/// every resolution keeps its state on its own stack.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    engine: RuleEngine,
    builtins: HashMap<String, Value>,
    enable_trace: bool,
}

impl EndpointResolver {
    pub(crate) fn new(engine: RuleEngine, builtins: HashMap<String, Value>, enable_trace: bool) -> Self {
        Self {
            engine,
            builtins,
            enable_trace,
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn program(&self) -> &Arc<Program> {
        self.engine.program()
    }

    pub fn trace_enabled(&self) -> bool {
        self.enable_trace
    }

    /// Start a parameter set, with the configured builtins already applied
    pub fn params(&self) -> ParameterSetBuilder<'_> {
        self.engine.params().with_builtins(&self.builtins)
    }

    /// Resolve the endpoint for `params`
    pub fn resolve(&self, params: &ParameterSet) -> Result<Endpoint> {
        if !self.enable_trace {
            return Ok(self.engine.resolve(params)?);
        }

        let resolution = self.engine.resolve_traced(params);
        tracing::debug!(
            visits = resolution.trace.visits.len(),
            evaluated = resolution.trace.evaluated_count(),
            terminal = ?resolution.trace.terminal,
            trace = ?resolution.trace,
            "resolution trace"
        );
        Ok(resolution.result?)
    }

    /// Resolve and return the path taken through the diagram
    pub fn resolve_traced(&self, params: &ParameterSet) -> Resolution {
        self.engine.resolve_traced(params)
    }

    /// Build a parameter set from `values` and resolve it
    pub fn resolve_values<I, K, V>(&self, values: I) -> Result<Endpoint>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let params = values
            .into_iter()
            .fold(self.params(), |builder, (name, value)| builder.set(name, value))
            .build()?;
        self.resolve(&params)
    }
}

#[async_trait]
impl ResolveEndpoint for EndpointResolver {
    async fn resolve_endpoint(&self, params: &ParameterSet) -> Result<Endpoint> {
        self.resolve(params)
    }
}
