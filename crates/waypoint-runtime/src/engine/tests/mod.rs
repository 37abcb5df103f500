//! Test modules for the resolution engine





use crate::context::ResolutionContext;
use crate::engine::{EvaluateCondition, Evaluation, RuleEngine, StandardEvaluator};
use crate::error::Result;
use std::sync::Arc;
use waypoint_core::{Condition, Program};

/// Encoded reference to `nodes[index]`
pub(crate) fn node(index: i64) -> i64 {
    index + 2
}

/// Encoded reference to `results[index]`
pub(crate) fn result(index: i64) -> i64 {
    waypoint_core::ir::RESULT_REF_OFFSET + index
}

pub(crate) fn program(diagram: serde_json::Value) -> Arc<Program> {
    let diagram = serde_json::from_value(diagram).expect("diagram parses");
    Arc::new(Program::new(diagram).expect("diagram validates"))
}

pub(crate) fn engine(diagram: serde_json::Value) -> RuleEngine {
    RuleEngine::new(program(diagram))
}

/// Counts evaluator invocations per condition index
#[derive(Debug)]
pub(crate) struct CountingEvaluator {
    inner: StandardEvaluator,
    pub calls: Vec<usize>,
}

impl CountingEvaluator {
    pub fn new(condition_count: usize) -> Self {
        Self {
            inner: StandardEvaluator,
            calls: vec![0; condition_count],
        }
    }
}

impl EvaluateCondition for CountingEvaluator {
    fn evaluate(
        &mut self,
        index: usize,
        condition: &Condition,
        eval: &Evaluation<'_>,
        ctx: &mut ResolutionContext,
    ) -> Result<bool> {
        self.calls[index] += 1;
        self.inner.evaluate(index, condition, eval, ctx)
    }
}
