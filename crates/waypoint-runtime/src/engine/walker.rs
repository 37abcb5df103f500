//! Decision diagram traversal
//!
//! Iterative walk from the root to a terminal. Each condition outcome is
//! memoized in a table indexed by condition, so a condition shared by
//! several nodes (or reached along several paths) runs at most once per
//! resolution and its bindings are written at most once.

use super::{EvaluateCondition, Evaluation, Terminal};
use crate::context::ResolutionContext;
use crate::error::{ResolveError, Result};
use crate::result::{NodeVisit, ResolutionTrace};
use waypoint_core::{NodeRef, Program};

/// Walks one program; reusable across resolutions
#[derive(Debug)]
pub struct Walker<'p> {
    program: &'p Program,
    memo: Vec<Option<bool>>,
}

impl<'p> Walker<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            memo: vec![None; program.condition_count()],
        }
    }

    /// Outcomes of the last walk, by condition index
    pub fn memo(&self) -> &[Option<bool>] {
        &self.memo
    }

    /// Walk from the root to a terminal
    pub fn walk<E>(
        &mut self,
        evaluator: &mut E,
        eval: &Evaluation<'_>,
        ctx: &mut ResolutionContext,
        mut trace: Option<&mut ResolutionTrace>,
    ) -> Result<Terminal>
    where
        E: EvaluateCondition + ?Sized,
    {
        self.memo.iter_mut().for_each(|entry| *entry = None);

        // An acyclic path visits each node at most once
        let max_steps = self.program.node_count();
        let mut steps = 0;
        let mut current = self.program.root();

        let terminal = loop {
            let (index, complement) = match current {
                NodeRef::True | NodeRef::False => break Terminal::NoMatch,
                NodeRef::Result(index) => break Terminal::Result(index),
                NodeRef::Node { index, complement } => (index, complement),
            };

            steps += 1;
            if steps > max_steps {
                return Err(ResolveError::MalformedDiagram(format!(
                    "traversal exceeded {} steps",
                    max_steps
                )));
            }

            let node = self.program.node(index).ok_or_else(|| {
                ResolveError::MalformedDiagram(format!("node {} out of range", index))
            })?;
            let condition_index = node.condition_index;
            let memoized = *self.memo.get(condition_index).ok_or_else(|| {
                ResolveError::MalformedDiagram(format!(
                    "node {} tests condition {} of {}",
                    index,
                    condition_index,
                    self.memo.len()
                ))
            })?;

            let (outcome, cached) = match memoized {
                Some(outcome) => (outcome, true),
                None => {
                    let condition = self.program.condition(condition_index).ok_or_else(|| {
                        ResolveError::MalformedDiagram(format!(
                            "condition {} out of range",
                            condition_index
                        ))
                    })?;
                    let outcome = evaluator.evaluate(condition_index, condition, eval, ctx)?;
                    self.memo[condition_index] = Some(outcome);
                    (outcome, false)
                }
            };

            tracing::trace!(
                node = index,
                condition = condition_index,
                outcome,
                cached,
                "condition outcome"
            );
            if let Some(trace) = trace.as_deref_mut() {
                trace.record(NodeVisit {
                    node: index,
                    complement,
                    condition: condition_index,
                    outcome,
                    cached,
                });
            }

            current = node.branch(outcome, complement);
        };

        if let Some(trace) = trace {
            trace.terminal = Some(terminal);
        }
        Ok(terminal)
    }
}
