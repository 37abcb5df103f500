//! Symbol table
//!
//! Every name an expression can read is either a parameter (indexed by its
//! declaration order) or a context binding (indexed by a slot assigned once,
//! at load time, per distinct bound name). Resolution reads and writes the
//! context through these slots only.

use crate::ast::ReturnKind;
use crate::error::{CoreError, Result};
use crate::ir::DecisionDiagram;
use std::collections::HashMap;

/// What a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Index into the parameter declarations
    Parameter(usize),
    /// Slot in the resolution context
    Binding(usize),
}

/// Name resolution for a diagram
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Symbols {
    names: HashMap<String, Symbol>,
    slot_names: Vec<String>,
    condition_slots: Vec<Option<usize>>,
}

impl Symbols {
    /// Assign parameter indexes and context slots
    pub fn build(diagram: &DecisionDiagram) -> Result<Self> {
        let mut names = HashMap::new();
        for (index, name) in diagram.parameters.keys().enumerate() {
            names.insert(name.clone(), Symbol::Parameter(index));
        }

        let mut slot_names: Vec<String> = Vec::new();
        let mut condition_slots = Vec::with_capacity(diagram.conditions.len());

        for (index, condition) in diagram.conditions.iter().enumerate() {
            // A presence check never binds, even when it names a target
            let name = match &condition.bound_name {
                Some(name) if condition.function.return_kind() != ReturnKind::Presence => name,
                _ => {
                    condition_slots.push(None);
                    continue;
                }
            };

            let slot = match names.get(name) {
                Some(Symbol::Parameter(_)) => {
                    return Err(CoreError::InvalidBinding(format!(
                        "condition {} assigns `{}`, which is a parameter",
                        index, name
                    )));
                }
                // Several conditions may share a name; they must sit on
                // mutually exclusive paths, which resolution enforces.
                Some(Symbol::Binding(slot)) => *slot,
                None => {
                    let slot = slot_names.len();
                    slot_names.push(name.clone());
                    names.insert(name.clone(), Symbol::Binding(slot));
                    slot
                }
            };
            condition_slots.push(Some(slot));
        }

        Ok(Self {
            names,
            slot_names,
            condition_slots,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.names.get(name).copied()
    }

    /// Number of distinct context slots
    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }

    pub fn slot_name(&self, slot: usize) -> Option<&str> {
        self.slot_names.get(slot).map(String::as_str)
    }

    /// The slot a condition binds into, if any
    pub fn condition_slot(&self, condition_index: usize) -> Option<usize> {
        self.condition_slots.get(condition_index).copied().flatten()
    }
}
