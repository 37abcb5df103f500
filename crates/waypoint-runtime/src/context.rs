//! Resolution context
//!
//! Per-call store of values bound by conditions. Backed by a flat vector
//! with one slot per distinct bound name; slots are assigned when the
//! program is loaded (see `Symbols`).

use crate::error::{ResolveError, Result};
use waypoint_core::{Symbol, Symbols, Value};

/// Write-once store of bound values for one resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionContext {
    slots: Vec<Option<Value>>,
}

impl ResolutionContext {
    /// Create an empty context with `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Value> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Look up a bound value by name
    pub fn get_by_name(&self, symbols: &Symbols, name: &str) -> Option<&Value> {
        match symbols.lookup(name)? {
            Symbol::Binding(slot) => self.get(slot),
            Symbol::Parameter(_) => None,
        }
    }

    pub fn is_bound(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Bind a value. A slot is written at most once per resolution.
    ///
    /// Debug builds assert on a second write; release builds report it as
    /// `BindingViolation` and leave the first value in place.
    pub fn set(&mut self, slot: usize, value: Value) -> Result<()> {
        let Some(entry) = self.slots.get_mut(slot) else {
            return Err(ResolveError::MalformedDiagram(format!(
                "context slot {} out of range ({} slots)",
                slot,
                self.slots.len()
            )));
        };

        debug_assert!(entry.is_none(), "context slot {} written twice", slot);
        if entry.is_some() {
            return Err(ResolveError::BindingViolation(format!(
                "context slot {} written twice",
                slot
            )));
        }

        *entry = Some(value);
        Ok(())
    }

    /// Forget every binding, keeping the allocation
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently holding a value
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
