//! Per-component modifier registry.

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::debug;

use crate::attribute::AttributeId;
use crate::modifier::AttributeModifier;
use crate::native::{NativeModule, NodeHandle};
use crate::value::AttrValue;

/// Insertion-ordered map from attribute identity to its modifier.
///
/// Insertion order is the order native calls are issued during
/// [`patch`](ModifierRegistry::patch). Each component owns exactly one
/// registry.
#[derive(Clone, Debug, Default)]
pub struct ModifierRegistry {
    entries: IndexMap<AttributeId, AttributeModifier>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert: overwrite the staged value of an existing entry or append a
    /// new modifier for `id`.
    pub fn stage(&mut self, id: AttributeId, value: Option<AttrValue>) -> &mut AttributeModifier {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => {
                let modifier = entry.into_mut();
                modifier.stage(value);
                modifier
            }
            Entry::Vacant(entry) => entry.insert(AttributeModifier::new(id, value)),
        }
    }

    /// Reconciles every entry against `node` in insertion order, then evicts
    /// the entries whose staged value was unset. Returns the evicted ids.
    ///
    /// Eviction happens only after the full pass so no reconciliation sees a
    /// registry that changed under it.
    pub fn patch(&mut self, native: &mut dyn NativeModule, node: NodeHandle) -> Vec<AttributeId> {
        let mut expired = Vec::new();
        for (id, modifier) in self.entries.iter_mut() {
            if modifier.reconcile(native, node) {
                expired.push(*id);
            }
        }
        for id in &expired {
            self.entries.shift_remove(id);
        }
        if !expired.is_empty() {
            debug!("evicted {expired:?} from {node}");
        }
        expired
    }

    /// Unsets every staged value without touching the native node.
    pub fn clear_staged(&mut self) {
        for modifier in self.entries.values_mut() {
            modifier.stage(None);
        }
    }

    /// Forgets every committed value so the next patch re-applies all staged
    /// values.
    pub fn forget_committed(&mut self) {
        for modifier in self.entries.values_mut() {
            modifier.forget_committed();
        }
    }

    pub fn insert(&mut self, modifier: AttributeModifier) -> Option<AttributeModifier> {
        self.entries.insert(modifier.id(), modifier)
    }

    pub fn remove(&mut self, id: AttributeId) -> Option<AttributeModifier> {
        self.entries.shift_remove(&id)
    }

    pub fn get(&self, id: AttributeId) -> Option<&AttributeModifier> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: AttributeId) -> Option<&mut AttributeModifier> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeModifier> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.entries.keys().copied()
    }
}
