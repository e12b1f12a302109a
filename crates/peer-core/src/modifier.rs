//! The generic attribute modifier.

use log::{debug, trace};

use crate::attribute::AttributeId;
use crate::diff::values_differ;
use crate::native::{NativeModule, NodeHandle};
use crate::value::AttrValue;

/// Pending and committed value of one attribute on one component.
///
/// `stage_value` is what the current render pass asked for (`None` clears the
/// attribute back to its platform default); `value` is what was last pushed to
/// the native node.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeModifier {
    id: AttributeId,
    stage_value: Option<AttrValue>,
    value: Option<AttrValue>,
}

impl AttributeModifier {
    pub fn new(id: AttributeId, stage_value: Option<AttrValue>) -> Self {
        Self {
            id,
            stage_value,
            value: None,
        }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn stage_value(&self) -> Option<&AttrValue> {
        self.stage_value.as_ref()
    }

    pub fn value(&self) -> Option<&AttrValue> {
        self.value.as_ref()
    }

    /// Overwrites the staged value. The committed value is untouched until
    /// the next reconciliation.
    pub fn stage(&mut self, value: Option<AttrValue>) {
        self.stage_value = value;
    }

    /// Whether the staged value would trigger a native set.
    pub fn is_different(&self) -> bool {
        match &self.stage_value {
            Some(stage) => values_differ(stage, self.value.as_ref(), self.id.descriptor().compare),
            None => true,
        }
    }

    /// Marks the committed value as unknown so the next reconciliation
    /// re-applies whatever is staged.
    pub fn forget_committed(&mut self) {
        self.value = None;
    }

    /// Converges `node` towards the staged value.
    ///
    /// Returns `true` when the staged value was unset: the attribute has been
    /// reset and the modifier must be evicted from its registry. Unchanged
    /// values issue no native call at all.
    pub fn reconcile(&mut self, native: &mut dyn NativeModule, node: NodeHandle) -> bool {
        let descriptor = self.id.descriptor();
        let Some(stage) = self.stage_value.as_ref() else {
            self.value = None;
            trace!("reset {} on {}", self.id, node);
            (descriptor.reset)(native, node, self.id);
            return true;
        };

        if !values_differ(stage, self.value.as_ref(), descriptor.compare) {
            return false;
        }

        let stage = stage.clone();
        if descriptor.accepts.accepts(stage.kind()) {
            trace!("set {} on {}", self.id, node);
            (descriptor.apply)(native, node, self.id, &stage);
        } else {
            debug!(
                "{} does not accept {:?} values; resetting on {}",
                self.id,
                stage.kind(),
                node
            );
            (descriptor.reset)(native, node, self.id);
        }
        self.value = Some(stage);
        false
    }
}
