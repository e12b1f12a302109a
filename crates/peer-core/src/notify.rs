//! Registry variant that reports every write.

use std::fmt;

use log::debug;

use crate::attribute::AttributeId;
use crate::modifier::AttributeModifier;
use crate::native::{NativeModule, NodeHandle};
use crate::registry::ModifierRegistry;
use crate::value::AttrValue;

/// Invoked after every write with the written modifier. Returns `true` when
/// the modifier expired while handling the change and must be evicted.
pub type ChangeCallback = Box<dyn FnMut(AttributeId, &mut AttributeModifier) -> bool>;

/// A [`ModifierRegistry`] with a single change callback.
///
/// The callback can be installed once; later registrations are ignored.
/// Frame-node-bound components use it to push each write to the live node
/// instead of waiting for the next batched patch.
#[derive(Default)]
pub struct ChangeNotifyingMap {
    registry: ModifierRegistry,
    on_change: Option<ChangeCallback>,
}

impl ChangeNotifyingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the change callback. Returns `false` and keeps the existing
    /// callback if one is already set.
    pub fn set_on_change(&mut self, callback: ChangeCallback) -> bool {
        if self.on_change.is_some() {
            debug!("change callback already registered; ignoring");
            return false;
        }
        self.on_change = Some(callback);
        true
    }

    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }

    pub fn stage(&mut self, id: AttributeId, value: Option<AttrValue>) {
        self.registry.stage(id, value);
        self.notify(id);
    }

    pub fn insert(&mut self, modifier: AttributeModifier) {
        let id = modifier.id();
        self.registry.insert(modifier);
        self.notify(id);
    }

    fn notify(&mut self, id: AttributeId) {
        let Some(callback) = self.on_change.as_mut() else {
            return;
        };
        let Some(modifier) = self.registry.get_mut(id) else {
            return;
        };
        if callback(id, modifier) {
            self.registry.remove(id);
        }
    }

    pub fn patch(&mut self, native: &mut dyn NativeModule, node: NodeHandle) -> Vec<AttributeId> {
        self.registry.patch(native, node)
    }

    pub fn clear_staged(&mut self) {
        self.registry.clear_staged();
    }

    pub fn forget_committed(&mut self) {
        self.registry.forget_committed();
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn get(&self, id: AttributeId) -> Option<&AttributeModifier> {
        self.registry.get(id)
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.registry.contains(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl fmt::Debug for ChangeNotifyingMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifyingMap")
            .field("registry", &self.registry)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callback_fires_once_per_write() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut map = ChangeNotifyingMap::new();
        let sink = Rc::clone(&log);
        let callback: ChangeCallback = Box::new(move |id, modifier| {
            sink.borrow_mut().push((id, modifier.stage_value().cloned()));
            false
        });
        assert!(map.set_on_change(callback));

        map.stage(AttributeId::Width, Some(AttrValue::Number(10.0)));
        map.stage(AttributeId::Width, Some(AttrValue::Number(10.0)));
        map.insert(AttributeModifier::new(AttributeId::Height, None));

        assert_eq!(
            *log.borrow(),
            vec![
                (AttributeId::Width, Some(AttrValue::Number(10.0))),
                (AttributeId::Width, Some(AttrValue::Number(10.0))),
                (AttributeId::Height, None),
            ]
        );
    }

    #[test]
    fn second_registration_never_replaces_first() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let mut map = ChangeNotifyingMap::new();

        let counter = Rc::clone(&first);
        let callback: ChangeCallback = Box::new(move |_, _| {
            *counter.borrow_mut() += 1;
            false
        });
        assert!(map.set_on_change(callback));
        let counter = Rc::clone(&second);
        let callback: ChangeCallback = Box::new(move |_, _| {
            *counter.borrow_mut() += 1;
            false
        });
        assert!(!map.set_on_change(callback));

        map.stage(AttributeId::Opacity, Some(AttrValue::Number(0.5)));
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 0);
    }

    #[test]
    fn expired_modifier_is_evicted_after_callback() {
        let mut map = ChangeNotifyingMap::new();
        let callback: ChangeCallback = Box::new(|_, modifier| modifier.stage_value().is_none());
        map.set_on_change(callback);

        map.stage(AttributeId::Width, Some(AttrValue::Number(1.0)));
        assert!(map.contains(AttributeId::Width));
        map.stage(AttributeId::Width, None);
        assert!(!map.contains(AttributeId::Width));
    }

    #[test]
    fn writes_without_callback_are_kept_for_patch() {
        let mut map = ChangeNotifyingMap::new();
        map.stage(AttributeId::Width, None);
        assert_eq!(map.len(), 1);
    }
}
