//! Declarative components and their binding modes.

use std::rc::Rc;

use log::debug;
use peer_core::{
    AttrValue, AttributeGroup, AttributeId, ChangeCallback, ChangeNotifyingMap, GestureMask,
    GesturePriority, ModifierRegistry, NativeModule, NodeHandle, PeerError, SharedNative,
};

use crate::context::RootContext;
use crate::gesture::{GestureDescriptor, GestureRouter};
use crate::handle::{HandleSlot, NodeRef};
use crate::interaction::StateStyles;

/// How a component reaches its native node. Fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindingMode {
    /// Writes are batched until [`Component::patch`].
    #[default]
    Plain,
    /// Every write is reconciled against the live node immediately.
    FrameNodeBound,
    /// Batched, and re-applies everything after the handle is reassigned.
    StateBound,
    /// Batched; the host owns the registry's lifetime and patches it
    /// explicitly.
    ExposedModifier,
}

/// Component variants and the attribute groups they carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Common,
    Button,
    Text,
    Span,
    Image,
    Stack,
    Row,
    Column,
    List,
    ListItem,
}

impl ComponentKind {
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Common => "Common",
            ComponentKind::Button => "Button",
            ComponentKind::Text => "Text",
            ComponentKind::Span => "Span",
            ComponentKind::Image => "Image",
            ComponentKind::Stack => "Stack",
            ComponentKind::Row => "Row",
            ComponentKind::Column => "Column",
            ComponentKind::List => "List",
            ComponentKind::ListItem => "ListItem",
        }
    }

    pub fn supports(self, group: AttributeGroup) -> bool {
        use AttributeGroup as G;
        use ComponentKind as K;
        match (self, group) {
            // Spans are styled text runs without a box of their own.
            (K::Span, G::Font) => true,
            (K::Span, _) => false,
            (_, G::Common) => true,
            (K::Text | K::Button, G::Font) => true,
            (K::Text, G::TextLayout) => true,
            (K::Image, G::Image) => true,
            (K::Stack, G::Stack) => true,
            (K::Row | K::Column, G::Flex) => true,
            (K::List, G::List) => true,
            (K::Button, G::Button) => true,
            _ => false,
        }
    }

    pub fn supports_attribute(self, id: AttributeId) -> bool {
        self.supports(id.group())
    }
}

enum ModifierStore {
    Batched(ModifierRegistry),
    Immediate(ChangeNotifyingMap),
}

impl ModifierStore {
    fn stage(&mut self, id: AttributeId, value: Option<AttrValue>) {
        match self {
            ModifierStore::Batched(registry) => {
                registry.stage(id, value);
            }
            ModifierStore::Immediate(map) => map.stage(id, value),
        }
    }

    fn patch(&mut self, native: &mut dyn NativeModule, node: NodeHandle) -> Vec<AttributeId> {
        match self {
            ModifierStore::Batched(registry) => registry.patch(native, node),
            ModifierStore::Immediate(map) => map.patch(native, node),
        }
    }

    fn clear_staged(&mut self) {
        match self {
            ModifierStore::Batched(registry) => registry.clear_staged(),
            ModifierStore::Immediate(map) => map.clear_staged(),
        }
    }

    fn forget_committed(&mut self) {
        match self {
            ModifierStore::Batched(registry) => registry.forget_committed(),
            ModifierStore::Immediate(map) => map.forget_committed(),
        }
    }

    fn registry(&self) -> &ModifierRegistry {
        match self {
            ModifierStore::Batched(registry) => registry,
            ModifierStore::Immediate(map) => map.registry(),
        }
    }
}

/// Reconciles each write against whatever node the slot points at, then
/// marks that node dirty. Writes made while unbound wait for the next patch.
fn immediate_store(native: SharedNative, slot: Rc<HandleSlot>) -> ChangeNotifyingMap {
    let mut map = ChangeNotifyingMap::new();
    let on_change: ChangeCallback = Box::new(move |_, modifier| {
        let Some(node) = slot.handle() else {
            return false;
        };
        let mut native = native.borrow_mut();
        let expired = modifier.reconcile(&mut *native, node);
        native.mark_dirty(node);
        expired
    });
    map.set_on_change(on_change);
    map
}

/// One declarative component bound (or bindable) to a native node.
///
/// Fluent setters stage values; [`patch`](Component::patch) converges the
/// node. Setters fail right away when the component kind does not carry the
/// attribute.
pub struct Component {
    kind: ComponentKind,
    mode: BindingMode,
    context: RootContext,
    slot: Rc<HandleSlot>,
    observed: Option<NodeRef>,
    store: ModifierStore,
    state_styles: StateStyles,
}

impl Component {
    pub fn new(context: RootContext, kind: ComponentKind, mode: BindingMode) -> Self {
        let slot = Rc::new(HandleSlot::new());
        let store = match mode {
            BindingMode::FrameNodeBound => ModifierStore::Immediate(immediate_store(
                Rc::clone(context.native()),
                Rc::clone(&slot),
            )),
            _ => ModifierStore::Batched(ModifierRegistry::new()),
        };
        Self {
            kind,
            mode,
            context,
            slot,
            observed: None,
            store,
            state_styles: StateStyles::default(),
        }
    }

    /// A plain component already bound to `node`.
    pub fn bound(context: RootContext, kind: ComponentKind, node: NodeHandle) -> Self {
        let component = Self::new(context, kind, BindingMode::Plain);
        component.slot.rebind(Some(node));
        component
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    pub fn context(&self) -> &RootContext {
        &self.context
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.slot.handle()
    }

    /// Current handle generation; bumped by every rebind.
    pub fn generation(&self) -> u64 {
        self.slot.generation()
    }

    /// Swaps the native node this component targets.
    pub fn rebind(&mut self, node: NodeHandle) {
        debug!("{} rebound to {node}", self.kind.name());
        self.slot.rebind(Some(node));
    }

    /// Unbinds from the native node. Staged values are dropped when the
    /// configuration asks for it.
    pub fn detach(&mut self) {
        self.slot.rebind(None);
        if self.context.config().clear_staged_on_detach {
            self.store.clear_staged();
        }
    }

    /// Stages `value` for `id`.
    pub fn stage(
        &mut self,
        id: AttributeId,
        value: impl Into<AttrValue>,
    ) -> Result<&mut Self, PeerError> {
        self.stage_value(id, Some(value.into()))
    }

    /// Clears `id`; the next reconciliation resets it to the platform
    /// default.
    pub fn unset(&mut self, id: AttributeId) -> Result<&mut Self, PeerError> {
        self.stage_value(id, None)
    }

    pub fn stage_value(
        &mut self,
        id: AttributeId,
        value: Option<AttrValue>,
    ) -> Result<&mut Self, PeerError> {
        if !self.kind.supports_attribute(id) {
            return Err(PeerError::UnsupportedAttribute {
                component: self.kind.name(),
                attribute: id.name(),
            });
        }
        self.store.stage(id, value);
        Ok(self)
    }

    /// Unsets every staged value without touching the node.
    pub fn clear_staged(&mut self) {
        self.store.clear_staged();
    }

    /// Reconciles every staged attribute against the bound node. Returns the
    /// attributes that were reset and evicted.
    pub fn patch(&mut self) -> Vec<AttributeId> {
        let Some(node) = self.slot.handle() else {
            debug!("{} patched while unbound; skipping", self.kind.name());
            return Vec::new();
        };
        if self.mode == BindingMode::StateBound {
            self.track_handle();
        }
        let native = Rc::clone(self.context.native());
        let mut native = native.borrow_mut();
        self.store.patch(&mut *native, node)
    }

    fn track_handle(&mut self) {
        match self.observed {
            Some(observed) if self.slot.is_current(&observed) => {}
            Some(_) => {
                debug!(
                    "{} handle reassigned; re-applying staged attributes",
                    self.kind.name()
                );
                self.store.forget_committed();
                self.observed = Some(self.slot.observe());
            }
            None => self.observed = Some(self.slot.observe()),
        }
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        self.store.registry()
    }

    pub fn staged(&self, id: AttributeId) -> Option<&AttrValue> {
        self.modifiers().get(id)?.stage_value()
    }

    pub fn state_styles(&self) -> &StateStyles {
        &self.state_styles
    }

    pub fn set_state_styles(&mut self, styles: StateStyles) -> &mut Self {
        self.state_styles = styles;
        self
    }

    /// Sets (or with `None` removes) a custom property on the bound node.
    /// Returns `false` when the component is unbound.
    pub fn custom_property(&mut self, key: &str, value: Option<AttrValue>) -> bool {
        let Some(node) = self.slot.handle() else {
            debug!("custom property {key} on unbound {}", self.kind.name());
            return false;
        };
        let mut properties = self.context.properties().borrow_mut();
        match value {
            Some(value) => properties.set_valid_property(node.raw(), key, value),
            None => {
                properties.remove_property(node.raw(), key);
            }
        }
        true
    }

    pub fn get_custom_property(&self, key: &str) -> Option<AttrValue> {
        let node = self.slot.handle()?;
        self.context
            .properties()
            .borrow()
            .get_property(node.raw(), key)
            .cloned()
    }

    pub fn gesture_event(&self) -> UiGestureEvent<'_> {
        UiGestureEvent { component: self }
    }

    pub fn selection(&mut self, _start: i32, _end: i32) -> Result<&mut Self, PeerError> {
        Err(self.unsupported("selection"))
    }

    pub fn on_copy(&mut self, _callback: impl Fn(&str) + 'static) -> Result<&mut Self, PeerError> {
        Err(self.unsupported("onCopy"))
    }

    pub fn data_detector_config(
        &mut self,
        _types: &[i32],
        _on_detect_result: impl Fn(&str) + 'static,
    ) -> Result<&mut Self, PeerError> {
        Err(self.unsupported("dataDetectorConfig"))
    }

    fn unsupported(&self, operation: &'static str) -> PeerError {
        PeerError::UnsupportedOperation {
            component: self.kind.name(),
            operation,
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("kind", &self.kind)
            .field("mode", &self.mode)
            .field("handle", &self.slot.handle())
            .field("modifiers", self.store.registry())
            .finish_non_exhaustive()
    }
}

/// Gesture operations against a component's node.
pub struct UiGestureEvent<'a> {
    component: &'a Component,
}

impl UiGestureEvent<'_> {
    fn router(&self) -> GestureRouter {
        GestureRouter::new(self.component.context.config().unrecognized_gesture)
    }

    pub fn add_gesture(
        &self,
        descriptor: &GestureDescriptor,
        priority: GesturePriority,
        mask: GestureMask,
    ) -> Result<(), PeerError> {
        let Some(node) = self.component.handle() else {
            debug!("gesture on unbound {}", self.component.kind.name());
            return Ok(());
        };
        let mut native = self.component.context.native().borrow_mut();
        self.router().attach(&mut *native, node, descriptor, priority, mask)
    }

    pub fn remove_gesture_by_tag(&self, tag: &str) {
        if let Some(node) = self.component.handle() {
            let mut native = self.component.context.native().borrow_mut();
            self.router().detach(&mut *native, node, tag);
        }
    }

    pub fn clear_gestures(&self) {
        if let Some(node) = self.component.handle() {
            let mut native = self.component.context.native().borrow_mut();
            self.router().clear_all(&mut *native, node);
        }
    }
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;
