use std::cell::RefCell;
use std::rc::Rc;

use peer_core::collections::map::HashMap;
use peer_core::{
    AttributeId, CancelCallback, Field, GestureCallback, GestureEvent, GestureGroupHandle,
    GestureKind, GestureMask, GesturePriority, GroupMode, NativeModule, NodeHandle, PanDirection,
    SwipeDirection, UiState,
};

/// One call received by [`RecordingNative`].
#[derive(Clone, Debug, PartialEq)]
pub enum NativeCall {
    Set {
        node: NodeHandle,
        attribute: AttributeId,
        fields: Vec<Field>,
    },
    Reset {
        node: NodeHandle,
        attribute: AttributeId,
    },
    MarkDirty {
        node: NodeHandle,
    },
    SetSupportedUiState {
        node: NodeHandle,
        mask: UiState,
    },
    AddGesture {
        node: NodeHandle,
        kind: GestureKind,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<String>,
        fields: Vec<Field>,
    },
    AddGestureToGroup {
        kind: GestureKind,
        tag: Option<String>,
        fields: Vec<Field>,
        group: GestureGroupHandle,
    },
    AddGestureGroup {
        tag: Option<String>,
        mode: GroupMode,
        group: GestureGroupHandle,
    },
    AddGroupToGroup {
        child: GestureGroupHandle,
        parent: GestureGroupHandle,
    },
    AttachGestureGroup {
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        group: GestureGroupHandle,
    },
    RemoveGestureByTag {
        node: NodeHandle,
        tag: String,
    },
    ClearGestures {
        node: NodeHandle,
    },
}

impl NativeCall {
    pub fn set(node: NodeHandle, attribute: AttributeId, fields: Vec<Field>) -> Self {
        NativeCall::Set {
            node,
            attribute,
            fields,
        }
    }

    pub fn reset(node: NodeHandle, attribute: AttributeId) -> Self {
        NativeCall::Reset { node, attribute }
    }

    /// Attribute touched by a set/reset call.
    pub fn attribute(&self) -> Option<AttributeId> {
        match self {
            NativeCall::Set { attribute, .. } | NativeCall::Reset { attribute, .. } => {
                Some(*attribute)
            }
            _ => None,
        }
    }
}

/// Where a gesture was registered: directly on a node or inside a group.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Owner {
    Node(NodeHandle),
    Group(GestureGroupHandle),
}

struct RegisteredHandler {
    owner: Owner,
    tag: Option<String>,
    kind: GestureKind,
    callbacks: Vec<GestureCallback>,
}

/// A [`NativeModule`] that records calls instead of driving a scene graph.
///
/// Gesture groups get sequential handles starting at 1. The interaction
/// state reported for a node is whatever the test put there with
/// [`set_ui_state`](RecordingNative::set_ui_state).
#[derive(Default)]
pub struct RecordingNative {
    calls: Vec<NativeCall>,
    ui_states: HashMap<NodeHandle, UiState>,
    next_group: u64,
    handlers: Vec<RegisteredHandler>,
    group_owners: HashMap<GestureGroupHandle, Owner>,
    group_cancels: Vec<(GestureGroupHandle, CancelCallback)>,
}

impl RecordingNative {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh module behind `Rc<RefCell<_>>`. Clone the `Rc` into a
    /// `SharedNative` to hand it to components and keep this one for
    /// assertions.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn calls(&self) -> &[NativeCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<NativeCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Only the attribute set/reset calls, in order.
    pub fn attribute_calls(&self) -> Vec<NativeCall> {
        self.calls
            .iter()
            .filter(|call| call.attribute().is_some())
            .cloned()
            .collect()
    }

    pub fn set_ui_state(&mut self, node: NodeHandle, state: UiState) {
        self.ui_states.insert(node, state);
    }

    /// Fires every callback registered for gestures carrying `tag`. Returns
    /// the number of callbacks invoked.
    pub fn fire(&self, tag: &str, event: &GestureEvent) -> usize {
        let mut fired = 0;
        for handler in &self.handlers {
            if handler.tag.as_deref() == Some(tag) {
                for callback in &handler.callbacks {
                    callback(event);
                    fired += 1;
                }
            }
        }
        fired
    }

    /// Number of callback-carrying gestures that currently resolve to `node`.
    pub fn handlers_on(&self, node: NodeHandle) -> usize {
        self.handlers
            .iter()
            .filter(|handler| owning_node(&self.group_owners, handler.owner) == Some(node))
            .count()
    }

    /// Kinds of the gestures registered with callbacks, in registration
    /// order.
    pub fn registered_kinds(&self) -> Vec<GestureKind> {
        self.handlers.iter().map(|handler| handler.kind).collect()
    }

    /// Invokes the cancel callback of `group`, if one was registered.
    pub fn cancel_group(&self, group: GestureGroupHandle) -> bool {
        match self.group_cancels.iter().find(|(handle, _)| *handle == group) {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn register(
        &mut self,
        owner: Owner,
        tag: Option<&str>,
        kind: GestureKind,
        callbacks: &[&Option<GestureCallback>],
    ) {
        let callbacks: Vec<GestureCallback> =
            callbacks.iter().filter_map(|callback| (*callback).clone()).collect();
        if callbacks.is_empty() {
            return;
        }
        self.handlers.push(RegisteredHandler {
            owner,
            tag: tag.map(str::to_owned),
            kind,
            callbacks,
        });
    }

    fn record_gesture(
        &mut self,
        node: NodeHandle,
        kind: GestureKind,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fields: Vec<Field>,
    ) {
        self.calls.push(NativeCall::AddGesture {
            node,
            kind,
            priority,
            mask,
            tag: tag.map(str::to_owned),
            fields,
        });
    }

    fn record_in_group(
        &mut self,
        kind: GestureKind,
        tag: Option<&str>,
        fields: Vec<Field>,
        group: GestureGroupHandle,
    ) {
        self.calls.push(NativeCall::AddGestureToGroup {
            kind,
            tag: tag.map(str::to_owned),
            fields,
            group,
        });
    }
}

/// Follows group membership up to the node the outermost group is attached
/// to. Groups that were never attached have no node.
fn owning_node(
    owners: &HashMap<GestureGroupHandle, Owner>,
    mut owner: Owner,
) -> Option<NodeHandle> {
    loop {
        match owner {
            Owner::Node(node) => return Some(node),
            Owner::Group(group) => owner = *owners.get(&group)?,
        }
    }
}

fn pan_direction_field(direction: PanDirection) -> Field {
    Field::Number(direction.bits() as f64)
}

fn swipe_direction_field(direction: SwipeDirection) -> Field {
    let code = match direction {
        SwipeDirection::None => 0,
        SwipeDirection::Horizontal => 1,
        SwipeDirection::Vertical => 2,
        SwipeDirection::All => 3,
    };
    Field::Number(code as f64)
}

#[allow(clippy::too_many_arguments)]
impl NativeModule for RecordingNative {
    fn set_attribute(&mut self, node: NodeHandle, attribute: AttributeId, fields: &[Field]) {
        self.calls.push(NativeCall::set(node, attribute, fields.to_vec()));
    }

    fn reset_attribute(&mut self, node: NodeHandle, attribute: AttributeId) {
        self.calls.push(NativeCall::reset(node, attribute));
    }

    fn mark_dirty(&mut self, node: NodeHandle) {
        self.calls.push(NativeCall::MarkDirty { node });
    }

    fn set_supported_ui_state(&mut self, node: NodeHandle, mask: UiState) {
        self.calls.push(NativeCall::SetSupportedUiState { node, mask });
    }

    fn ui_state(&self, node: NodeHandle) -> UiState {
        self.ui_states.get(&node).copied().unwrap_or(UiState::NORMAL)
    }

    fn add_tap_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        count: u32,
        fingers: u32,
        on_action: Option<GestureCallback>,
    ) {
        let fields = vec![count.into(), fingers.into()];
        self.record_gesture(node, GestureKind::Tap, priority, mask, tag, fields);
        self.register(Owner::Node(node), tag, GestureKind::Tap, &[&on_action]);
    }

    fn add_long_press_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fingers: u32,
        repeat: bool,
        duration: u32,
        on_action: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
    ) {
        let fields = vec![fingers.into(), repeat.into(), duration.into()];
        self.record_gesture(node, GestureKind::LongPress, priority, mask, tag, fields);
        self.register(
            Owner::Node(node),
            tag,
            GestureKind::LongPress,
            &[&on_action, &on_action_end, &on_action_cancel],
        );
    }

    fn add_pan_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fingers: u32,
        direction: PanDirection,
        distance: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
    ) {
        let fields = vec![fingers.into(), pan_direction_field(direction), distance.into()];
        self.record_gesture(node, GestureKind::Pan, priority, mask, tag, fields);
        self.register(
            Owner::Node(node),
            tag,
            GestureKind::Pan,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_swipe_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fingers: u32,
        direction: SwipeDirection,
        speed: f64,
        on_action: Option<GestureCallback>,
    ) {
        let fields = vec![fingers.into(), swipe_direction_field(direction), speed.into()];
        self.record_gesture(node, GestureKind::Swipe, priority, mask, tag, fields);
        self.register(Owner::Node(node), tag, GestureKind::Swipe, &[&on_action]);
    }

    fn add_pinch_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fingers: u32,
        distance: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
    ) {
        let fields = vec![fingers.into(), distance.into()];
        self.record_gesture(node, GestureKind::Pinch, priority, mask, tag, fields);
        self.register(
            Owner::Node(node),
            tag,
            GestureKind::Pinch,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_rotation_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        fingers: u32,
        angle: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
    ) {
        let fields = vec![fingers.into(), angle.into()];
        self.record_gesture(node, GestureKind::Rotation, priority, mask, tag, fields);
        self.register(
            Owner::Node(node),
            tag,
            GestureKind::Rotation,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_gesture_group(
        &mut self,
        tag: Option<&str>,
        on_cancel: Option<CancelCallback>,
        mode: GroupMode,
    ) -> GestureGroupHandle {
        self.next_group += 1;
        let group = GestureGroupHandle::new(self.next_group);
        if let Some(on_cancel) = on_cancel {
            self.group_cancels.push((group, on_cancel));
        }
        self.calls.push(NativeCall::AddGestureGroup {
            tag: tag.map(str::to_owned),
            mode,
            group,
        });
        group
    }

    fn add_tap_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        count: u32,
        fingers: u32,
        on_action: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![count.into(), fingers.into()];
        self.record_in_group(GestureKind::Tap, tag, fields, group);
        self.register(Owner::Group(group), tag, GestureKind::Tap, &[&on_action]);
    }

    fn add_long_press_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        repeat: bool,
        duration: u32,
        on_action: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![fingers.into(), repeat.into(), duration.into()];
        self.record_in_group(GestureKind::LongPress, tag, fields, group);
        self.register(
            Owner::Group(group),
            tag,
            GestureKind::LongPress,
            &[&on_action, &on_action_end, &on_action_cancel],
        );
    }

    fn add_pan_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        direction: PanDirection,
        distance: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![fingers.into(), pan_direction_field(direction), distance.into()];
        self.record_in_group(GestureKind::Pan, tag, fields, group);
        self.register(
            Owner::Group(group),
            tag,
            GestureKind::Pan,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_swipe_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        direction: SwipeDirection,
        speed: f64,
        on_action: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![fingers.into(), swipe_direction_field(direction), speed.into()];
        self.record_in_group(GestureKind::Swipe, tag, fields, group);
        self.register(Owner::Group(group), tag, GestureKind::Swipe, &[&on_action]);
    }

    fn add_pinch_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        distance: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![fingers.into(), distance.into()];
        self.record_in_group(GestureKind::Pinch, tag, fields, group);
        self.register(
            Owner::Group(group),
            tag,
            GestureKind::Pinch,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_rotation_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        angle: f64,
        on_action_start: Option<GestureCallback>,
        on_action_update: Option<GestureCallback>,
        on_action_end: Option<GestureCallback>,
        on_action_cancel: Option<GestureCallback>,
        group: GestureGroupHandle,
    ) {
        let fields = vec![fingers.into(), angle.into()];
        self.record_in_group(GestureKind::Rotation, tag, fields, group);
        self.register(
            Owner::Group(group),
            tag,
            GestureKind::Rotation,
            &[&on_action_start, &on_action_update, &on_action_end, &on_action_cancel],
        );
    }

    fn add_gesture_group_to_group(&mut self, child: GestureGroupHandle, parent: GestureGroupHandle) {
        self.group_owners.insert(child, Owner::Group(parent));
        self.calls.push(NativeCall::AddGroupToGroup { child, parent });
    }

    fn attach_gesture_group(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        group: GestureGroupHandle,
    ) {
        self.group_owners.insert(group, Owner::Node(node));
        self.calls.push(NativeCall::AttachGestureGroup {
            node,
            priority,
            mask,
            group,
        });
    }

    fn remove_gesture_by_tag(&mut self, node: NodeHandle, tag: &str) {
        let owners = &self.group_owners;
        self.handlers.retain(|handler| {
            handler.tag.as_deref() != Some(tag) || owning_node(owners, handler.owner) != Some(node)
        });
        self.calls.push(NativeCall::RemoveGestureByTag {
            node,
            tag: tag.to_owned(),
        });
    }

    fn clear_gestures(&mut self, node: NodeHandle) {
        let owners = &self.group_owners;
        self.handlers
            .retain(|handler| owning_node(owners, handler.owner) != Some(node));
        self.calls.push(NativeCall::ClearGestures { node });
    }
}
