//! The native boundary.
//!
//! Everything this workspace does ends in calls on a [`NativeModule`]. The
//! module is opaque: it owns the scene graph and is reached only through the
//! handles defined here.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::attribute::AttributeId;
use crate::gesture::{
    CancelCallback, GestureCallback, GestureMask, GesturePriority, GroupMode, PanDirection,
    SwipeDirection,
};
use crate::ui_state::UiState;
use crate::value::Field;

/// Opaque native node. The platform owns the node; components only refer to
/// it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Numeric node id, also the key of the custom-property store.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({:#x})", self.0)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Native gesture group created by [`NativeModule::add_gesture_group`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GestureGroupHandle(u64);

impl GestureGroupHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Calls the reconciliation layer issues against the native scene graph.
///
/// `set_attribute` always receives the fully decomposed value: a four-sided
/// inset arrives as four fields, never as one opaque struct. `reset_attribute`
/// restores the platform default.
///
/// Gesture calls receive descriptor fields and callbacks positionally.
/// Top-level variants target a node; the `*_to_group` variants target a group
/// handle instead.
#[allow(clippy::too_many_arguments)]
pub trait NativeModule {
    fn set_attribute(&mut self, node: NodeHandle, attribute: AttributeId, fields: &[Field]);

    fn reset_attribute(&mut self, node: NodeHandle, attribute: AttributeId);

    /// Signals that properties changed outside a batched patch.
    fn mark_dirty(&mut self, _node: NodeHandle) {}

    fn set_supported_ui_state(&mut self, node: NodeHandle, mask: UiState);

    fn ui_state(&self, node: NodeHandle) -> UiState;

    fn add_tap_gesture(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        tag: Option<&str>,
        count: u32,
        fingers: u32,
        on_action: Option<GestureCallback>,
    );

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
    );

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
    );

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
    );

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
    );

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
    );

    fn add_gesture_group(
        &mut self,
        tag: Option<&str>,
        on_cancel: Option<CancelCallback>,
        mode: GroupMode,
    ) -> GestureGroupHandle;

    fn add_tap_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        count: u32,
        fingers: u32,
        on_action: Option<GestureCallback>,
        group: GestureGroupHandle,
    );

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
    );

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
    );

    fn add_swipe_gesture_to_group(
        &mut self,
        tag: Option<&str>,
        fingers: u32,
        direction: SwipeDirection,
        speed: f64,
        on_action: Option<GestureCallback>,
        group: GestureGroupHandle,
    );

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
    );

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
    );

    /// Nests `child` inside `parent`.
    fn add_gesture_group_to_group(&mut self, child: GestureGroupHandle, parent: GestureGroupHandle);

    fn attach_gesture_group(
        &mut self,
        node: NodeHandle,
        priority: GesturePriority,
        mask: GestureMask,
        group: GestureGroupHandle,
    );

    fn remove_gesture_by_tag(&mut self, node: NodeHandle, tag: &str);

    fn clear_gestures(&mut self, node: NodeHandle);
}

/// The native module as shared by every component of one root context.
pub type SharedNative = Rc<RefCell<dyn NativeModule>>;
