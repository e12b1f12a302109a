//! Gesture descriptors and the router that registers them natively.

use std::fmt;
use std::rc::Rc;

use log::{trace, warn};
use peer_core::{
    CancelCallback, GestureCallback, GestureEvent, GestureGroupHandle, GestureKind, GestureMask,
    GesturePriority, GroupMode, NativeModule, NodeHandle, PanDirection, PeerError,
    PhaseCallbacks, SwipeDirection, UnrecognizedGesturePolicy,
};

fn callback(f: impl Fn(&GestureEvent) + 'static) -> Option<GestureCallback> {
    Some(Rc::new(f))
}

macro_rules! tag_builder {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $ty {
                pub fn tag(mut self, tag: impl Into<String>) -> Self {
                    self.tag = Some(tag.into());
                    self
                }

                pub fn fingers(mut self, fingers: u32) -> Self {
                    self.fingers = fingers;
                    self
                }
            }
        )+
    };
}

macro_rules! phase_builder {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $ty {
                pub fn on_action_start(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
                    self.callbacks.on_action_start = callback(f);
                    self
                }

                pub fn on_action_update(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
                    self.callbacks.on_action_update = callback(f);
                    self
                }

                pub fn on_action_end(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
                    self.callbacks.on_action_end = callback(f);
                    self
                }

                pub fn on_action_cancel(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
                    self.callbacks.on_action_cancel = callback(f);
                    self
                }
            }
        )+
    };
}

#[derive(Clone)]
pub struct TapGesture {
    pub tag: Option<String>,
    pub count: u32,
    pub fingers: u32,
    pub on_action: Option<GestureCallback>,
}

impl Default for TapGesture {
    fn default() -> Self {
        Self {
            tag: None,
            count: 1,
            fingers: 1,
            on_action: None,
        }
    }
}

impl TapGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn on_action(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action = callback(f);
        self
    }
}

#[derive(Clone)]
pub struct LongPressGesture {
    pub tag: Option<String>,
    pub fingers: u32,
    pub repeat: bool,
    /// Milliseconds.
    pub duration: u32,
    pub on_action: Option<GestureCallback>,
    pub on_action_end: Option<GestureCallback>,
    pub on_action_cancel: Option<GestureCallback>,
}

impl Default for LongPressGesture {
    fn default() -> Self {
        Self {
            tag: None,
            fingers: 1,
            repeat: false,
            duration: 500,
            on_action: None,
            on_action_end: None,
            on_action_cancel: None,
        }
    }
}

impl LongPressGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn on_action(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action = callback(f);
        self
    }

    pub fn on_action_end(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action_end = callback(f);
        self
    }

    pub fn on_action_cancel(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action_cancel = callback(f);
        self
    }
}

#[derive(Clone)]
pub struct PanGesture {
    pub tag: Option<String>,
    pub fingers: u32,
    pub direction: PanDirection,
    pub distance: f64,
    pub callbacks: PhaseCallbacks,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self {
            tag: None,
            fingers: 1,
            direction: PanDirection::ALL,
            distance: 5.0,
            callbacks: PhaseCallbacks::default(),
        }
    }
}

impl PanGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: PanDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }
}

#[derive(Clone)]
pub struct SwipeGesture {
    pub tag: Option<String>,
    pub fingers: u32,
    pub direction: SwipeDirection,
    pub speed: f64,
    pub on_action: Option<GestureCallback>,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self {
            tag: None,
            fingers: 1,
            direction: SwipeDirection::All,
            speed: 100.0,
            on_action: None,
        }
    }
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: SwipeDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn on_action(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action = callback(f);
        self
    }
}

#[derive(Clone)]
pub struct PinchGesture {
    pub tag: Option<String>,
    pub fingers: u32,
    pub distance: f64,
    pub callbacks: PhaseCallbacks,
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self {
            tag: None,
            fingers: 2,
            distance: 5.0,
            callbacks: PhaseCallbacks::default(),
        }
    }
}

impl PinchGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }
}

#[derive(Clone)]
pub struct RotationGesture {
    pub tag: Option<String>,
    pub fingers: u32,
    /// Degrees.
    pub angle: f64,
    pub callbacks: PhaseCallbacks,
}

impl Default for RotationGesture {
    fn default() -> Self {
        Self {
            tag: None,
            fingers: 2,
            angle: 1.0,
            callbacks: PhaseCallbacks::default(),
        }
    }
}

impl RotationGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

tag_builder!(
    TapGesture,
    LongPressGesture,
    PanGesture,
    SwipeGesture,
    PinchGesture,
    RotationGesture,
);
phase_builder!(PanGesture, PinchGesture, RotationGesture);

/// Gestures that compete as one unit. Children may be groups themselves.
#[derive(Clone, Default)]
pub struct GestureGroup {
    pub tag: Option<String>,
    pub mode: GroupMode,
    pub on_cancel: Option<CancelCallback>,
    pub children: Vec<GestureDescriptor>,
}

impl GestureGroup {
    pub fn new(mode: GroupMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn on_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_cancel = Some(Rc::new(f));
        self
    }

    pub fn child(mut self, child: impl Into<GestureDescriptor>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A tagged gesture as declared by the application.
#[derive(Clone)]
pub enum GestureDescriptor {
    Tap(TapGesture),
    LongPress(LongPressGesture),
    Pan(PanGesture),
    Swipe(SwipeGesture),
    Pinch(PinchGesture),
    Rotation(RotationGesture),
    Group(GestureGroup),
    /// A wire kind this router has no variant for.
    Unrecognized { kind: u32 },
}

impl GestureDescriptor {
    /// First unrecognized kind in this descriptor, searching group members
    /// depth-first.
    pub fn first_unrecognized(&self) -> Option<u32> {
        match self {
            GestureDescriptor::Unrecognized { kind } => Some(*kind),
            GestureDescriptor::Group(group) => group
                .children
                .iter()
                .find_map(GestureDescriptor::first_unrecognized),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            GestureDescriptor::Tap(_) => Some(GestureKind::Tap),
            GestureDescriptor::LongPress(_) => Some(GestureKind::LongPress),
            GestureDescriptor::Pan(_) => Some(GestureKind::Pan),
            GestureDescriptor::Swipe(_) => Some(GestureKind::Swipe),
            GestureDescriptor::Pinch(_) => Some(GestureKind::Pinch),
            GestureDescriptor::Rotation(_) => Some(GestureKind::Rotation),
            GestureDescriptor::Group(_) => Some(GestureKind::Group),
            GestureDescriptor::Unrecognized { .. } => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            GestureDescriptor::Tap(g) => g.tag.as_deref(),
            GestureDescriptor::LongPress(g) => g.tag.as_deref(),
            GestureDescriptor::Pan(g) => g.tag.as_deref(),
            GestureDescriptor::Swipe(g) => g.tag.as_deref(),
            GestureDescriptor::Pinch(g) => g.tag.as_deref(),
            GestureDescriptor::Rotation(g) => g.tag.as_deref(),
            GestureDescriptor::Group(g) => g.tag.as_deref(),
            GestureDescriptor::Unrecognized { .. } => None,
        }
    }
}

impl fmt::Debug for GestureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureDescriptor::Group(group) => f
                .debug_struct("Group")
                .field("tag", &group.tag)
                .field("mode", &group.mode)
                .field("children", &group.children)
                .finish(),
            GestureDescriptor::Unrecognized { kind } => {
                f.debug_struct("Unrecognized").field("kind", kind).finish()
            }
            other => f
                .debug_struct("Gesture")
                .field("kind", &other.kind())
                .field("tag", &other.tag())
                .finish(),
        }
    }
}

macro_rules! descriptor_from {
    ($($variant:ident($ty:ident)),+ $(,)?) => {
        $(
            impl From<$ty> for GestureDescriptor {
                fn from(value: $ty) -> Self {
                    GestureDescriptor::$variant(value)
                }
            }
        )+
    };
}

descriptor_from!(
    Tap(TapGesture),
    LongPress(LongPressGesture),
    Pan(PanGesture),
    Swipe(SwipeGesture),
    Pinch(PinchGesture),
    Rotation(RotationGesture),
    Group(GestureGroup),
);

/// Turns descriptors into native gesture registrations.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureRouter {
    policy: UnrecognizedGesturePolicy,
}

impl GestureRouter {
    pub fn new(policy: UnrecognizedGesturePolicy) -> Self {
        Self { policy }
    }

    /// Registers `descriptor` on `node`. Groups are built bottom-up and then
    /// attached as a whole.
    pub fn attach(
        &self,
        native: &mut dyn NativeModule,
        node: NodeHandle,
        descriptor: &GestureDescriptor,
        priority: GesturePriority,
        mask: GestureMask,
    ) -> Result<(), PeerError> {
        trace!("attach {descriptor:?} to {node}");
        self.check_recognized(descriptor)?;
        match descriptor {
            GestureDescriptor::Tap(g) => native.add_tap_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.count,
                g.fingers,
                g.on_action.clone(),
            ),
            GestureDescriptor::LongPress(g) => native.add_long_press_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.fingers,
                g.repeat,
                g.duration,
                g.on_action.clone(),
                g.on_action_end.clone(),
                g.on_action_cancel.clone(),
            ),
            GestureDescriptor::Pan(g) => native.add_pan_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.fingers,
                g.direction,
                g.distance,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
            ),
            GestureDescriptor::Swipe(g) => native.add_swipe_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.fingers,
                g.direction,
                g.speed,
                g.on_action.clone(),
            ),
            GestureDescriptor::Pinch(g) => native.add_pinch_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.fingers,
                g.distance,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
            ),
            GestureDescriptor::Rotation(g) => native.add_rotation_gesture(
                node,
                priority,
                mask,
                g.tag.as_deref(),
                g.fingers,
                g.angle,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
            ),
            GestureDescriptor::Group(group) => {
                let handle = self.build_group(native, group)?;
                native.attach_gesture_group(node, priority, mask, handle);
            }
            GestureDescriptor::Unrecognized { kind } => return self.unrecognized(*kind),
        }
        Ok(())
    }

    /// Registers `descriptor` as a member of `group` instead of a node.
    pub fn attach_to_group(
        &self,
        native: &mut dyn NativeModule,
        descriptor: &GestureDescriptor,
        group: GestureGroupHandle,
    ) -> Result<(), PeerError> {
        self.check_recognized(descriptor)?;
        match descriptor {
            GestureDescriptor::Tap(g) => native.add_tap_gesture_to_group(
                g.tag.as_deref(),
                g.count,
                g.fingers,
                g.on_action.clone(),
                group,
            ),
            GestureDescriptor::LongPress(g) => native.add_long_press_gesture_to_group(
                g.tag.as_deref(),
                g.fingers,
                g.repeat,
                g.duration,
                g.on_action.clone(),
                g.on_action_end.clone(),
                g.on_action_cancel.clone(),
                group,
            ),
            GestureDescriptor::Pan(g) => native.add_pan_gesture_to_group(
                g.tag.as_deref(),
                g.fingers,
                g.direction,
                g.distance,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
                group,
            ),
            GestureDescriptor::Swipe(g) => native.add_swipe_gesture_to_group(
                g.tag.as_deref(),
                g.fingers,
                g.direction,
                g.speed,
                g.on_action.clone(),
                group,
            ),
            GestureDescriptor::Pinch(g) => native.add_pinch_gesture_to_group(
                g.tag.as_deref(),
                g.fingers,
                g.distance,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
                group,
            ),
            GestureDescriptor::Rotation(g) => native.add_rotation_gesture_to_group(
                g.tag.as_deref(),
                g.fingers,
                g.angle,
                g.callbacks.on_action_start.clone(),
                g.callbacks.on_action_update.clone(),
                g.callbacks.on_action_end.clone(),
                g.callbacks.on_action_cancel.clone(),
                group,
            ),
            GestureDescriptor::Group(nested) => {
                let child = self.build_group(native, nested)?;
                native.add_gesture_group_to_group(child, group);
            }
            GestureDescriptor::Unrecognized { kind } => return self.unrecognized(*kind),
        }
        Ok(())
    }

    fn build_group(
        &self,
        native: &mut dyn NativeModule,
        group: &GestureGroup,
    ) -> Result<GestureGroupHandle, PeerError> {
        let handle =
            native.add_gesture_group(group.tag.as_deref(), group.on_cancel.clone(), group.mode);
        for child in &group.children {
            self.attach_to_group(native, child, handle)?;
        }
        Ok(handle)
    }

    /// Under `Reject`, fails before any native call so no group is left
    /// half built.
    fn check_recognized(&self, descriptor: &GestureDescriptor) -> Result<(), PeerError> {
        match (self.policy, descriptor.first_unrecognized()) {
            (UnrecognizedGesturePolicy::Reject, Some(kind)) => {
                Err(PeerError::UnrecognizedGesture { kind })
            }
            _ => Ok(()),
        }
    }

    fn unrecognized(&self, kind: u32) -> Result<(), PeerError> {
        match self.policy {
            UnrecognizedGesturePolicy::Ignore => {
                warn!("ignoring unrecognized gesture kind {kind}");
                Ok(())
            }
            UnrecognizedGesturePolicy::Reject => Err(PeerError::UnrecognizedGesture { kind }),
        }
    }

    pub fn detach(&self, native: &mut dyn NativeModule, node: NodeHandle, tag: &str) {
        native.remove_gesture_by_tag(node, tag);
    }

    pub fn clear_all(&self, native: &mut dyn NativeModule, node: NodeHandle) {
        native.clear_gestures(node);
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
