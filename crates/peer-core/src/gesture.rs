//! Gesture types shared with the native boundary.
//!
//! Descriptors and routing live in the UI crate; this module only holds the
//! values that travel through [`crate::NativeModule`] gesture calls.

use std::fmt;
use std::rc::Rc;

/// Competition priority of a gesture attached to a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePriority {
    #[default]
    Normal,
    High,
    Parallel,
}

/// Whether internal gestures of the node keep receiving events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureMask {
    #[default]
    Normal,
    IgnoreInternal,
}

/// How the members of a gesture group compete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupMode {
    #[default]
    Sequence,
    Parallel,
    Exclusive,
}

/// Directions a pan gesture recognizes, as native bit flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanDirection(u8);

impl PanDirection {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(1 << 1);
    pub const HORIZONTAL: Self = Self(Self::LEFT.0 | Self::RIGHT.0);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);
    pub const VERTICAL: Self = Self(Self::UP.0 | Self::DOWN.0);
    pub const ALL: Self = Self(Self::HORIZONTAL.0 | Self::VERTICAL.0);

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for PanDirection {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Debug for PanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PanDirection({:#06b})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    None,
    Horizontal,
    Vertical,
    #[default]
    All,
}

/// Wire codes of the gesture variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    LongPress,
    Pan,
    Swipe,
    Pinch,
    Rotation,
    Group,
}

impl GestureKind {
    pub const fn code(self) -> u32 {
        match self {
            GestureKind::Tap => 0,
            GestureKind::LongPress => 1,
            GestureKind::Pan => 2,
            GestureKind::Swipe => 3,
            GestureKind::Pinch => 4,
            GestureKind::Rotation => 5,
            GestureKind::Group => 6,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(GestureKind::Tap),
            1 => Some(GestureKind::LongPress),
            2 => Some(GestureKind::Pan),
            3 => Some(GestureKind::Swipe),
            4 => Some(GestureKind::Pinch),
            5 => Some(GestureKind::Rotation),
            6 => Some(GestureKind::Group),
            _ => None,
        }
    }
}

/// Snapshot the native recognizer hands to gesture callbacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureEvent {
    pub repeat: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub angle: f64,
    pub scale: f64,
    pub speed: f64,
    pub pinch_center_x: f64,
    pub pinch_center_y: f64,
    pub timestamp: u64,
}

pub type GestureCallback = Rc<dyn Fn(&GestureEvent)>;
pub type CancelCallback = Rc<dyn Fn()>;

/// Start/update/end/cancel callbacks of continuous gestures.
#[derive(Clone, Default)]
pub struct PhaseCallbacks {
    pub on_action_start: Option<GestureCallback>,
    pub on_action_update: Option<GestureCallback>,
    pub on_action_end: Option<GestureCallback>,
    pub on_action_cancel: Option<GestureCallback>,
}

impl fmt::Debug for PhaseCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseCallbacks")
            .field("on_action_start", &self.on_action_start.is_some())
            .field("on_action_update", &self.on_action_update.is_some())
            .field("on_action_end", &self.on_action_end.is_some())
            .field("on_action_cancel", &self.on_action_cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip_and_reject_unknown() {
        for kind in [
            GestureKind::Tap,
            GestureKind::LongPress,
            GestureKind::Pan,
            GestureKind::Swipe,
            GestureKind::Pinch,
            GestureKind::Rotation,
            GestureKind::Group,
        ] {
            assert_eq!(GestureKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(GestureKind::from_code(42), None);
    }

    #[test]
    fn pan_direction_composites() {
        assert_eq!(PanDirection::HORIZONTAL.bits(), 0b0011);
        assert_eq!(PanDirection::VERTICAL.bits(), 0b1100);
        assert_eq!(PanDirection::default(), PanDirection::ALL);
    }
}
