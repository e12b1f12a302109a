//! Attribute reconciliation core: values, the attribute descriptor table,
//! modifiers, registries and the native boundary.

pub mod attribute;
pub mod collections;
pub mod config;
pub mod diff;
pub mod error;
pub mod gesture;
pub mod modifier;
pub mod native;
pub mod notify;
pub mod registry;
pub mod ui_state;
pub mod value;

// Re-export commonly used items
pub use attribute::{AttributeDescriptor, AttributeGroup, AttributeId};
pub use config::{PeerConfig, UnrecognizedGesturePolicy};
pub use error::PeerError;
pub use gesture::{
    CancelCallback, GestureCallback, GestureEvent, GestureKind, GestureMask, GesturePriority,
    GroupMode, PanDirection, PhaseCallbacks, SwipeDirection,
};
pub use modifier::AttributeModifier;
pub use native::{GestureGroupHandle, NativeModule, NodeHandle, SharedNative};
pub use notify::{ChangeCallback, ChangeNotifyingMap};
pub use registry::ModifierRegistry;
pub use ui_state::{InteractionState, UiState};
pub use value::{
    AttrValue, Border, Color, Composite, Decoration, Divider, Edges, Field, Font, ResourceRef,
    Shadow, Shapes, SizeValue, ValueKind,
};

pub mod prelude {
    pub use crate::{
        AttrValue, AttributeId, AttributeModifier, ChangeNotifyingMap, Color, Edges, Field,
        ModifierRegistry, NativeModule, NodeHandle, PeerConfig, PeerError, ResourceRef,
        SharedNative, UiState,
    };
}
