//! Declarative components over native peers: binding modes, fluent
//! attribute setters, interaction-state styling and gestures.

pub mod component;
pub mod context;
pub mod custom_property;
pub mod gesture;
pub mod handle;
pub mod interaction;
mod setters;

pub use component::{BindingMode, Component, ComponentKind, UiGestureEvent};
pub use context::RootContext;
pub use custom_property::CustomPropertyStore;
pub use gesture::{
    GestureDescriptor, GestureGroup, GestureRouter, LongPressGesture, PanGesture, PinchGesture,
    RotationGesture, SwipeGesture, TapGesture,
};
pub use handle::{HandleSlot, NodeRef};
pub use interaction::{InteractionStateDispatcher, StateStyle, StateStyles};

pub mod prelude {
    pub use crate::{
        BindingMode, Component, ComponentKind, GestureDescriptor, InteractionStateDispatcher,
        RootContext, StateStyles,
    };
    pub use peer_core::prelude::*;
}

