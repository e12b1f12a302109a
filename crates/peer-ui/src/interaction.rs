//! Interaction-state styling.
//!
//! A component declares one style callback per interaction state. The
//! dispatcher publishes which states are styled, reads the node's current
//! state back and runs the matching callbacks. It keeps nothing between
//! calls.

use std::fmt;
use std::rc::Rc;

use peer_core::{InteractionState, PeerError, UiState};

use crate::component::Component;

/// Restyles a component for one interaction state.
pub type StateStyle = Rc<dyn Fn(&mut Component) -> Result<(), PeerError>>;

#[derive(Clone, Default)]
pub struct StateStyles {
    normal: Option<StateStyle>,
    pressed: Option<StateStyle>,
    focused: Option<StateStyle>,
    disabled: Option<StateStyle>,
    selected: Option<StateStyle>,
}

impl StateStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        mut self,
        state: InteractionState,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        let style: StateStyle = Rc::new(style);
        match state {
            InteractionState::Normal => self.normal = Some(style),
            InteractionState::Pressed => self.pressed = Some(style),
            InteractionState::Focused => self.focused = Some(style),
            InteractionState::Disabled => self.disabled = Some(style),
            InteractionState::Selected => self.selected = Some(style),
        }
        self
    }

    pub fn normal(
        self,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        self.on(InteractionState::Normal, style)
    }

    pub fn pressed(
        self,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        self.on(InteractionState::Pressed, style)
    }

    pub fn focused(
        self,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        self.on(InteractionState::Focused, style)
    }

    pub fn disabled(
        self,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        self.on(InteractionState::Disabled, style)
    }

    pub fn selected(
        self,
        style: impl Fn(&mut Component) -> Result<(), PeerError> + 'static,
    ) -> Self {
        self.on(InteractionState::Selected, style)
    }

    pub fn get(&self, state: InteractionState) -> Option<&StateStyle> {
        match state {
            InteractionState::Normal => self.normal.as_ref(),
            InteractionState::Pressed => self.pressed.as_ref(),
            InteractionState::Focused => self.focused.as_ref(),
            InteractionState::Disabled => self.disabled.as_ref(),
            InteractionState::Selected => self.selected.as_ref(),
        }
    }

    /// One bit per declared non-normal style.
    pub fn supported_mask(&self) -> UiState {
        InteractionState::ORDERED
            .into_iter()
            .filter(|state| self.get(*state).is_some())
            .fold(UiState::NORMAL, |mask, state| mask.with(state))
    }
}

impl fmt::Debug for StateStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStyles")
            .field("normal", &self.normal.is_some())
            .field("supported", &self.supported_mask())
            .finish()
    }
}

pub struct InteractionStateDispatcher;

impl InteractionStateDispatcher {
    pub fn supported_mask(component: &Component) -> UiState {
        component.state_styles().supported_mask()
    }

    /// Tells the node which states the component styles. Returns the
    /// published mask, or `None` when the component is unbound.
    pub fn publish(component: &Component) -> Option<UiState> {
        let node = component.handle()?;
        let mask = Self::supported_mask(component);
        component
            .context()
            .native()
            .borrow_mut()
            .set_supported_ui_state(node, mask);
        Some(mask)
    }

    /// Reads the node's state and runs the normal style (if declared), then
    /// pressed, focused, disabled and selected for every bit that is both
    /// set and declared.
    ///
    /// Stops at the first failing style. Returns the mask of the non-normal
    /// styles that ran.
    pub fn dispatch(component: &mut Component) -> Result<UiState, PeerError> {
        let Some(node) = component.handle() else {
            return Ok(UiState::NORMAL);
        };
        let state = component.context().native().borrow().ui_state(node);
        // Styles restage attributes on the component they receive.
        let styles = component.state_styles().clone();

        if let Some(style) = styles.get(InteractionState::Normal) {
            style(&mut *component)?;
        }
        let mut fired = UiState::NORMAL;
        for candidate in InteractionState::ORDERED {
            if !state.contains(candidate) {
                continue;
            }
            if let Some(style) = styles.get(candidate) {
                style(&mut *component)?;
                fired.insert(candidate);
            }
        }
        Ok(fired)
    }

    /// Publishes the supported mask, then dispatches.
    pub fn apply(component: &mut Component) -> Result<UiState, PeerError> {
        Self::publish(component);
        Self::dispatch(component)
    }
}

#[cfg(test)]
#[path = "tests/interaction_tests.rs"]
mod tests;
