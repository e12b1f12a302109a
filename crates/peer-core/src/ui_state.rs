//! Interaction-state bits exchanged with the native side.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// One interaction state a component can style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    Normal,
    Pressed,
    Focused,
    Disabled,
    Selected,
}

impl InteractionState {
    /// Non-normal states in dispatch order.
    pub const ORDERED: [InteractionState; 4] = [
        InteractionState::Pressed,
        InteractionState::Focused,
        InteractionState::Disabled,
        InteractionState::Selected,
    ];

    pub fn bits(self) -> UiState {
        match self {
            InteractionState::Normal => UiState::NORMAL,
            InteractionState::Pressed => UiState::PRESSED,
            InteractionState::Focused => UiState::FOCUSED,
            InteractionState::Disabled => UiState::DISABLED,
            InteractionState::Selected => UiState::SELECTED,
        }
    }
}

/// Bitmask of interaction states. Normal is the empty mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UiState(u32);

impl UiState {
    pub const NORMAL: Self = Self(0);
    pub const PRESSED: Self = Self(1);
    pub const FOCUSED: Self = Self(1 << 1);
    pub const DISABLED: Self = Self(1 << 2);
    pub const SELECTED: Self = Self(1 << 3);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_normal(self) -> bool {
        self.0 == 0
    }

    pub fn with(mut self, state: InteractionState) -> Self {
        self.insert(state);
        self
    }

    pub fn insert(&mut self, state: InteractionState) {
        self.0 |= state.bits().0;
    }

    pub fn remove(&mut self, state: InteractionState) {
        self.0 &= !state.bits().0;
    }

    /// Normal is contained in every mask.
    pub fn contains(self, state: InteractionState) -> bool {
        let bits = state.bits().0;
        self.0 & bits == bits
    }
}

impl BitOr for UiState {
    type Output = UiState;

    fn bitor(self, rhs: UiState) -> UiState {
        UiState(self.0 | rhs.0)
    }
}

impl BitOrAssign for UiState {
    fn bitor_assign(&mut self, rhs: UiState) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            return f.write_str("UiState(Normal)");
        }
        let states: Vec<_> = InteractionState::ORDERED
            .iter()
            .filter(|state| self.contains(**state))
            .collect();
        f.debug_tuple("UiState").field(&states).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_match_native_layout() {
        assert_eq!(UiState::PRESSED.bits(), 1);
        assert_eq!(UiState::FOCUSED.bits(), 2);
        assert_eq!(UiState::DISABLED.bits(), 4);
        assert_eq!(UiState::SELECTED.bits(), 8);
        assert_eq!(UiState::NORMAL.bits(), 0);
    }

    #[test]
    fn insert_remove_and_contains() {
        let mut state = UiState::default().with(InteractionState::Pressed);
        state.insert(InteractionState::Selected);
        assert_eq!(state, UiState::PRESSED | UiState::SELECTED);
        assert!(state.contains(InteractionState::Normal));
        assert!(!state.contains(InteractionState::Focused));

        state.remove(InteractionState::Pressed);
        assert_eq!(state.bits(), 8);
    }
}
