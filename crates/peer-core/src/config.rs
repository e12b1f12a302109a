/// What the gesture router does with a descriptor kind it does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnrecognizedGesturePolicy {
    /// Log a warning and attach nothing.
    #[default]
    Ignore,
    /// Fail the attach call with [`crate::PeerError::UnrecognizedGesture`].
    /// A group holding an unrecognized member is rejected before anything is
    /// registered.
    Reject,
}

/// Runtime knobs shared by every component created from one root context.
#[derive(Clone, Debug)]
pub struct PeerConfig {
    pub unrecognized_gesture: UnrecognizedGesturePolicy,
    /// Drop staged values when a component is detached from its node.
    pub clear_staged_on_detach: bool,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            unrecognized_gesture: UnrecognizedGesturePolicy::Ignore,
            clear_staged_on_detach: true,
        }
    }
}

impl PeerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unrecognized_gesture(mut self, policy: UnrecognizedGesturePolicy) -> Self {
        self.unrecognized_gesture = policy;
        self
    }

    pub fn with_clear_staged_on_detach(mut self, clear: bool) -> Self {
        self.clear_staged_on_detach = clear;
        self
    }
}
