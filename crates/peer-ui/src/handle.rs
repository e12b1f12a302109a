//! Native handle slot with generation tracking.

use std::cell::Cell;

use peer_core::NodeHandle;

/// The node a component currently targets.
///
/// Every [`rebind`](HandleSlot::rebind) bumps the generation, so anyone who
/// remembered a [`NodeRef`] can tell that the handle was reassigned without
/// holding a weak reference to the node itself.
#[derive(Debug, Default)]
pub struct HandleSlot {
    handle: Cell<Option<NodeHandle>>,
    generation: Cell<u64>,
}

/// A handle as observed at one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRef {
    pub handle: Option<NodeHandle>,
    pub generation: u64,
}

impl HandleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<NodeHandle> {
        self.handle.get()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Points the slot at `handle` (or at nothing) and invalidates every
    /// earlier [`NodeRef`].
    pub fn rebind(&self, handle: Option<NodeHandle>) {
        self.handle.set(handle);
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    pub fn observe(&self) -> NodeRef {
        NodeRef {
            handle: self.handle.get(),
            generation: self.generation.get(),
        }
    }

    pub fn is_current(&self, observed: &NodeRef) -> bool {
        observed.generation == self.generation.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebind_invalidates_observations() {
        let slot = HandleSlot::new();
        slot.rebind(Some(NodeHandle::new(1)));
        let seen = slot.observe();
        assert!(slot.is_current(&seen));

        slot.rebind(Some(NodeHandle::new(1)));
        assert!(!slot.is_current(&seen));
        assert_eq!(slot.handle(), Some(NodeHandle::new(1)));
    }
}
