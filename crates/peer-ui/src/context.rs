//! Per-root shared state.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use peer_core::{NodeHandle, PeerConfig, SharedNative};

use crate::custom_property::CustomPropertyStore;

/// Everything components created under one root share: the native module,
/// the custom-property store and the configuration.
#[derive(Clone)]
pub struct RootContext {
    native: SharedNative,
    properties: Rc<RefCell<CustomPropertyStore>>,
    config: PeerConfig,
}

impl RootContext {
    pub fn new(native: SharedNative) -> Self {
        Self::with_config(native, PeerConfig::default())
    }

    pub fn with_config(native: SharedNative, config: PeerConfig) -> Self {
        Self {
            native,
            properties: Rc::new(RefCell::new(CustomPropertyStore::new())),
            config,
        }
    }

    pub fn native(&self) -> &SharedNative {
        &self.native
    }

    pub fn properties(&self) -> &Rc<RefCell<CustomPropertyStore>> {
        &self.properties
    }

    pub fn config(&self) -> &PeerConfig {
        &self.config
    }

    /// The platform destroyed `node`; drop everything stored for it.
    pub fn node_destroyed(&self, node: NodeHandle) {
        debug!("node {node} destroyed");
        self.properties.borrow_mut().remove_all_properties(node.raw());
    }
}

impl std::fmt::Debug for RootContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
