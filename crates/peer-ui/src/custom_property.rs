//! Custom-property side table keyed by native node id.

use log::trace;
use peer_core::collections::map::HashMap;
use peer_core::AttrValue;

/// String-keyed values attached to native nodes by the application.
///
/// The store is owned by the root context. Entries for a node live until
/// they are removed or the node is reported destroyed.
#[derive(Debug, Default)]
pub struct CustomPropertyStore {
    nodes: HashMap<u64, HashMap<String, AttrValue>>,
}

impl CustomPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_valid_property(&mut self, node_id: u64, key: impl Into<String>, value: AttrValue) {
        let key = key.into();
        trace!("custom property {key} on node {node_id:#x}");
        self.nodes.entry(node_id).or_default().insert(key, value);
    }

    /// Removes one property. Returns whether the node still has entries.
    pub fn remove_property(&mut self, node_id: u64, key: &str) -> bool {
        let Some(properties) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        properties.remove(key);
        if properties.is_empty() {
            self.nodes.remove(&node_id);
            return false;
        }
        true
    }

    pub fn remove_all_properties(&mut self, node_id: u64) {
        self.nodes.remove(&node_id);
    }

    pub fn get_property(&self, node_id: u64, key: &str) -> Option<&AttrValue> {
        self.nodes.get(&node_id)?.get(key)
    }

    pub fn property_count(&self, node_id: u64) -> usize {
        self.nodes.get(&node_id).map_or(0, |properties| properties.len())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
