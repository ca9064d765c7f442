//! Child list and derived indices of a container node
//!
//! A container keeps its children in insertion order plus two indices derived from
//! each child's capabilities: the update list and the layer buckets. The indices
//! are only mutated together with the child list, through the scene's add/remove
//! operations, so they cannot drift out of sync with membership.

use std::collections::HashMap;

use super::node::Capabilities;
use crate::foundation::collections::NodeId;

/// Children of a scene node, with update and render-layer indices
#[derive(Debug, Default, Clone)]
pub struct Container {
    entities: Vec<NodeId>,
    updatables: Vec<NodeId>,
    layers: HashMap<i32, Vec<NodeId>>,
    /// Ascending once `layers_dirty` is cleared
    layer_order: Vec<i32>,
    layers_dirty: bool,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Children in insertion order
    pub fn entities(&self) -> &[NodeId] {
        &self.entities
    }

    /// Children that receive updates, in insertion order
    pub fn updatables(&self) -> &[NodeId] {
        &self.updatables
    }

    /// Render-capable children on a layer, in insertion order
    pub fn layer(&self, layer: i32) -> &[NodeId] {
        self.layers.get(&layer).map_or(&[], Vec::as_slice)
    }

    /// Layer keys currently in use, in no particular order until sorted
    pub fn layer_keys(&self) -> &[i32] {
        &self.layer_order
    }

    /// Whether the layer key set needs sorting before the next render
    pub fn layers_dirty(&self) -> bool {
        self.layers_dirty
    }

    /// Every render-capable child, grouped by layer
    pub fn renderables(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.layer_order.iter().flat_map(|layer| self.layer(*layer).iter().copied())
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether there are no children
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `id` is a child
    pub fn contains(&self, id: NodeId) -> bool {
        self.entities.contains(&id)
    }

    /// Sort the layer keys if needed and return them ascending
    pub(crate) fn sorted_layers(&mut self) -> &[i32] {
        if self.layers_dirty {
            self.layer_order.sort_unstable();
            self.layers_dirty = false;
        }
        &self.layer_order
    }

    pub(crate) fn insert(&mut self, id: NodeId, capabilities: Capabilities, layer: i32) {
        self.entities.push(id);
        if capabilities.contains(Capabilities::UPDATE) {
            self.updatables.push(id);
        }
        if capabilities.contains(Capabilities::RENDER) {
            self.insert_into_layer(id, layer);
        }
    }

    /// Remove `id` from the child list and both indices; returns whether it was a child
    pub(crate) fn remove(&mut self, id: NodeId, layer: i32) -> bool {
        let Some(index) = self.entities.iter().position(|e| *e == id) else {
            return false;
        };
        self.entities.remove(index);
        self.updatables.retain(|e| *e != id);
        if !self.remove_from_layer(id, layer) {
            // Layer changed without a notification reaching us; fall back to a full scan.
            let stale: Vec<i32> = self
                .layers
                .iter()
                .filter(|(_, members)| members.contains(&id))
                .map(|(key, _)| *key)
                .collect();
            for key in stale {
                self.remove_from_layer(id, key);
            }
        }
        true
    }

    /// Move a render-capable child between layer buckets
    pub(crate) fn relayer(&mut self, id: NodeId, old: i32, new: i32) {
        if old == new {
            return;
        }
        if self.remove_from_layer(id, old) {
            self.insert_into_layer(id, new);
        }
    }

    fn insert_into_layer(&mut self, id: NodeId, layer: i32) {
        let members = self.layers.entry(layer).or_default();
        if members.is_empty() {
            self.layer_order.push(layer);
            self.layers_dirty = true;
        }
        members.push(id);
    }

    fn remove_from_layer(&mut self, id: NodeId, layer: i32) -> bool {
        let Some(members) = self.layers.get_mut(&layer) else {
            return false;
        };
        let Some(index) = members.iter().position(|e| *e == id) else {
            return false;
        };
        members.remove(index);
        if members.is_empty() {
            self.layers.remove(&layer);
            self.layer_order.retain(|key| *key != layer);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::NodeMap;

    fn ids(count: usize) -> Vec<NodeId> {
        let mut map = NodeMap::<()>::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_indices_follow_capabilities() {
        let ids = ids(3);
        let mut container = Container::new();

        container.insert(ids[0], Capabilities::UPDATE, 0);
        container.insert(ids[1], Capabilities::RENDER, 4);
        container.insert(ids[2], Capabilities::UPDATE | Capabilities::RENDER, 4);

        assert_eq!(container.entities(), &ids[..]);
        assert_eq!(container.updatables(), &[ids[0], ids[2]]);
        assert_eq!(container.layer(4), &[ids[1], ids[2]]);
        assert_eq!(container.layer(0), &[] as &[NodeId]);
        assert_eq!(container.layer_keys(), &[4]);
    }

    #[test]
    fn test_removing_last_member_drops_layer_key() {
        let ids = ids(2);
        let mut container = Container::new();
        container.insert(ids[0], Capabilities::RENDER, 1);
        container.insert(ids[1], Capabilities::RENDER, 2);

        assert!(container.remove(ids[0], 1));
        assert_eq!(container.layer_keys(), &[2]);
        assert!(!container.remove(ids[0], 1), "second removal is a no-op");
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_layer_keys_sorted_lazily() {
        let ids = ids(3);
        let mut container = Container::new();
        container.insert(ids[0], Capabilities::RENDER, 5);
        container.insert(ids[1], Capabilities::RENDER, 1);
        container.insert(ids[2], Capabilities::RENDER, 3);

        assert!(container.layers_dirty());
        assert_eq!(container.sorted_layers(), &[1, 3, 5]);
        assert!(!container.layers_dirty());
    }

    #[test]
    fn test_relayer_moves_between_buckets() {
        let ids = ids(2);
        let mut container = Container::new();
        container.insert(ids[0], Capabilities::RENDER, 0);
        container.insert(ids[1], Capabilities::RENDER, 0);

        container.relayer(ids[0], 0, 7);
        assert_eq!(container.layer(0), &[ids[1]]);
        assert_eq!(container.layer(7), &[ids[0]]);

        // A stale layer hint still removes the node
        assert!(container.remove(ids[0], 0));
        assert!(container.layer(7).is_empty());
        assert_eq!(container.renderables().collect::<Vec<_>>(), vec![ids[1]]);
    }
}
