//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`Scene`](crate::scene::Scene)
    ///
    /// Handles are generational: once a node is despawned its id never resolves again,
    /// even if the slot is reused.
    pub struct NodeId;
}

/// Handle-based map keyed by [`NodeId`]
pub type NodeMap<T> = SlotMap<NodeId, T>;
