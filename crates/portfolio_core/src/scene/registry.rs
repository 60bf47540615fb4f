//! Mounted animated nodes, keyed by id and kept in registration order.
//!
//! # Invariants
//! - A node id appears at most once.
//! - Every node records the mount that owns it; unmounting an owner removes
//!   exactly its nodes.
//! - Transforms are owned here; render adapters read committed values and
//!   never hold references into the registry.

use crate::model::node::{AnimatedNode, NodeId, NodeKindTag};
use crate::model::transform::Transform;
use log::debug;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Identity of one page mount that owns nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "mount-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: AnimatedNode,
    owner: OwnerId,
}

/// Committed state of one node, as read by a render adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedNode {
    pub id: NodeId,
    pub kind: NodeKindTag,
    pub transform: Transform,
}

#[derive(Debug, Default)]
pub struct AnimatedNodeRegistry {
    slots: BTreeMap<u64, Slot>,
    index: BTreeMap<NodeId, u64>,
    next_seq: u64,
}

impl AnimatedNodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` under `owner`.
    ///
    /// Returns `false` and leaves the registry untouched when the id is
    /// already present.
    pub fn insert(&mut self, node: AnimatedNode, owner: OwnerId) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            "event=node_register module=scene status=ok node_id={} kind={} owner={owner}",
            node.id,
            node.tag()
        );
        self.index.insert(node.id, seq);
        self.slots.insert(seq, Slot { node, owner });
        true
    }

    /// Removes one node. Unknown ids are ignored.
    pub fn remove(&mut self, id: NodeId) -> Option<AnimatedNode> {
        let seq = self.index.remove(&id)?;
        let slot = self.slots.remove(&seq)?;
        debug!(
            "event=node_unregister module=scene status=ok node_id={id} kind={} owner={}",
            slot.node.tag(),
            slot.owner
        );
        Some(slot.node)
    }

    /// Removes every node mounted by `owner` and returns how many were removed.
    pub fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let owned: Vec<NodeId> = self
            .slots
            .values()
            .filter(|slot| slot.owner == owner)
            .map(|slot| slot.node.id)
            .collect();
        owned
            .into_iter()
            .filter(|id| self.remove(*id).is_some())
            .count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&AnimatedNode> {
        let seq = self.index.get(&id)?;
        self.slots.get(seq).map(|slot| &slot.node)
    }

    pub fn owner_of(&self, id: NodeId) -> Option<OwnerId> {
        let seq = self.index.get(&id)?;
        self.slots.get(seq).map(|slot| slot.owner)
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.get(id).map(|node| node.transform)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.slots.values().map(|slot| slot.node.id).collect()
    }

    /// Committed transforms in registration order.
    pub fn committed(&self) -> Vec<CommittedNode> {
        self.slots
            .values()
            .map(|slot| CommittedNode {
                id: slot.node.id,
                kind: slot.node.tag(),
                transform: slot.node.transform,
            })
            .collect()
    }

    pub(crate) fn commit(&mut self, id: NodeId, transform: Transform) -> bool {
        let Some(seq) = self.index.get(&id) else {
            return false;
        };
        match self.slots.get_mut(seq) {
            Some(slot) => {
                slot.node.transform = transform;
                true
            }
            None => false,
        }
    }
}
