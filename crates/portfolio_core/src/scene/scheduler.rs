//! Per-frame driver for every mounted animated node.
//!
//! # Responsibility
//! - Deliver scene time to each registered node once per display refresh.
//! - Commit the resulting transforms back into the registry.
//!
//! # Invariants
//! - The active set is snapshotted at the start of each tick; a node
//!   unregistered before `tick` returns receives no further updates.
//! - A faulting node is dropped and logged; the tick always completes.
//! - Nothing inside a tick blocks.

use crate::model::node::{AnimatedNode, NodeId, NodeKindTag, UpdateRuleError};
use crate::model::transform::Transform;
use crate::scene::registry::{AnimatedNodeRegistry, CommittedNode, OwnerId};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A node whose update rule failed during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUpdateFault {
    pub node_id: NodeId,
    pub kind: NodeKindTag,
    pub elapsed_secs: f64,
    pub reason: UpdateRuleError,
}

impl Display for NodeUpdateFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} node {} failed at t={}: {}",
            self.kind, self.node_id, self.elapsed_secs, self.reason
        )
    }
}

impl Error for NodeUpdateFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.reason)
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    pub updated: usize,
    /// Nodes dropped during this tick.
    pub faults: Vec<NodeUpdateFault>,
}

#[derive(Debug, Default)]
pub struct AnimationScheduler {
    registry: AnimatedNodeRegistry,
    frame: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` to the active set, effective from the next tick.
    ///
    /// Registering an id that is already active is a no-op returning `false`.
    pub fn register(&mut self, node: AnimatedNode, owner: OwnerId) -> bool {
        self.registry.insert(node, owner)
    }

    /// Stops all further updates for `id`. Unknown ids are ignored.
    pub fn unregister(&mut self, id: NodeId) -> bool {
        self.registry.remove(id).is_some()
    }

    /// Unregisters every node owned by `owner`.
    pub fn unregister_owner(&mut self, owner: OwnerId) -> usize {
        self.registry.remove_owner(owner)
    }

    /// Advances every active node to scene time `elapsed_secs`.
    ///
    /// Nodes are visited in registration order. Rules are independent, so
    /// the order only matters for reproducible logs and tests.
    pub fn tick(&mut self, elapsed_secs: f64) -> TickReport {
        self.frame += 1;
        let mut report = TickReport {
            frame: self.frame,
            ..TickReport::default()
        };

        for id in self.registry.ids() {
            let Some(node) = self.registry.get(id) else {
                continue;
            };
            match node.kind.apply(elapsed_secs, &node.transform) {
                Ok(next) => {
                    self.registry.commit(id, next);
                    report.updated += 1;
                }
                Err(reason) => {
                    let fault = NodeUpdateFault {
                        node_id: id,
                        kind: node.tag(),
                        elapsed_secs,
                        reason,
                    };
                    warn!(
                        "event=node_update_fault module=scene status=dropped frame={} node_id={} kind={} error={}",
                        self.frame, id, fault.kind, reason
                    );
                    self.registry.remove(id);
                    report.faults.push(fault);
                }
            }
        }

        report
    }

    /// Number of ticks delivered since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_registered(&self, id: NodeId) -> bool {
        self.registry.contains(id)
    }

    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.registry.transform(id)
    }

    pub fn committed(&self) -> Vec<CommittedNode> {
        self.registry.committed()
    }

    pub fn registry(&self) -> &AnimatedNodeRegistry {
        &self.registry
    }
}
