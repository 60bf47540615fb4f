//! Scene data model shared by the registry, scheduler and page presets.
//!
//! # Responsibility
//! - Define owned transforms, animated node descriptors and particle buffers.
//! - Keep every per-kind update rule a pure function of scene time and the
//!   node's own prior transform.
//!
//! # Invariants
//! - Nodes never reference each other; update order cannot change results.
//! - A particle cloud's buffer length always equals its declared count.

pub mod node;
pub mod particle;
pub mod transform;
