//! Animated node descriptors and their per-kind update rules.
//!
//! # Invariants
//! - `NodeKind::apply` depends only on scene time and the node's own prior
//!   transform.
//! - Rules are absolute in `t`: evaluating at `t2` never depends on having
//!   evaluated at any earlier `t1`.

use crate::model::particle::ParticleCloud;
use crate::model::transform::{Transform, Vec3};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identity of one mounted node. Never reused after unmount.
pub type NodeId = Uuid;

const CUBE_SPIN_X: f64 = 0.3;
const CUBE_SPIN_Y: f64 = 0.5;
const CUBE_BOB_AMPLITUDE: f64 = 0.3;
const RING_SPIN_X: f64 = 0.5;
const RING_SPIN_Y: f64 = 0.3;
const CLOUD_SPIN_X: f64 = 0.03;
const CLOUD_SPIN_Y: f64 = 0.05;

/// Material colors for a floating cube, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CubePalette {
    pub color: &'static str,
    pub emissive: &'static str,
}

impl CubePalette {
    pub const VIOLET: Self = Self {
        color: "#a855f7",
        emissive: "#7c3aed",
    };
    pub const CYAN: Self = Self {
        color: "#06b6d4",
        emissive: "#0891b2",
    };
}

impl Default for CubePalette {
    fn default() -> Self {
        Self::VIOLET
    }
}

/// Kind tag used in logs and render adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindTag {
    Cube,
    Ring,
    ParticleCloud,
}

impl NodeKindTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Ring => "ring",
            Self::ParticleCloud => "particle_cloud",
        }
    }
}

impl Display for NodeKindTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind data. Each variant owns exactly what its rule reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Spinning rounded cube that bobs around its mount height.
    Cube {
        base_position_y: f64,
        palette: CubePalette,
    },
    /// Holographic torus spinning on two axes.
    Ring,
    /// Point cloud; only the cloud as a whole rotates.
    ParticleCloud { cloud: ParticleCloud },
}

impl NodeKind {
    pub fn tag(&self) -> NodeKindTag {
        match self {
            Self::Cube { .. } => NodeKindTag::Cube,
            Self::Ring => NodeKindTag::Ring,
            Self::ParticleCloud { .. } => NodeKindTag::ParticleCloud,
        }
    }

    /// Computes the transform at scene time `t` seconds.
    ///
    /// Fields a rule does not drive are carried over from `prior`.
    ///
    /// # Errors
    /// - `t` is not finite.
    /// - The rule produced a non-finite transform.
    pub fn apply(&self, t: f64, prior: &Transform) -> Result<Transform, UpdateRuleError> {
        if !t.is_finite() {
            return Err(UpdateRuleError::NonFiniteTime(t));
        }

        let mut next = *prior;
        match self {
            Self::Cube {
                base_position_y, ..
            } => {
                next.rotation.x = CUBE_SPIN_X * t;
                next.rotation.y = CUBE_SPIN_Y * t;
                next.position.y = base_position_y + t.sin() * CUBE_BOB_AMPLITUDE;
            }
            Self::Ring => {
                next.rotation.x = RING_SPIN_X * t;
                next.rotation.y = RING_SPIN_Y * t;
            }
            Self::ParticleCloud { .. } => {
                next.rotation.y = CLOUD_SPIN_Y * t;
                next.rotation.x = CLOUD_SPIN_X * t;
            }
        }

        if !next.is_finite() {
            return Err(UpdateRuleError::NonFiniteTransform);
        }
        Ok(next)
    }
}

/// One animated entity as supplied by page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimatedNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Seed for procedural content owned by the node.
    pub phase_seed: u64,
}

impl AnimatedNode {
    pub fn new(kind: NodeKind, transform: Transform, phase_seed: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            transform,
            phase_seed,
        }
    }

    /// Cube mounted at `position`; the bob oscillates around `position.y`.
    pub fn cube(position: Vec3, palette: CubePalette) -> Self {
        Self::new(
            NodeKind::Cube {
                base_position_y: position.y,
                palette,
            },
            Transform::at(position),
            0,
        )
    }

    pub fn ring(position: Vec3) -> Self {
        Self::new(NodeKind::Ring, Transform::at(position), 0)
    }

    /// Cloud centered at the origin.
    pub fn particle_cloud(cloud: ParticleCloud, phase_seed: u64) -> Self {
        Self::new(
            NodeKind::ParticleCloud { cloud },
            Transform::default(),
            phase_seed,
        )
    }

    pub fn tag(&self) -> NodeKindTag {
        self.kind.tag()
    }
}

/// Why an update rule could not produce a usable transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateRuleError {
    NonFiniteTime(f64),
    NonFiniteTransform,
}

impl Display for UpdateRuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteTime(t) => write!(f, "scene time is not finite: {t}"),
            Self::NonFiniteTransform => write!(f, "update rule produced a non-finite transform"),
        }
    }
}

impl Error for UpdateRuleError {}
