//! Immutable point buffer rendered as one particle cloud.

use serde::{Deserialize, Serialize};

/// Edge length of the cube particles are scattered in, centered at origin.
pub const PARTICLE_FIELD_SIDE: f32 = 50.0;
/// Largest absolute coordinate a particle can take.
pub const PARTICLE_FIELD_HALF_EXTENT: f32 = PARTICLE_FIELD_SIDE / 2.0;

/// Fixed set of particle positions.
///
/// Positions are written once on creation; the cloud only ever rotates as a
/// whole. A different count means a brand-new buffer, see
/// [`crate::scene::particle_field::regenerate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleCloud {
    positions: Vec<[f32; 3]>,
}

impl ParticleCloud {
    pub(crate) fn from_positions(positions: Vec<[f32; 3]>) -> Self {
        Self { positions }
    }

    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Flat `x, y, z, x, y, z, ...` view for vertex buffer upload.
    pub fn flat_positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.positions.iter().flat_map(|point| point.iter().copied())
    }
}
