//! Procedural particle field generation.
//!
//! Every particle samples each axis independently and uniformly from
//! `[-25, 25]`. Nothing is cached between calls.

use crate::model::particle::{ParticleCloud, PARTICLE_FIELD_HALF_EXTENT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates `count` particles from the thread-local RNG.
///
/// `count == 0` yields an empty cloud.
pub fn generate(count: usize) -> ParticleCloud {
    generate_with(count, &mut rand::thread_rng())
}

/// Generates a reproducible cloud from `seed`.
pub fn generate_seeded(count: usize, seed: u64) -> ParticleCloud {
    generate_with(count, &mut StdRng::seed_from_u64(seed))
}

/// Generates `count` particles drawing from `rng`.
pub fn generate_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> ParticleCloud {
    let extent = PARTICLE_FIELD_HALF_EXTENT;
    let positions = (0..count)
        .map(|_| {
            [
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            ]
        })
        .collect();
    ParticleCloud::from_positions(positions)
}

/// Replaces `cloud` with a fresh buffer of `count` particles.
///
/// The old buffer is discarded even when `count` is unchanged; there is no
/// incremental resize.
pub fn regenerate(cloud: &mut ParticleCloud, count: usize, seed: u64) {
    *cloud = generate_seeded(count, seed);
}

#[cfg(test)]
mod tests {
    use super::{generate, generate_seeded, regenerate};

    #[test]
    fn zero_count_is_empty_not_error() {
        let cloud = generate(0);
        assert!(cloud.is_empty());
        assert_eq!(cloud.count(), 0);
    }

    #[test]
    fn same_seed_reproduces_same_buffer() {
        assert_eq!(generate_seeded(64, 7), generate_seeded(64, 7));
        assert_ne!(generate_seeded(64, 7), generate_seeded(64, 8));
    }

    #[test]
    fn regenerate_replaces_whole_buffer() {
        let mut cloud = generate_seeded(10, 1);
        let before = cloud.positions()[0];
        regenerate(&mut cloud, 25, 2);
        assert_eq!(cloud.count(), 25);
        assert_eq!(cloud.positions().len(), 25);
        assert_ne!(cloud.positions()[0], before);
    }
}
