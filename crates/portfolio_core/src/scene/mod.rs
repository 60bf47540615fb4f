//! Animated backdrop: node registry, frame scheduler and page presets.
//!
//! # Responsibility
//! - Own every mounted node's transform by id.
//! - Advance all nodes from one scene clock per display refresh.
//!
//! # Invariants
//! - The scheduler is the only writer of committed transforms.
//! - Page code registers and unregisters nodes; it never reaches into the
//!   scheduler's iteration.

pub mod clock;
pub mod particle_field;
pub mod preset;
pub mod registry;
pub mod scheduler;
