//! Name-based login gate and the session flag it guards.
//!
//! # Responsibility
//! - Own the only mutation path of the authenticated flag.
//! - Resolve every navigation to allow or redirect.
//!
//! # Invariants
//! - The flag is written only by a successful credential check or logout.

pub mod credential;
pub mod gate;
pub mod session;
pub mod store;
