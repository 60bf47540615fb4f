//! Use-case orchestration over the gate, transitions and scene.
//!
//! # Responsibility
//! - Give the page layer one entry point per user action and per frame.
//! - Keep page content decoupled from scheduler internals.

pub mod shell;
