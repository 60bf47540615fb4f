//! Route table, menu projection and page transitions.

pub mod menu;
pub mod route;
pub mod transition;
