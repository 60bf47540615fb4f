//! Core runtime for the portfolio site: animated backdrop scheduling,
//! the name-based login gate and page transitions.
//! Page content, styling and rendering live outside this crate.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod nav;
pub mod scene;
pub mod service;

pub use auth::gate::{
    AuthGate, AuthState, CheckTicket, RouteGuardDecision, SubmitError, SubmitOutcome,
};
pub use auth::session::{SessionContext, AUTHENTICATED_VALUE, SESSION_KEY};
pub use auth::store::{
    MemorySessionStore, SessionStore, SqliteSessionStore, StoreError, StoreResult,
};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::node::{AnimatedNode, CubePalette, NodeId, NodeKind, NodeKindTag, UpdateRuleError};
pub use model::particle::ParticleCloud;
pub use model::transform::{Transform, Vec3};
pub use nav::menu::{nav_items, NavItem};
pub use nav::route::Route;
pub use nav::transition::{
    PageFrame, PageTransitionController, TransitionEvent, TransitionPhase, TransitionTimings,
};
pub use scene::clock::SceneClock;
pub use scene::preset::{CameraRig, NodeSpec, ScenePreset};
pub use scene::registry::{AnimatedNodeRegistry, CommittedNode, OwnerId};
pub use scene::scheduler::{AnimationScheduler, NodeUpdateFault, TickReport};
pub use service::shell::{FrameReport, Notice, PortfolioShell};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
