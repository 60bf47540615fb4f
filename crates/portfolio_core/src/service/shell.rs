//! Frame-driven orchestration of gate, transitions and scene.
//!
//! # Responsibility
//! - Route every navigation through the gate before any transition starts.
//! - Mount and unmount page scenes exactly when transitions say so.
//! - Pump credential checks, transitions and the scheduler once per frame.
//!
//! # Invariants
//! - Guard resolution happens before the transition starts, and the
//!   transition starts before the new page's nodes register.
//! - Unmounting a page unregisters every node it owns before anything else
//!   mounts.
//! - The scene clock restarts on every mount and nowhere else.

use std::collections::VecDeque;

use log::{info, warn};

use crate::auth::gate::{
    AuthGate, AuthState, CheckTicket, RouteGuardDecision, SubmitError, SubmitOutcome,
};
use crate::auth::session::SessionContext;
use crate::auth::store::{SessionStore, StoreError};
use crate::config::{ConfigError, CoreConfig};
use crate::model::node::{AnimatedNode, NodeId};
use crate::model::transform::Vec3;
use crate::nav::menu::{nav_items, NavItem};
use crate::nav::route::{Route, HOME_PATH, LOGIN_PATH};
use crate::nav::transition::{PageFrame, PageTransitionController, TransitionEvent};
use crate::scene::clock::SceneClock;
use crate::scene::preset::ScenePreset;
use crate::scene::registry::{CommittedNode, OwnerId};
use crate::scene::scheduler::{AnimationScheduler, TickReport};

/// User-facing messages for the external toast layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    CredentialMismatch,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome back, Yogesh!",
            Self::CredentialMismatch => "Invalid credentials. Try 'Yogesh'",
        }
    }
}

/// Everything that happened during one [`PortfolioShell::pump`].
#[derive(Debug)]
pub struct FrameReport {
    pub submit: Option<SubmitOutcome>,
    pub transition_events: Vec<TransitionEvent>,
    pub tick: TickReport,
    pub scene_time: f64,
}

#[derive(Debug)]
struct MountedPage {
    route: Route,
    owner: OwnerId,
    preset: Option<ScenePreset>,
}

pub struct PortfolioShell {
    gate: AuthGate,
    transitions: PageTransitionController,
    scheduler: AnimationScheduler,
    clock: SceneClock,
    mounted: Option<MountedPage>,
    next_owner: u64,
    scene_time: f64,
    notices: VecDeque<Notice>,
    queued_events: Vec<TransitionEvent>,
}

impl PortfolioShell {
    /// Builds a shell whose session flag is loaded from `store`.
    ///
    /// # Errors
    /// - `ConfigError` when `config` fails [`CoreConfig::validate`]; the
    ///   store is not read in that case.
    pub fn new(config: &CoreConfig, store: Box<dyn SessionStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = SessionContext::load(store);
        Ok(Self {
            gate: AuthGate::new(session, config.credential_check_delay_secs),
            transitions: PageTransitionController::new(config.transition),
            scheduler: AnimationScheduler::new(),
            clock: SceneClock::new(),
            mounted: None,
            next_owner: 1,
            scene_time: 0.0,
            notices: VecDeque::new(),
            queued_events: Vec::new(),
        })
    }

    /// Guard verdict for `path` without navigating.
    pub fn resolve_navigation(&self, path: &str) -> RouteGuardDecision {
        self.gate.resolve_navigation(path)
    }

    /// Navigates to `path`, or to `/login` when the guard denies it.
    pub fn navigate(&mut self, path: &str, now: f64) -> RouteGuardDecision {
        let requested = Route::parse(path);
        let decision = self.gate.resolve_route(&requested);
        let target = match decision {
            RouteGuardDecision::Allow => requested,
            RouteGuardDecision::RedirectToLogin => Route::Login,
        };
        let events = self.transitions.begin(target, now);
        self.apply_events(&events, now);
        self.queued_events.extend(events);
        decision
    }

    /// Starts the delayed credential check.
    pub fn submit_name(&mut self, name: &str, now: f64) -> Result<CheckTicket, SubmitError> {
        self.gate.submit(name, now)
    }

    /// Clears the session and heads back to the login page.
    pub fn logout(&mut self, now: f64) -> Result<(), StoreError> {
        let result = self.gate.logout();
        self.navigate(LOGIN_PATH, now);
        result
    }

    /// Runs one display refresh at host time `now`.
    pub fn pump(&mut self, now: f64) -> FrameReport {
        let submit = self.gate.poll(now);
        if let Some(outcome) = &submit {
            match &outcome.result {
                Ok(()) => {
                    self.notices.push_back(Notice::Welcome);
                    self.navigate(HOME_PATH, now);
                }
                Err(SubmitError::CredentialMismatch) => {
                    self.notices.push_back(Notice::CredentialMismatch);
                }
                Err(err) => {
                    warn!("event=credential_check module=core status=error error={err}");
                }
            }
        }

        let advanced = self.transitions.advance(now);
        self.apply_events(&advanced, now);
        let mut transition_events = std::mem::take(&mut self.queued_events);
        transition_events.extend(advanced);

        self.scene_time = self.clock.elapsed(now);
        let tick = self.scheduler.tick(self.scene_time);

        FrameReport {
            submit,
            transition_events,
            tick,
            scene_time: self.scene_time,
        }
    }

    /// Registers a page-supplied node under the mounted page.
    ///
    /// Returns `false` when no page is mounted or the id is already active.
    pub fn register_animated_node(&mut self, node: AnimatedNode) -> bool {
        let Some(page) = &self.mounted else {
            warn!(
                "event=node_register module=core status=rejected reason=no_mounted_page node_id={}",
                node.id
            );
            return false;
        };
        self.scheduler.register(node, page.owner)
    }

    /// Unregisters one node. Unknown ids are ignored.
    pub fn unregister_animated_node(&mut self, id: NodeId) -> bool {
        self.scheduler.unregister(id)
    }

    pub fn auth_state(&self) -> AuthState {
        self.gate.state()
    }

    pub fn session(&self) -> &SessionContext {
        self.gate.session()
    }

    pub fn is_checking_credentials(&self) -> bool {
        self.gate.is_checking()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Route of the page currently mounted.
    pub fn current_route(&self) -> Option<&Route> {
        self.mounted.as_ref().map(|page| &page.route)
    }

    pub fn page_frame(&self, now: f64) -> Option<PageFrame> {
        self.transitions.frame(now)
    }

    pub fn committed_nodes(&self) -> Vec<CommittedNode> {
        self.scheduler.committed()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Scene time of the last pump.
    pub fn scene_time(&self) -> f64 {
        self.scene_time
    }

    /// Camera position of the mounted scene at the last pumped scene time.
    pub fn camera_position(&self) -> Option<Vec3> {
        let preset = self.mounted.as_ref()?.preset.as_ref()?;
        Some(preset.camera.position_at(self.scene_time))
    }

    /// Menu entries; empty on pages without the navigation bar.
    pub fn nav_items(&self) -> &'static [NavItem] {
        match self.current_route() {
            Some(route) if route.is_protected() => nav_items(),
            _ => &[],
        }
    }

    pub fn logout_visible(&self) -> bool {
        self.gate.is_authenticated()
    }

    fn apply_events(&mut self, events: &[TransitionEvent], now: f64) {
        for event in events {
            match event {
                TransitionEvent::ExitCompleted { route } => self.unmount(route),
                TransitionEvent::EntryStarted { route, .. } => self.mount(route.clone(), now),
                TransitionEvent::EntryCompleted { .. } => {}
            }
        }
    }

    fn mount(&mut self, route: Route, now: f64) {
        if let Some(previous) = self.mounted.take() {
            self.scheduler.unregister_owner(previous.owner);
        }

        let owner = OwnerId::new(self.next_owner);
        self.next_owner += 1;
        let preset = ScenePreset::for_route(&route);
        let mut registered = 0;
        if let Some(preset) = &preset {
            for node in preset.instantiate() {
                if self.scheduler.register(node, owner) {
                    registered += 1;
                }
            }
        }
        self.clock.start(now);
        self.scene_time = 0.0;
        info!(
            "event=page_mount module=core status=ok route={route} owner={owner} nodes={registered}"
        );
        self.mounted = Some(MountedPage {
            route,
            owner,
            preset,
        });
    }

    fn unmount(&mut self, route: &Route) {
        let Some(page) = self.mounted.take() else {
            return;
        };
        if &page.route != route {
            warn!(
                "event=page_unmount module=core status=mismatch mounted={} exited={route}",
                page.route
            );
        }
        let removed = self.scheduler.unregister_owner(page.owner);
        self.clock.stop();
        self.scene_time = 0.0;
        info!(
            "event=page_unmount module=core status=ok route={} owner={} nodes={removed}",
            page.route, page.owner
        );
    }
}
