//! Exit/entry sequencing between allowed pages.
//!
//! # Responsibility
//! - Animate the outgoing page out, then the incoming page in.
//! - Tell the caller when to unmount and mount page content.
//!
//! # Invariants
//! - At most one page is on screen; the incoming page mounts only after the
//!   outgoing page has finished exiting.
//! - A newer navigation supersedes any in-flight one; only the latest
//!   target ever reports `EntryCompleted`.
//! - Timings are fixed constants, never derived from page content.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::nav::route::Route;

/// Fixed animation parameters shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionTimings {
    pub duration_secs: f64,
    /// Vertical offset an entering page starts from.
    pub entry_offset_y: f64,
    /// Vertical offset an exiting page ends at.
    pub exit_offset_y: f64,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            duration_secs: 0.4,
            entry_offset_y: 20.0,
            exit_offset_y: -20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Exiting,
    Entering,
    Settled,
}

/// Lifecycle signals for the page layer, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The outgoing page finished its exit and must unmount now.
    ExitCompleted { route: Route },
    /// The incoming page must mount now; its entry animation has begun.
    EntryStarted { route: Route, generation: u64 },
    /// The latest navigation's entry animation finished.
    EntryCompleted { route: Route, generation: u64 },
}

/// Visual state of the page on screen at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    pub route: Route,
    pub phase: TransitionPhase,
    pub opacity: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    Exiting {
        from: Route,
        to: Route,
        started_at: f64,
        start_opacity: f64,
        start_offset_y: f64,
    },
    Entering {
        route: Route,
        started_at: f64,
    },
    Settled {
        route: Route,
    },
}

#[derive(Debug, Clone)]
pub struct PageTransitionController {
    timings: TransitionTimings,
    state: State,
    generation: u64,
}

impl PageTransitionController {
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            state: State::Idle,
            generation: 0,
        }
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Generation of the latest navigation. Older generations never complete.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Page currently mounted, whether exiting, entering or settled.
    pub fn mounted_route(&self) -> Option<&Route> {
        match &self.state {
            State::Idle => None,
            State::Exiting { from, .. } => Some(from),
            State::Entering { route, .. } | State::Settled { route } => Some(route),
        }
    }

    /// Route the controller is heading to.
    pub fn target_route(&self) -> Option<&Route> {
        match &self.state {
            State::Idle => None,
            State::Exiting { to, .. } => Some(to),
            State::Entering { route, .. } | State::Settled { route } => Some(route),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, State::Idle | State::Settled { .. })
    }

    /// Starts a transition to `route` at host time `now`.
    ///
    /// Any in-flight transition is superseded: its pending completion is
    /// dropped. Returns the events that happen immediately, which is only
    /// `EntryStarted` when nothing is mounted yet.
    pub fn begin(&mut self, route: Route, now: f64) -> Vec<TransitionEvent> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        let mut events = Vec::new();

        self.state = match state {
            State::Idle => {
                self.generation += 1;
                events.push(TransitionEvent::EntryStarted {
                    route: route.clone(),
                    generation: self.generation,
                });
                State::Entering {
                    route,
                    started_at: now,
                }
            }
            State::Settled { route: shown } if shown == route => State::Settled { route: shown },
            State::Settled { route: shown } => {
                self.generation += 1;
                State::Exiting {
                    from: shown,
                    to: route,
                    started_at: now,
                    start_opacity: 1.0,
                    start_offset_y: 0.0,
                }
            }
            State::Entering {
                route: entering,
                started_at,
            } if entering == route => State::Entering {
                route: entering,
                started_at,
            },
            State::Entering {
                route: entering,
                started_at,
            } => {
                self.generation += 1;
                info!(
                    "event=transition_cancel module=nav status=ok superseded={entering} target={route} generation={}",
                    self.generation
                );
                let (opacity, offset_y) = self.entry_values(now - started_at);
                State::Exiting {
                    from: entering,
                    to: route,
                    started_at: now,
                    start_opacity: opacity,
                    start_offset_y: offset_y,
                }
            }
            State::Exiting {
                from,
                to,
                started_at,
                start_opacity,
                start_offset_y,
            } => {
                if to != route {
                    self.generation += 1;
                    info!(
                        "event=transition_cancel module=nav status=ok superseded={to} target={route} generation={}",
                        self.generation
                    );
                }
                State::Exiting {
                    from,
                    to: route,
                    started_at,
                    start_opacity,
                    start_offset_y,
                }
            }
        };

        debug!(
            "event=transition_begin module=nav status=ok target={} generation={}",
            self.target_route().map(Route::path).unwrap_or("-"),
            self.generation
        );
        events
    }

    /// Advances to host time `now`, returning every lifecycle event that
    /// became due, in order.
    pub fn advance(&mut self, now: f64) -> Vec<TransitionEvent> {
        let duration = self.timings.duration_secs;
        let mut events = Vec::new();

        loop {
            let state = std::mem::replace(&mut self.state, State::Idle);
            self.state = match state {
                State::Exiting {
                    from,
                    to,
                    started_at,
                    ..
                } if now - started_at >= duration => {
                    events.push(TransitionEvent::ExitCompleted { route: from });
                    events.push(TransitionEvent::EntryStarted {
                        route: to.clone(),
                        generation: self.generation,
                    });
                    State::Entering {
                        route: to,
                        started_at: started_at + duration,
                    }
                }
                State::Entering { route, started_at } if now - started_at >= duration => {
                    info!(
                        "event=transition_complete module=nav status=ok route={route} generation={}",
                        self.generation
                    );
                    events.push(TransitionEvent::EntryCompleted {
                        route: route.clone(),
                        generation: self.generation,
                    });
                    State::Settled { route }
                }
                other => {
                    self.state = other;
                    break;
                }
            };
        }

        events
    }

    /// Opacity and offset of the mounted page at host time `now`.
    pub fn frame(&self, now: f64) -> Option<PageFrame> {
        match &self.state {
            State::Idle => None,
            State::Exiting {
                from,
                started_at,
                start_opacity,
                start_offset_y,
                ..
            } => {
                let progress = self.progress(now - started_at);
                Some(PageFrame {
                    route: from.clone(),
                    phase: TransitionPhase::Exiting,
                    opacity: lerp(*start_opacity, 0.0, progress),
                    offset_y: lerp(*start_offset_y, self.timings.exit_offset_y, progress),
                })
            }
            State::Entering { route, started_at } => {
                let (opacity, offset_y) = self.entry_values(now - started_at);
                Some(PageFrame {
                    route: route.clone(),
                    phase: TransitionPhase::Entering,
                    opacity,
                    offset_y,
                })
            }
            State::Settled { route } => Some(PageFrame {
                route: route.clone(),
                phase: TransitionPhase::Settled,
                opacity: 1.0,
                offset_y: 0.0,
            }),
        }
    }

    fn entry_values(&self, elapsed: f64) -> (f64, f64) {
        let progress = self.progress(elapsed);
        (
            progress,
            lerp(self.timings.entry_offset_y, 0.0, progress),
        )
    }

    fn progress(&self, elapsed: f64) -> f64 {
        let duration = self.timings.duration_secs;
        if duration <= 0.0 {
            return 1.0;
        }
        ease_out_cubic((elapsed / duration).clamp(0.0, 1.0))
    }
}

impl Default for PageTransitionController {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}

fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(3)
}

fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}
