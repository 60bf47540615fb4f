//! Scene-local clock.
//!
//! Elapsed time starts at zero when the scene mounts, never decreases, and
//! only resets on a full remount.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneClock {
    started_at: Option<f64>,
    last_elapsed: f64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the clock at host time `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
        self.last_elapsed = 0.0;
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.last_elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since `start`, clamped so a host clock that steps backwards
    /// never rewinds the scene. Returns `0.0` while stopped.
    pub fn elapsed(&mut self, now: f64) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let elapsed = now - started_at;
        if elapsed.is_finite() && elapsed > self.last_elapsed {
            self.last_elapsed = elapsed;
        }
        self.last_elapsed
    }
}
