//! Login state machine and navigation guard.
//!
//! # Responsibility
//! - Run the delayed credential check and flip the session flag on success.
//! - Decide, for every navigation, whether the page may render.
//!
//! # Invariants
//! - At most one credential check is outstanding; a second submit is
//!   rejected instead of queued.
//! - Protected routes resolve to `RedirectToLogin` while unauthenticated,
//!   before any of their scene nodes can mount.
//! - `/login` and unknown paths are always allowed.
//! - The submitted name is never stored or logged.

use crate::auth::credential::is_accepted_name;
use crate::auth::session::SessionContext;
use crate::auth::store::StoreError;
use crate::nav::route::Route;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Per-navigation verdict. Computed fresh every time, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuardDecision {
    Allow,
    RedirectToLogin,
}

/// Handle for one credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckTicket(u64);

#[derive(Debug)]
pub enum SubmitError {
    /// The name did not match; the session is unchanged.
    CredentialMismatch,
    /// Another check is still running.
    CheckPending,
    /// The flag could not be persisted; the session is unchanged.
    Storage(StoreError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CredentialMismatch => write!(f, "submitted name does not match"),
            Self::CheckPending => write!(f, "a credential check is already in progress"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::CredentialMismatch | Self::CheckPending => None,
        }
    }
}

impl From<StoreError> for SubmitError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Result delivered once a check's delay has elapsed.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub ticket: CheckTicket,
    pub result: Result<(), SubmitError>,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingCheck {
    ticket: CheckTicket,
    accepted: bool,
    due_at: f64,
}

pub struct AuthGate {
    session: SessionContext,
    check_delay_secs: f64,
    pending: Option<PendingCheck>,
    next_ticket: u64,
}

impl AuthGate {
    pub fn new(session: SessionContext, check_delay_secs: f64) -> Self {
        Self {
            session,
            check_delay_secs,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> AuthState {
        if self.session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Read-only view of the session flag.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn is_checking(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a credential check for `name` at host time `now`.
    ///
    /// The verdict is computed now but only applied by [`AuthGate::poll`]
    /// once the check delay has elapsed.
    ///
    /// # Errors
    /// - `CheckPending` while an earlier check has not completed.
    pub fn submit(&mut self, name: &str, now: f64) -> Result<CheckTicket, SubmitError> {
        if let Some(pending) = self.pending {
            warn!(
                "event=credential_check module=auth status=rejected reason=check_pending ticket={}",
                pending.ticket.0
            );
            return Err(SubmitError::CheckPending);
        }

        let ticket = CheckTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(PendingCheck {
            ticket,
            accepted: is_accepted_name(name),
            due_at: now + self.check_delay_secs,
        });
        info!(
            "event=credential_check module=auth status=start ticket={} name_len={}",
            ticket.0,
            name.chars().count()
        );
        Ok(ticket)
    }

    /// Completes the outstanding check if it is due at `now`.
    pub fn poll(&mut self, now: f64) -> Option<SubmitOutcome> {
        let pending = self.pending?;
        if now < pending.due_at {
            return None;
        }
        self.pending = None;

        let result = if pending.accepted {
            self.session.mark_authenticated().map_err(SubmitError::from)
        } else {
            Err(SubmitError::CredentialMismatch)
        };

        match &result {
            Ok(()) => info!(
                "event=credential_check module=auth status=ok ticket={}",
                pending.ticket.0
            ),
            Err(err) => info!(
                "event=credential_check module=auth status=rejected ticket={} reason={err}",
                pending.ticket.0
            ),
        }

        Some(SubmitOutcome {
            ticket: pending.ticket,
            result,
        })
    }

    /// Clears the session immediately and drops any outstanding check.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(pending) = self.pending.take() {
            debug!(
                "event=credential_check module=auth status=cancelled ticket={}",
                pending.ticket.0
            );
        }
        let result = self.session.clear();
        info!(
            "event=logout module=auth status={}",
            if result.is_ok() { "ok" } else { "error" }
        );
        result
    }

    /// Guard verdict for navigating to `path`.
    pub fn resolve_navigation(&self, path: &str) -> RouteGuardDecision {
        self.resolve_route(&Route::parse(path))
    }

    pub fn resolve_route(&self, route: &Route) -> RouteGuardDecision {
        if route.is_protected() && !self.session.is_authenticated() {
            info!(
                "event=route_guard module=auth status=redirect reason=unauthorized_navigation requested={route}"
            );
            return RouteGuardDecision::RedirectToLogin;
        }
        debug!("event=route_guard module=auth status=allow requested={route}");
        RouteGuardDecision::Allow
    }
}
