use portfolio_core::{
    AuthGate, AuthState, MemorySessionStore, RouteGuardDecision, SessionContext, SessionStore,
    SubmitError, SESSION_KEY,
};

const CHECK_DELAY: f64 = 1.0;

fn gate_with(store: MemorySessionStore) -> AuthGate {
    AuthGate::new(SessionContext::load(Box::new(store)), CHECK_DELAY)
}

fn fresh_gate() -> AuthGate {
    gate_with(MemorySessionStore::new())
}

fn submit_and_settle(gate: &mut AuthGate, name: &str) -> Result<(), SubmitError> {
    gate.submit(name, 0.0).expect("no check outstanding");
    gate.poll(CHECK_DELAY).expect("check is due").result
}

#[test]
fn accepted_name_variants_authenticate() {
    for name in ["Yogesh", "  yogesh ", "YOGESH"] {
        let mut gate = fresh_gate();
        submit_and_settle(&mut gate, name).expect("name should be accepted");
        assert_eq!(gate.state(), AuthState::Authenticated, "{name:?}");
        assert_eq!(
            gate.session().stored_value().unwrap().as_deref(),
            Some("true")
        );
    }
}

#[test]
fn wrong_name_leaves_state_and_storage_unchanged() {
    let mut gate = fresh_gate();
    let err = submit_and_settle(&mut gate, "bob").expect_err("bob must be rejected");
    assert!(matches!(err, SubmitError::CredentialMismatch));
    assert_eq!(gate.state(), AuthState::Unauthenticated);
    assert_eq!(gate.session().stored_value().unwrap(), None);
}

#[test]
fn logout_then_protected_navigation_redirects() {
    let mut gate = fresh_gate();
    submit_and_settle(&mut gate, "yogesh").unwrap();
    assert_eq!(
        gate.resolve_navigation("/projects"),
        RouteGuardDecision::Allow
    );

    gate.logout().unwrap();
    assert_eq!(gate.state(), AuthState::Unauthenticated);
    assert!(!gate.session().is_authenticated());
    assert_eq!(gate.session().stored_value().unwrap(), None);
    assert_eq!(
        gate.resolve_navigation("/projects"),
        RouteGuardDecision::RedirectToLogin
    );
}

#[test]
fn login_path_is_always_allowed() {
    let mut gate = fresh_gate();
    assert_eq!(gate.resolve_navigation("/login"), RouteGuardDecision::Allow);

    submit_and_settle(&mut gate, "yogesh").unwrap();
    assert_eq!(gate.resolve_navigation("/login"), RouteGuardDecision::Allow);
}

#[test]
fn every_protected_path_redirects_while_unauthenticated() {
    let gate = fresh_gate();
    for path in ["/", "/about", "/projects", "/freelancer"] {
        assert_eq!(
            gate.resolve_navigation(path),
            RouteGuardDecision::RedirectToLogin,
            "{path}"
        );
    }
    assert_eq!(gate.resolve_navigation("/missing"), RouteGuardDecision::Allow);
}

#[test]
fn existing_storage_flag_restores_authenticated_state() {
    let mut store = MemorySessionStore::new();
    store.set(SESSION_KEY, "true").unwrap();
    let gate = gate_with(store);
    assert_eq!(gate.state(), AuthState::Authenticated);
    assert_eq!(gate.resolve_navigation("/about"), RouteGuardDecision::Allow);

    let mut store = MemorySessionStore::new();
    store.set(SESSION_KEY, "yes").unwrap();
    assert_eq!(gate_with(store).state(), AuthState::Unauthenticated);
}

#[test]
fn mismatch_while_authenticated_keeps_session() {
    let mut gate = fresh_gate();
    submit_and_settle(&mut gate, "yogesh").unwrap();
    let err = submit_and_settle(&mut gate, "mallory").expect_err("mismatch");
    assert!(matches!(err, SubmitError::CredentialMismatch));
    assert_eq!(gate.state(), AuthState::Authenticated);
}

#[test]
fn submit_is_accepted_again_after_previous_check_completes() {
    let mut gate = fresh_gate();
    gate.submit("bob", 0.0).unwrap();
    assert!(matches!(
        gate.submit("yogesh", 0.5),
        Err(SubmitError::CheckPending)
    ));
    gate.poll(1.0).unwrap();

    gate.submit("yogesh", 2.0).expect("new check after completion");
    assert!(gate.poll(2.5).is_none());
    assert!(gate.poll(3.0).unwrap().is_success());
}
