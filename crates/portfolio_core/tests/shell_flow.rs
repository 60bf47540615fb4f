use portfolio_core::{
    AnimatedNode, AuthState, ConfigError, CoreConfig, MemorySessionStore, NodeKindTag, Notice,
    PortfolioShell, Route, RouteGuardDecision, SessionStore, TransitionEvent, Vec3, SESSION_KEY,
};

const FRAME: f64 = 1.0 / 60.0;

fn shell() -> PortfolioShell {
    PortfolioShell::new(&CoreConfig::default(), Box::new(MemorySessionStore::new()))
        .expect("default config is valid")
}

fn authenticated_shell() -> PortfolioShell {
    let mut store = MemorySessionStore::new();
    store.set(SESSION_KEY, "true").unwrap();
    PortfolioShell::new(&CoreConfig::default(), Box::new(store)).expect("default config is valid")
}

/// Pumps frames from `from` up to and including `to`, returning every
/// transition event seen.
fn pump_until(shell: &mut PortfolioShell, from: f64, to: f64) -> Vec<TransitionEvent> {
    let mut events = Vec::new();
    let mut now = from;
    while now <= to {
        events.extend(shell.pump(now).transition_events);
        now += FRAME;
    }
    events
}

fn kinds(shell: &PortfolioShell) -> Vec<NodeKindTag> {
    shell.committed_nodes().iter().map(|node| node.kind).collect()
}

#[test]
fn protected_route_redirects_to_login_scene() {
    let mut shell = shell();
    let decision = shell.navigate("/projects", 0.0);
    assert_eq!(decision, RouteGuardDecision::RedirectToLogin);
    assert_eq!(shell.current_route(), Some(&Route::Login));
    assert_eq!(
        kinds(&shell),
        vec![
            NodeKindTag::ParticleCloud,
            NodeKindTag::Cube,
            NodeKindTag::Cube,
            NodeKindTag::Ring,
        ]
    );
    assert!(shell.nav_items().is_empty());
    assert!(!shell.logout_visible());
}

#[test]
fn login_flow_reaches_home_and_swaps_scenes() {
    let mut shell = shell();
    shell.navigate("/login", 0.0);
    pump_until(&mut shell, 0.0, 0.5);

    shell.submit_name("  Yogesh ", 0.5).unwrap();
    assert!(shell.is_checking_credentials());
    pump_until(&mut shell, 0.5, 1.4);
    assert_eq!(shell.auth_state(), AuthState::Unauthenticated);

    let events = pump_until(&mut shell, 1.5, 3.0);
    assert_eq!(shell.auth_state(), AuthState::Authenticated);
    assert_eq!(shell.drain_notices(), vec![Notice::Welcome]);
    assert!(events.contains(&TransitionEvent::ExitCompleted { route: Route::Login }));
    assert_eq!(shell.current_route(), Some(&Route::Home));
    assert_eq!(
        kinds(&shell),
        vec![
            NodeKindTag::ParticleCloud,
            NodeKindTag::Cube,
            NodeKindTag::Cube,
        ]
    );
    assert_eq!(shell.nav_items().len(), 4);
    assert!(shell.logout_visible());
}

#[test]
fn wrong_name_posts_notice_and_stays_on_login() {
    let mut shell = shell();
    shell.navigate("/login", 0.0);
    shell.submit_name("bob", 0.0).unwrap();
    pump_until(&mut shell, 0.0, 1.5);

    assert_eq!(shell.drain_notices(), vec![Notice::CredentialMismatch]);
    assert_eq!(shell.auth_state(), AuthState::Unauthenticated);
    assert_eq!(shell.current_route(), Some(&Route::Login));
    assert_eq!(shell.session().stored_value().unwrap(), None);
}

#[test]
fn logout_clears_session_and_returns_to_login() {
    let mut shell = authenticated_shell();
    shell.navigate("/about", 0.0);
    pump_until(&mut shell, 0.0, 1.0);
    assert_eq!(shell.current_route(), Some(&Route::About));

    shell.logout(1.0).unwrap();
    assert_eq!(shell.auth_state(), AuthState::Unauthenticated);
    assert_eq!(
        shell.resolve_navigation("/projects"),
        RouteGuardDecision::RedirectToLogin
    );

    pump_until(&mut shell, 1.0, 2.0);
    assert_eq!(shell.current_route(), Some(&Route::Login));
}

#[test]
fn rapid_navigation_mounts_only_the_final_page() {
    let mut shell = authenticated_shell();
    shell.navigate("/", 0.0);
    pump_until(&mut shell, 0.0, 1.0);

    let mut events = Vec::new();
    shell.navigate("/about", 1.0);
    events.extend(shell.pump(1.05).transition_events);
    shell.navigate("/freelancer", 1.1);
    events.extend(pump_until(&mut shell, 1.1, 3.0));

    let completed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            TransitionEvent::EntryCompleted { route, .. } => Some(route.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![Route::Freelancer]);
    assert_eq!(shell.current_route(), Some(&Route::Freelancer));
    assert_eq!(shell.committed_nodes().len(), 3);
}

#[test]
fn outgoing_scene_unmounts_before_incoming_registers() {
    let mut shell = authenticated_shell();
    shell.navigate("/about", 0.0);
    pump_until(&mut shell, 0.0, 1.0);
    let about_ids: Vec<_> = shell.committed_nodes().iter().map(|n| n.id).collect();
    assert_eq!(about_ids.len(), 2);

    shell.navigate("/projects", 1.0);
    pump_until(&mut shell, 1.0, 2.0);
    assert_eq!(shell.current_route(), Some(&Route::Projects));
    assert!(shell.committed_nodes().is_empty());
    for id in about_ids {
        assert!(!shell.scheduler().is_registered(id));
    }
}

#[test]
fn scene_clock_restarts_on_mount() {
    let mut shell = authenticated_shell();
    shell.navigate("/about", 10.0);
    let report = shell.pump(12.0);
    assert_eq!(report.scene_time, 2.0);

    let ring = shell
        .committed_nodes()
        .into_iter()
        .find(|node| node.kind == NodeKindTag::Ring)
        .unwrap();
    assert_eq!(ring.transform.rotation.x, 0.5 * 2.0);
    assert!(shell.camera_position().is_some());
}

#[test]
fn page_nodes_register_under_the_mounted_page() {
    let mut shell = shell();
    let orphan = AnimatedNode::ring(Vec3::ZERO);
    assert!(!shell.register_animated_node(orphan));

    shell.navigate("/login", 0.0);
    let extra = AnimatedNode::ring(Vec3::new(1.0, 1.0, 1.0));
    assert!(shell.register_animated_node(extra.clone()));
    assert!(shell.scheduler().is_registered(extra.id));
    assert!(shell.unregister_animated_node(extra.id));
    assert!(!shell.unregister_animated_node(extra.id));
}

#[test]
fn not_found_page_renders_without_session() {
    let mut shell = shell();
    assert_eq!(
        shell.navigate("/nowhere", 0.0),
        RouteGuardDecision::Allow
    );
    assert_eq!(
        shell.current_route(),
        Some(&Route::NotFound("/nowhere".to_string()))
    );
    assert!(shell.committed_nodes().is_empty());
}

#[test]
fn cold_start_rapid_navigation_never_shows_the_middle_page() {
    let mut shell = authenticated_shell();
    let mut events = Vec::new();
    shell.navigate("/", 0.0);
    shell.navigate("/about", 0.0);
    shell.navigate("/projects", 0.0);
    events.extend(pump_until(&mut shell, 0.0, 2.0));

    assert!(
        events.iter().all(|event| match event {
            TransitionEvent::EntryStarted { route, .. }
            | TransitionEvent::EntryCompleted { route, .. } => route != &Route::About,
            TransitionEvent::ExitCompleted { .. } => true,
        }),
        "about must never start or finish its entry: {events:?}"
    );
    let completed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            TransitionEvent::EntryCompleted { route, .. } => Some(route.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![Route::Projects]);
    assert_eq!(shell.current_route(), Some(&Route::Projects));
}

#[test]
fn invalid_transition_timings_are_rejected_at_construction() {
    let mut config = CoreConfig::default();
    config.transition.duration_secs = f64::NAN;
    let err = PortfolioShell::new(&config, Box::new(MemorySessionStore::new()))
        .err()
        .expect("NaN duration must be rejected");
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "transition.duration_secs",
            ..
        }
    ));

    let mut config = CoreConfig::default();
    config.credential_check_delay_secs = f64::INFINITY;
    assert!(PortfolioShell::new(&config, Box::new(MemorySessionStore::new())).is_err());
}
