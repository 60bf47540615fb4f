//! Headless frame-pump probe.
//!
//! # Responsibility
//! - Drive `portfolio_core` the way a display loop would, without rendering.
//! - Print route changes, notices and committed transforms deterministically.
//!
//! Usage: `portfolio_cli [name] [log_dir] [config.json]`. The name defaults
//! to `yogesh`; logs are only written when an absolute `log_dir` is given.
//! Without a config file the built-in defaults apply.

use log::info;
use portfolio_core::{
    core_version, init_logging, ConfigError, CoreConfig, MemorySessionStore, PortfolioShell,
    TransitionEvent,
};
use std::process::ExitCode;

const REFRESH_HZ: f64 = 60.0;
const RUN_SECS: f64 = 4.0;

fn load_config(path: Option<&str>) -> Result<CoreConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(CoreConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::Parse(format!("cannot read `{path}`: {err}")))?;
    CoreConfig::from_json_str(&json)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let name = args.first().map_or("yogesh", String::as_str);
    let log_dir = args.get(1);

    let config = match load_config(args.get(2).map(String::as_str)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("portfolio_core version={}", core_version());

    let mut shell = match PortfolioShell::new(&config, Box::new(MemorySessionStore::new())) {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let decision = shell.navigate("/about", 0.0);
    println!("navigate /about -> {decision:?}");

    let frame_secs = 1.0 / REFRESH_HZ;
    let total_frames = (RUN_SECS * REFRESH_HZ) as u64;
    for frame in 0..=total_frames {
        let now = frame as f64 * frame_secs;
        if frame == 30 {
            match shell.submit_name(name, now) {
                Ok(_) => println!("t={now:.3} credential check started"),
                Err(err) => println!("t={now:.3} submit rejected: {err}"),
            }
        }

        let report = shell.pump(now);
        for event in &report.transition_events {
            match event {
                TransitionEvent::ExitCompleted { route } => {
                    println!("t={now:.3} unmounted {route}")
                }
                TransitionEvent::EntryStarted { route, .. } => {
                    println!("t={now:.3} mounted {route}")
                }
                TransitionEvent::EntryCompleted { route, .. } => {
                    println!("t={now:.3} settled on {route}")
                }
            }
        }
        for notice in shell.drain_notices() {
            println!("t={now:.3} notice: {}", notice.message());
        }
        for fault in &report.tick.faults {
            println!("t={now:.3} dropped node: {fault}");
        }
    }

    let committed = shell.committed_nodes();
    info!(
        "event=cli_run module=cli status=ok frames={} route={} auth_state={:?} nodes={}",
        total_frames + 1,
        shell
            .current_route()
            .map_or_else(|| "-".to_string(), ToString::to_string),
        shell.auth_state(),
        committed.len()
    );
    println!("auth_state={:?}", shell.auth_state());
    for node in committed {
        let t = node.transform;
        println!(
            "{} pos=({:.3}, {:.3}, {:.3}) rot=({:.3}, {:.3}, {:.3})",
            node.kind,
            t.position.x,
            t.position.y,
            t.position.z,
            t.rotation.x,
            t.rotation.y,
            t.rotation.z
        );
    }
    ExitCode::SUCCESS
}
