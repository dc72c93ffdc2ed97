//! walk — scripted tour through the proximity engine.
//!
//! Seeds an in-memory backend with a few rooms around Long Beach, provisions
//! the built-in preset rooms next to them, then teleports and nudges a
//! simulated user through them, printing each transition and what was
//! announced.  Pass a JSON session config path as
//! the first argument to replace the built-in one.  Set `RUST_LOG=debug`
//! for per-observation detail.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use px_core::{GeoPoint, format_distance};
use px_region::Region;
use px_remote::{MemoryBackend, Operation};
use px_session::{MoveReport, Session, SessionBuilder, SessionConfig};
use px_sim::{Direction, StepDistance};

// ── Config ────────────────────────────────────────────────────────────────────

const CONFIG_JSON: &str = r#"{
    "stepMiles": 1.0,
    "startPreset": "long-beach"
}"#;

const USER: &str = "walker";

// ── Output ────────────────────────────────────────────────────────────────────

fn print_move(label: &str, report: &MoveReport) {
    let active = report
        .refresh
        .active_region
        .as_ref()
        .map_or("(none)", |r| r.name.as_str());
    println!(
        "{label:<22} {}  active: {active:<14} {:?}",
        report.location.point, report.refresh.observation
    );
    for warning in &report.warnings {
        println!("    ! {} ({warning})", warning.user_message());
    }
}

fn print_access(session: &Session) {
    for (region, access) in session.access() {
        let state = if access.allowed { "open" } else { "closed" };
        let distance = access
            .distance_meters
            .map(format_distance)
            .unwrap_or_else(|| "-".to_owned());
        println!("    {:<14} {state:<6} {distance}", region.name);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_json_path(&PathBuf::from(path))?,
        None => SessionConfig::from_json_str(CONFIG_JSON)?,
    };

    let backend = Arc::new(MemoryBackend::signed_in(USER));
    backend.insert_region(Region::local("harbor", "Harbor", GeoPoint::new(33.77, -118.19), 1_000.0));
    backend.insert_region(Region::local("pier", "Pier", GeoPoint::new(33.7605, -118.1905), 400.0));
    // An older copy of a preset room, listed under one of its aliases.
    backend.insert_region(Region::local("hill", "Signal Hill Chat Room", GeoPoint::new(33.8044, -118.1678), 1_300.0));

    let mut session = SessionBuilder::from_backend(backend.clone()).config(config).build()?;

    let provision = session.ensure_preset_regions().await?;
    info!(created = provision.created.len(), "preset rooms ensured");
    for warning in &provision.warnings {
        println!("    ! {} ({warning})", warning.user_message());
    }

    let start = session.refresh().await?;
    println!(
        "start: {:?} in {}",
        start.observation,
        start.active_region.as_ref().map_or("(none)", |r| r.name.as_str())
    );
    print_access(&session);

    // ── Walk ──────────────────────────────────────────────────────────────
    let half_mile = StepDistance::from_miles(0.5)?;
    if let Some(report) = session.nudge_by(Direction::South, half_mile).await {
        print_move("south 0.5 mi", &report);
    }
    if let Some(report) = session.nudge(Direction::East).await {
        print_move("east 1 mi", &report);
    }
    if let Some(report) = session.nudge(Direction::East).await {
        print_move("east 1 mi", &report);
    }

    let report = session.teleport("signal-hill").await?;
    print_move("teleport signal-hill", &report);

    // The location push fails, but the move still stands.
    backend.fail(Operation::PushLocation);
    let report = session.teleport("long-beach").await?;
    print_move("teleport long-beach", &report);
    backend.recover(Operation::PushLocation);

    print_access(&session);

    // ── Summary ───────────────────────────────────────────────────────────
    let outcomes = session.settle().await;
    println!("\n{} announcement(s):", outcomes.len());
    for outcome in &outcomes {
        let status = outcome.failure_message().unwrap_or("ok");
        println!("    {:<28} {:<24} {status}", outcome.notice.title, outcome.key);
    }
    println!("stored notices: {:?}", backend.notice_titles());
    println!("location pushes: {}", backend.locations().len());

    Ok(())
}
