//! CLI schedule probe.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `ipltrack_core` linkage.
//! - Print a deterministic schedule preview for quick sanity checks.

use ipltrack_core::{core_version, CalendarEngine};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let start_date = args.get(1).map(String::as_str).unwrap_or("2024-01-06");
    let availability = args.get(2).map(String::as_str).unwrap_or("weekend");

    let engine = match CalendarEngine::from_config(start_date, availability) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    println!("ipltrack_core version={}", core_version());
    println!("start_date={} events={}", engine.start_date(), engine.events().len());

    let status = engine.current_phase(engine.start_date());
    println!(
        "phase={} week={}/{}",
        status.phase.name(),
        status.week_in_phase,
        status.total_weeks
    );

    if let Some(next) = engine.next_pending_event(engine.start_date()) {
        let zones: Vec<&str> = next.zones.iter().map(|zone| zone.label()).collect();
        println!("next {} {} [{}]", next.date, next.title, zones.join(" + "));
    }
}
