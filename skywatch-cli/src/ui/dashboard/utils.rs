//! Utility functions for the dashboard.
//!
//! Formatting helpers and non-TUI output that work without a terminal.

use std::time::Duration;

use skywatch::fetcher::FetchMetricsSnapshot;
use skywatch::store::SharedStore;

const FEET_PER_METER: f64 = 3.280_84;
const KNOTS_PER_MPS: f64 = 1.943_844;

/// Format duration as HH:MM:SS or MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Format the age of the last publish.
pub fn format_age(age: Option<Duration>) -> String {
    match age {
        None => "never".to_string(),
        Some(d) if d.as_secs() < 60 => format!("{}s ago", d.as_secs()),
        Some(d) if d.as_secs() < 3600 => format!("{}m{}s ago", d.as_secs() / 60, d.as_secs() % 60),
        Some(d) => format!("{}h{}m ago", d.as_secs() / 3600, (d.as_secs() % 3600) / 60),
    }
}

/// Barometric altitude in feet, rounded.
pub fn feet(meters: f64) -> i64 {
    (meters * FEET_PER_METER).round() as i64
}

/// Ground speed in knots, rounded.
pub fn knots(meters_per_second: f64) -> i64 {
    (meters_per_second * KNOTS_PER_MPS).round() as i64
}

/// One status line for non-interactive terminals.
pub fn print_simple_status(store: &SharedStore, metrics: &FetchMetricsSnapshot) {
    let snapshot = store.flights();
    println!(
        "[{}] Flights: {} | Airports: {} | Favorites: {} | Updated: {} | Cycles: {} ok, {} failed",
        store.data_state(),
        snapshot.len(),
        store.airport_count(),
        store.favorites().len(),
        format_age(snapshot.age()),
        metrics.cycles_published,
        metrics.cycles_skipped,
    );
}

/// Print final session summary.
pub fn print_session_summary(metrics: &FetchMetricsSnapshot, uptime: Duration) {
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!(
        "  Fetch cycles: {} ({} published, {} failed)",
        metrics.total_cycles(),
        metrics.cycles_published,
        metrics.cycles_skipped
    );
    println!("  Flights in last update: {}", metrics.last_flight_count);
    println!("  Uptime: {}", format_duration(uptime));
}
