//! Main TUI dashboard for Skywatch.
//!
//! Shows the live flight set with all-flights, search and favorites views,
//! and lets the user mark favorites and request an immediate fetch.
//!
//! # Module Structure
//!
//! - `state` - View state and key handling (no rendering dependencies)
//! - `traffic` - Background arrivals/departures lookup for the search view
//! - `render` - Layout orchestration
//! - `utils` - Formatting and non-TUI output

mod render;
pub mod state;
pub mod traffic;
pub mod utils;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::TableState, Terminal};
use skywatch::fetcher::FetchMetrics;
use skywatch::store::SharedStore;

use crate::ui::widgets::StatusInfo;

use state::{DashboardEvent, ViewData, ViewState};
use traffic::{TrafficLookup, TrafficSource};

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// How long to wait for input before redrawing.
    pub refresh: Duration,
    /// API endpoint shown in the status bar.
    pub base_url: String,
    /// Fetch interval shown in the status bar.
    pub poll_interval: Duration,
}

/// The main dashboard UI.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    store: Arc<SharedStore>,
    metrics: Arc<FetchMetrics>,
    config: DashboardConfig,
    view: ViewState,
    table_state: TableState,
    start_time: Instant,
    /// Airport traffic lookups; `None` disables Enter in the search view.
    traffic: Option<TrafficLookup>,
}

impl Dashboard {
    /// Enter raw mode and the alternate screen.
    pub fn new(
        store: Arc<SharedStore>,
        metrics: Arc<FetchMetrics>,
        config: DashboardConfig,
    ) -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = cleanup_on_error(enter_terminal, leave_terminal)?;

        Ok(Self {
            terminal,
            store,
            metrics,
            config,
            view: ViewState::new(),
            table_state: TableState::default(),
            start_time: Instant::now(),
            traffic: None,
        })
    }

    /// Enable arrivals/departures lookups for the selected airport.
    pub fn with_traffic(mut self, source: Arc<dyn TrafficSource>) -> Self {
        self.traffic = Some(TrafficLookup::new(source));
        self
    }

    /// Draw and handle input until the user quits or exit is requested
    /// elsewhere (Ctrl+C handler).
    pub fn run(&mut self) -> io::Result<()> {
        while !self.store.exit_requested() {
            let data = self.view.collect(&self.store);
            let rows = data.flights.len();
            self.view.clamp(rows);
            self.view.clamp_airports(data.airports.len());
            if let Some(traffic) = self.traffic.as_mut() {
                traffic.poll();
            }

            self.draw(&data)?;

            match self.poll_event(rows)? {
                Some(DashboardEvent::Quit) => {
                    tracing::info!("Quit requested from dashboard");
                    self.store.request_exit();
                    break;
                }
                Some(DashboardEvent::ToggleFavorite) => {
                    if let Some(flight) = data.flights.get(self.view.selected()) {
                        let now_favorite = self.store.toggle_favorite(&flight.id);
                        tracing::debug!(id = %flight.id, favorite = now_favorite, "Favorite toggled");
                    }
                }
                Some(DashboardEvent::Refresh) => {
                    tracing::debug!("Refresh requested from dashboard");
                    self.store.request_refresh();
                }
                Some(DashboardEvent::ShowTraffic) => {
                    match (self.traffic.as_mut(), self.view.selected_airport(&data)) {
                        (Some(traffic), Some(airport)) => {
                            tracing::debug!(icao = %airport.icao, "Airport traffic requested");
                            traffic.request(&airport.icao);
                        }
                        (None, _) => tracing::debug!("Airport traffic lookups disabled"),
                        (_, None) => {}
                    }
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Wait up to the refresh interval for a key press.
    fn poll_event(&mut self, rows: usize) -> io::Result<Option<DashboardEvent>> {
        if event::poll(self.config.refresh)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.view.handle_key(key, rows));
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, data: &ViewData) -> io::Result<()> {
        let snapshot = self.store.flights();
        let status = StatusInfo {
            data_state: self.store.data_state(),
            cycle: snapshot.cycle,
            age: snapshot.age(),
            flights: snapshot.len(),
            airports: self.store.airport_count(),
            metrics: self.metrics.snapshot(),
            base_url: &self.config.base_url,
            poll_interval: self.config.poll_interval,
            uptime: self.start_time.elapsed(),
        };

        self.table_state.select(if data.flights.is_empty() {
            None
        } else {
            Some(self.view.selected())
        });

        let view = &self.view;
        let table_state = &mut self.table_state;
        let traffic = self.traffic.as_ref().and_then(TrafficLookup::panel);
        self.terminal.draw(|frame| {
            render::render_ui(frame, &status, view, data, traffic, table_state);
        })?;
        Ok(())
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo raw mode for a dashboard that was never built, so `Drop` won't run.
fn leave_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run `setup`, calling `cleanup` before returning its error.
fn cleanup_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    cleanup: impl FnOnce(),
) -> io::Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            cleanup();
            Err(e)
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cleanup_runs_when_setup_fails() {
        let cleaned = Cell::new(false);
        let result: io::Result<()> = cleanup_on_error(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || cleaned.set(true),
        );

        assert!(result.is_err());
        assert!(cleaned.get());
    }

    #[test]
    fn test_cleanup_skipped_on_success() {
        let cleaned = Cell::new(false);
        let result = cleanup_on_error(|| Ok(7), || cleaned.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!cleaned.get());
    }
}
