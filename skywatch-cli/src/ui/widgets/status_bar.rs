//! Fetch status widget.
//!
//! Two lines: data readiness and freshness on top, fetch counters and the
//! API endpoint below.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use skywatch::fetcher::FetchMetricsSnapshot;
use skywatch::store::DataState;

use crate::ui::dashboard::utils::{format_age, format_duration};

/// What the status bar shows for one frame.
#[derive(Debug, Clone)]
pub struct StatusInfo<'a> {
    pub data_state: DataState,
    pub cycle: u64,
    pub age: Option<Duration>,
    pub flights: usize,
    pub airports: usize,
    pub metrics: FetchMetricsSnapshot,
    pub base_url: &'a str,
    pub poll_interval: Duration,
    pub uptime: Duration,
}

/// Widget displaying fetch status.
pub struct StatusBarWidget<'a> {
    info: &'a StatusInfo<'a>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(info: &'a StatusInfo<'a>) -> Self {
        Self { info }
    }

    fn state_color(state: DataState) -> Color {
        match state {
            DataState::Uninitialized => Color::DarkGray,
            DataState::Loading => Color::Yellow,
            DataState::Ready => Color::Green,
        }
    }

    fn failure_color(consecutive_failures: u64) -> Color {
        match consecutive_failures {
            0 => Color::DarkGray,
            1..=2 => Color::Yellow,
            _ => Color::Red,
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let info = self.info;
        let label = Style::default().fg(Color::DarkGray);

        let data_line = Line::from(vec![
            Span::styled("Data: ", label),
            Span::styled(
                format!("{:<8}", info.data_state.as_str().to_uppercase()),
                Style::default().fg(Self::state_color(info.data_state)),
            ),
            Span::raw("  │  "),
            Span::styled("Flights: ", label),
            Span::styled(info.flights.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("  │  "),
            Span::styled("Airports: ", label),
            Span::styled(info.airports.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("  │  "),
            Span::styled("Cycle: ", label),
            Span::raw(info.cycle.to_string()),
            Span::styled(format!(" ({})", format_age(info.age)), label),
        ]);

        let failures = info.metrics.consecutive_failures;
        let fetch_line = Line::from(vec![
            Span::styled("Fetches: ", label),
            Span::styled(
                format!("{} ok", info.metrics.cycles_published),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!(", {} failed", info.metrics.cycles_skipped),
                Style::default().fg(Self::failure_color(failures)),
            ),
            if failures > 0 {
                Span::styled(
                    format!(" ({} in a row)", failures),
                    Style::default().fg(Self::failure_color(failures)),
                )
            } else {
                Span::raw("")
            },
            Span::raw("  │  "),
            Span::styled("Every ", label),
            Span::raw(format!("{}s", info.poll_interval.as_secs())),
            Span::styled(" from ", label),
            Span::raw(info.base_url.to_string()),
            Span::raw("  │  "),
            Span::styled("Up ", label),
            Span::raw(format_duration(info.uptime)),
        ]);

        Paragraph::new(vec![data_line, fetch_line]).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_text(info: &StatusInfo<'_>) -> String {
        let area = Rect::new(0, 0, 120, 2);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(info).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn info() -> StatusInfo<'static> {
        StatusInfo {
            data_state: DataState::Ready,
            cycle: 7,
            age: Some(Duration::from_secs(12)),
            flights: 4321,
            airports: 57,
            metrics: FetchMetricsSnapshot::default(),
            base_url: "https://opensky-network.org",
            poll_interval: Duration::from_secs(60),
            uptime: Duration::from_secs(65),
        }
    }

    #[test]
    fn test_shows_counts_and_state() {
        let text = render_to_text(&info());
        assert!(text.contains("READY"));
        assert!(text.contains("4321"));
        assert!(text.contains("Cycle: 7 (12s ago)"));
        assert!(text.contains("Every 60s"));
        assert!(text.contains("01:05"));
    }

    #[test]
    fn test_shows_failure_streak() {
        let mut info = info();
        info.metrics.cycles_skipped = 3;
        info.metrics.consecutive_failures = 2;

        let text = render_to_text(&info);
        assert!(text.contains("3 failed (2 in a row)"));
    }
}
