//! Dashboard rendering.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Status (2 lines)                                     │
//! ├──────────────────────────────────────────────────────┤
//! │ Tabs: All flights │ Search │ Favorites               │
//! ├──────────────────────────────────────────────────────┤
//! │ Flight table            │ Airport matches (search)   │
//! │                         │ Selected airport traffic   │
//! ├──────────────────────────────────────────────────────┤
//! │ Help or search input                                 │
//! └──────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState, Tabs},
    Frame,
};
use skywatch::model::AirportRecord;
use skywatch::opensky::{AirportFlight, TrafficDirection};
use skywatch::store::DataState;

use super::state::{View, ViewData, ViewState};
use super::traffic::{TrafficPanel, TrafficStatus};
use crate::ui::widgets::{FlightTableWidget, StatusBarWidget, StatusInfo};

pub fn render_ui(
    frame: &mut Frame,
    status: &StatusInfo<'_>,
    view: &ViewState,
    data: &ViewData,
    traffic: Option<&TrafficPanel>,
    table_state: &mut TableState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Status
            Constraint::Length(1), // Tabs
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    frame.render_widget(StatusBarWidget::new(status), chunks[0]);
    render_tabs(frame, chunks[1], view.view());

    let empty_message = empty_message(status.data_state, view);
    match view.view() {
        View::Search => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(chunks[2]);
            let title = format!(" Flights matching \"{}\" ({}) ", view.query(), data.flights.len());
            frame.render_stateful_widget(
                FlightTableWidget::new(&data.flights, &data.favorites)
                    .title(title)
                    .empty_message(empty_message),
                columns[0],
                table_state,
            );
            match traffic {
                Some(panel) => {
                    let side = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                        .split(columns[1]);
                    render_airports(frame, side[0], &data.airports, view.airport_selected());
                    render_traffic(frame, side[1], panel);
                }
                None => {
                    render_airports(frame, columns[1], &data.airports, view.airport_selected())
                }
            }
        }
        View::Favorites => {
            let mut title = format!(" Favorites ({}) ", data.flights.len());
            if data.favorites_missing > 0 {
                title = format!(
                    " Favorites ({}, {} not airborne) ",
                    data.flights.len(),
                    data.favorites_missing
                );
            }
            frame.render_stateful_widget(
                FlightTableWidget::new(&data.flights, &data.favorites)
                    .title(title)
                    .empty_message(empty_message),
                chunks[2],
                table_state,
            );
        }
        View::All => {
            frame.render_stateful_widget(
                FlightTableWidget::new(&data.flights, &data.favorites).empty_message(empty_message),
                chunks[2],
                table_state,
            );
        }
    }

    render_footer(frame, chunks[3], view);
}

fn render_tabs(frame: &mut Frame, area: Rect, current: View) {
    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(v.title())).collect();
    let tabs = Tabs::new(titles)
        .select(current.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_airports(frame: &mut Frame, area: Rect, airports: &[AirportRecord], selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Airports ({}) ", airports.len()),
            Style::default().fg(Color::Blue),
        ));

    let lines: Vec<Line> = if airports.is_empty() {
        vec![Line::from(Span::styled(
            "No matching airports",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        airports
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let line = Line::from(vec![
                    Span::styled(format!("{:<5}", a.icao), Style::default().fg(Color::Cyan)),
                    Span::raw(a.label()),
                ]);
                if i == selected {
                    line.style(
                        Style::default()
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    line
                }
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_traffic(frame: &mut Frame, area: Rect, panel: &TrafficPanel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} traffic, last 24h ", panel.icao),
            Style::default().fg(Color::Blue),
        ));

    let dim = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = match &panel.status {
        TrafficStatus::Loading => vec![Line::from(Span::styled("Loading...", dim))],
        TrafficStatus::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        TrafficStatus::Loaded(traffic) => {
            let mut lines = traffic_lines(TrafficDirection::Arrival, &traffic.arrivals);
            lines.extend(traffic_lines(TrafficDirection::Departure, &traffic.departures));
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn traffic_lines(direction: TrafficDirection, flights: &[AirportFlight]) -> Vec<Line<'static>> {
    let mut sorted: Vec<&AirportFlight> = flights.iter().collect();
    sorted.sort_by_key(|f| std::cmp::Reverse(f.last_seen.unwrap_or(0)));

    let mut lines = vec![Line::from(Span::styled(
        format!("{} ({})", direction, flights.len()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    let label = match direction {
        TrafficDirection::Arrival => "from",
        TrafficDirection::Departure => "to",
    };
    lines.extend(sorted.into_iter().map(|f| {
        let seen = f
            .last_seen_utc()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        Line::from(format!(
            "  {:<8} {} {:<4}  {}",
            f.callsign_or_unknown(),
            label,
            f.counterpart(direction).unwrap_or("????"),
            seen
        ))
    }));
    lines
}

fn render_footer(frame: &mut Frame, area: Rect, view: &ViewState) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);

    let line = if view.is_editing() {
        Line::from(vec![
            Span::styled("Search: ", key),
            Span::raw(view.query().to_string()),
            Span::styled("█", Style::default().fg(Color::Gray)),
            Span::styled("   Enter/Esc done", text),
        ])
    } else {
        let mut line = Line::from(vec![
            Span::styled("q", key),
            Span::styled(" quit  ", text),
            Span::styled("Tab", key),
            Span::styled(" view  ", text),
            Span::styled("/", key),
            Span::styled(" search  ", text),
            Span::styled("f", key),
            Span::styled(" favorite  ", text),
            Span::styled("r", key),
            Span::styled(" refresh  ", text),
            Span::styled("↑↓", key),
            Span::styled(" select", text),
        ]);
        if view.view() == View::Search {
            line.push_span(Span::styled("  [ ]", key));
            line.push_span(Span::styled(" airport  ", text));
            line.push_span(Span::styled("Enter", key));
            line.push_span(Span::styled(" traffic", text));
        }
        line
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn empty_message(state: DataState, view: &ViewState) -> &'static str {
    if state != DataState::Ready {
        return "Waiting for the first update...";
    }
    match view.view() {
        View::All => "No flights reported",
        View::Search if view.query().trim().is_empty() => "Type / to search by callsign",
        View::Search => "No matching flights",
        View::Favorites => "Press f on a flight to add a favorite",
    }
}
