//! Flight list widget.

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};
use skywatch::model::FlightRecord;

use crate::ui::dashboard::utils::{feet, knots};

const FAVORITE_MARK: &str = "★";

/// Table of flights with the selected row highlighted.
pub struct FlightTableWidget<'a> {
    flights: &'a [FlightRecord],
    favorites: &'a HashSet<String>,
    title: String,
    empty_message: &'a str,
}

impl<'a> FlightTableWidget<'a> {
    pub fn new(flights: &'a [FlightRecord], favorites: &'a HashSet<String>) -> Self {
        Self {
            flights,
            favorites,
            title: format!(" Flights ({}) ", flights.len()),
            empty_message: "No flights",
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    fn row(&self, flight: &FlightRecord) -> Row<'a> {
        let favorite = if self.favorites.contains(&flight.id) {
            FAVORITE_MARK
        } else {
            ""
        };
        Row::new(vec![
            Cell::from(Span::styled(favorite, Style::default().fg(Color::Yellow))),
            Cell::from(flight.id.clone()),
            Cell::from(flight.icao24.clone()),
            Cell::from(flight.origin_country.clone()),
            Cell::from(format!("{:>9.4}", flight.latitude)),
            Cell::from(format!("{:>9.4}", flight.longitude)),
            Cell::from(format!("{:>6}", feet(flight.altitude))),
            Cell::from(format!("{:>4}", knots(flight.velocity))),
            Cell::from(format!("{:>3.0}°", flight.heading)),
        ])
    }
}

impl StatefulWidget for FlightTableWidget<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                self.title.clone(),
                Style::default().fg(Color::Blue),
            ));

        let header = Row::new(vec![
            "", "Callsign", "ICAO24", "Country", "Lat", "Lon", "Alt ft", "Kt", "Hdg",
        ])
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        if self.flights.is_empty() {
            Paragraph::new(Span::styled(
                self.empty_message,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let rows: Vec<Row> = self.flights.iter().map(|f| self.row(f)).collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(12),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Length(4),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        StatefulWidget::render(table, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_callsigns_and_favorite_mark() {
        let flights = vec![
            FlightRecord {
                id: "DAL123".to_string(),
                icao24: "a808c5".to_string(),
                origin_country: "United States".to_string(),
                altitude: 3048.0,
                ..Default::default()
            },
            FlightRecord {
                id: "SWR8".to_string(),
                icao24: "4b1805".to_string(),
                origin_country: "Switzerland".to_string(),
                ..Default::default()
            },
        ];
        let favorites: HashSet<String> = ["SWR8".to_string()].into_iter().collect();

        let area = Rect::new(0, 0, 90, 6);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default().with_selected(Some(0));
        FlightTableWidget::new(&flights, &favorites).render(area, &mut buf, &mut state);

        let text = buffer_text(&buf);
        assert!(text.contains("DAL123"));
        assert!(text.contains("SWR8"));
        assert!(text.contains("10000"));
        assert!(text.contains(FAVORITE_MARK));
        assert!(text.contains("Flights (2)"));
    }

    #[test]
    fn test_empty_message() {
        let favorites = HashSet::new();
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default();

        FlightTableWidget::new(&[], &favorites)
            .empty_message("Waiting for data")
            .render(area, &mut buf, &mut state);

        assert!(buffer_text(&buf).contains("Waiting for data"));
    }
}
