//! Dashboard widgets for the TUI.

mod flight_table;
mod status_bar;

pub use flight_table::FlightTableWidget;
pub use status_bar::{StatusBarWidget, StatusInfo};
