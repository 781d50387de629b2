//! Terminal UI for Skywatch.
//!
//! Provides a live flight board with all-flights, search and favorites
//! views over the shared store.
//!
//! # Module Structure
//!
//! - `dashboard` - Main TUI dashboard (see submodules for details)
//! - `widgets` - Reusable UI widget components

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardConfig};
