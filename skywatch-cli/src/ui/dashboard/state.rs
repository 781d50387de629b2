//! Dashboard view state and key handling.
//!
//! No terminal or rendering dependencies beyond key codes, so everything
//! here is unit tested directly.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use skywatch::model::{AirportRecord, FlightRecord};
use skywatch::store::SharedStore;

/// Rows moved by PageUp / PageDown.
const PAGE_STEP: usize = 10;

/// Airports listed beside flight results in the search view.
pub const MAX_AIRPORT_MATCHES: usize = 12;

/// Which list the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Search,
    Favorites,
}

impl View {
    pub const ALL: [View; 3] = [View::All, View::Search, View::Favorites];

    pub fn title(&self) -> &'static str {
        match self {
            View::All => "All flights",
            View::Search => "Search",
            View::Favorites => "Favorites",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::All => 0,
            View::Search => 1,
            View::Favorites => 2,
        }
    }

    fn next(self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    fn previous(self) -> Self {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Actions the dashboard performs against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Quit,
    ToggleFavorite,
    Refresh,
    /// Look up arrivals and departures for the selected airport.
    ShowTraffic,
}

/// Data for one frame, read from the store.
#[derive(Debug, Default)]
pub struct ViewData {
    pub flights: Vec<FlightRecord>,
    pub airports: Vec<AirportRecord>,
    pub favorites: HashSet<String>,
    /// Favorites not present in the latest flight set.
    pub favorites_missing: usize,
}

/// Current view, selection and search input.
#[derive(Debug, Clone)]
pub struct ViewState {
    view: View,
    selected: usize,
    query: String,
    editing: bool,
    /// Selected row in the search view's airport list.
    airport_selected: usize,
    airport_rows: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view: View::All,
            selected: 0,
            query: String::new(),
            editing: false,
            airport_selected: 0,
            airport_rows: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn airport_selected(&self) -> usize {
        self.airport_selected
    }

    /// The airport highlighted in the search view, if any.
    pub fn selected_airport<'a>(&self, data: &'a ViewData) -> Option<&'a AirportRecord> {
        match self.view {
            View::Search => data.airports.get(self.airport_selected),
            _ => None,
        }
    }

    /// Read the rows for the current view.
    ///
    /// Each call is one short critical section per store read; the store is
    /// never borrowed past this call.
    pub fn collect(&self, store: &SharedStore) -> ViewData {
        let favorite_ids = store.favorites();

        let (flights, airports) = match self.view {
            View::All => (
                store.flights().sorted().into_iter().cloned().collect(),
                Vec::new(),
            ),
            View::Search => {
                let mut airports = store.search_airports(&self.query);
                airports.truncate(MAX_AIRPORT_MATCHES);
                (store.search_flights(&self.query), airports)
            }
            View::Favorites => (store.favorite_flights(), Vec::new()),
        };

        let favorites_missing = match self.view {
            View::Favorites => favorite_ids.len().saturating_sub(flights.len()),
            _ => 0,
        };

        ViewData {
            flights,
            airports,
            favorites: favorite_ids.into_iter().collect(),
            favorites_missing,
        }
    }

    /// Keep the selection inside a list of `rows` entries.
    pub fn clamp(&mut self, rows: usize) {
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    /// Keep the airport selection inside a list of `rows` airports.
    pub fn clamp_airports(&mut self, rows: usize) {
        self.airport_rows = rows;
        self.airport_selected = self.airport_selected.min(rows.saturating_sub(1));
    }

    /// Apply a key press. `rows` is the length of the list on screen.
    pub fn handle_key(&mut self, key: KeyEvent, rows: usize) -> Option<DashboardEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(DashboardEvent::Quit);
        }

        if self.editing {
            self.handle_edit_key(key.code);
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Some(DashboardEvent::Quit)
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if rows > 0 {
                    return Some(DashboardEvent::ToggleFavorite);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return Some(DashboardEvent::Refresh),
            KeyCode::Enter if self.view == View::Search && self.airport_rows > 0 => {
                return Some(DashboardEvent::ShowTraffic)
            }
            KeyCode::Char(']') if self.view == View::Search => {
                let max = self.airport_rows.saturating_sub(1);
                self.airport_selected = (self.airport_selected + 1).min(max);
            }
            KeyCode::Char('[') if self.view == View::Search => {
                self.airport_selected = self.airport_selected.saturating_sub(1);
            }
            KeyCode::Char('/') => {
                self.switch_to(View::Search);
                self.editing = true;
            }
            KeyCode::Tab => self.switch_to(self.view.next()),
            KeyCode::BackTab => self.switch_to(self.view.previous()),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1, rows),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1, rows),
            KeyCode::PageDown => self.move_by(PAGE_STEP as isize, rows),
            KeyCode::PageUp => self.move_by(-(PAGE_STEP as isize), rows),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = rows.saturating_sub(1),
            _ => {}
        }
        None
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                self.query.pop();
                self.selected = 0;
                self.airport_selected = 0;
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.selected = 0;
                self.airport_selected = 0;
            }
            _ => {}
        }
    }

    fn switch_to(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.selected = 0;
            self.airport_selected = 0;
        }
    }

    fn move_by(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            self.selected = 0;
            return;
        }
        let max = rows - 1;
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected + delta as usize).min(max)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch::model::{AirportSet, FlightSet};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store_with(ids: &[&str]) -> SharedStore {
        let store = SharedStore::new();
        store.replace_flights(
            ids.iter()
                .map(|id| FlightRecord {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect::<FlightSet>(),
        );
        store
    }

    #[test]
    fn test_tab_cycles_views_and_resets_selection() {
        let mut state = ViewState::new();
        state.handle_key(key(KeyCode::Down), 5);
        assert_eq!(state.selected(), 1);

        state.handle_key(key(KeyCode::Tab), 5);
        assert_eq!(state.view(), View::Search);
        assert_eq!(state.selected(), 0);

        state.handle_key(key(KeyCode::Tab), 5);
        state.handle_key(key(KeyCode::Tab), 5);
        assert_eq!(state.view(), View::All);

        state.handle_key(key(KeyCode::BackTab), 5);
        assert_eq!(state.view(), View::Favorites);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut state = ViewState::new();
        state.handle_key(key(KeyCode::Up), 3);
        assert_eq!(state.selected(), 0);

        state.handle_key(key(KeyCode::PageDown), 3);
        assert_eq!(state.selected(), 2);

        state.handle_key(key(KeyCode::Home), 3);
        assert_eq!(state.selected(), 0);

        state.handle_key(key(KeyCode::End), 3);
        assert_eq!(state.selected(), 2);

        state.clamp(1);
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn test_search_input_mode() {
        let mut state = ViewState::new();
        state.handle_key(key(KeyCode::Char('/')), 0);
        assert_eq!(state.view(), View::Search);
        assert!(state.is_editing());

        // Command keys are text while editing.
        for c in "dqr".chars() {
            assert_eq!(state.handle_key(key(KeyCode::Char(c)), 0), None);
        }
        state.handle_key(key(KeyCode::Backspace), 0);
        assert_eq!(state.query(), "dq");

        state.handle_key(key(KeyCode::Enter), 0);
        assert!(!state.is_editing());
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q')), 0),
            Some(DashboardEvent::Quit)
        );
    }

    #[test]
    fn test_action_keys() {
        let mut state = ViewState::new();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('r')), 0),
            Some(DashboardEvent::Refresh)
        );
        assert_eq!(state.handle_key(key(KeyCode::Char('f')), 0), None);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('f')), 2),
            Some(DashboardEvent::ToggleFavorite)
        );

        let mut editing = ViewState::new();
        editing.handle_key(key(KeyCode::Char('/')), 0);
        assert_eq!(
            editing.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 0),
            Some(DashboardEvent::Quit)
        );
    }

    #[test]
    fn test_airport_selection_and_traffic_key() {
        let mut state = ViewState::new();
        state.handle_key(key(KeyCode::Char('/')), 0);
        state.handle_key(key(KeyCode::Char('s')), 0);
        state.handle_key(key(KeyCode::Enter), 0);
        assert!(!state.is_editing());

        // No airports listed yet: Enter does nothing.
        state.clamp_airports(0);
        assert_eq!(state.handle_key(key(KeyCode::Enter), 0), None);

        state.clamp_airports(3);
        state.handle_key(key(KeyCode::Char(']')), 0);
        state.handle_key(key(KeyCode::Char(']')), 0);
        state.handle_key(key(KeyCode::Char(']')), 0);
        assert_eq!(state.airport_selected(), 2);
        state.handle_key(key(KeyCode::Char('[')), 0);
        assert_eq!(state.airport_selected(), 1);

        assert_eq!(
            state.handle_key(key(KeyCode::Enter), 0),
            Some(DashboardEvent::ShowTraffic)
        );

        state.clamp_airports(1);
        assert_eq!(state.airport_selected(), 0);

        // Outside the search view Enter is not a traffic request.
        state.handle_key(key(KeyCode::Tab), 0);
        assert_eq!(state.handle_key(key(KeyCode::Enter), 0), None);
    }

    #[test]
    fn test_collect_views() {
        let store = store_with(&["UAL9", "DAL123", "DAL7"]);
        store.add_favorite("DAL7");
        store.add_favorite("GONE1");

        let mut airports = AirportSet::new();
        airports.insert(AirportRecord {
            icao: "KDAL".to_string(),
            iata: "DAL".to_string(),
            name: "Dallas Love Field".to_string(),
            city: "Dallas".to_string(),
            ..Default::default()
        });
        store.replace_airports(airports);

        let mut state = ViewState::new();
        let all = state.collect(&store);
        let ids: Vec<&str> = all.flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["DAL123", "DAL7", "UAL9"]);
        assert!(all.favorites.contains("DAL7"));

        state.handle_key(key(KeyCode::Char('/')), 0);
        for c in "dal".chars() {
            state.handle_key(key(KeyCode::Char(c)), 0);
        }
        let search = state.collect(&store);
        assert_eq!(search.flights.len(), 2);
        assert_eq!(search.airports[0].icao, "KDAL");
        assert_eq!(state.selected_airport(&search).map(|a| a.icao.as_str()), Some("KDAL"));

        state.handle_key(key(KeyCode::Enter), 0);
        state.handle_key(key(KeyCode::Tab), 0);
        let favorites = state.collect(&store);
        assert_eq!(favorites.flights.len(), 1);
        assert_eq!(favorites.favorites_missing, 1);
    }
}
