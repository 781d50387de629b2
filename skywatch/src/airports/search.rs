//! Airport lookup by free-text term.

use crate::model::AirportRecord;

/// Find airports matching `term`, case-insensitively.
///
/// Exact IATA matches come first, followed by airports whose IATA code,
/// name or city contains the term. Each group is ordered by ICAO code.
/// A blank term matches nothing.
pub fn search_airports<'a, I>(airports: I, term: &str) -> Vec<AirportRecord>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let needle = term.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for airport in airports {
        let iata = airport.iata.to_uppercase();
        if iata == needle {
            exact.push(airport.clone());
        } else if iata.contains(&needle)
            || airport.name.to_uppercase().contains(&needle)
            || airport.city.to_uppercase().contains(&needle)
        {
            partial.push(airport.clone());
        }
    }

    exact.sort_by(|a, b| a.icao.cmp(&b.icao));
    partial.sort_by(|a, b| a.icao.cmp(&b.icao));
    exact.extend(partial);
    exact
}
