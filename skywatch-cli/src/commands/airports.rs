//! Airports command - search the airport reference table.

use std::path::PathBuf;

use skywatch::airports::{load_airports, search_airports};
use skywatch::model::AirportRecord;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the airports command.
pub fn run(term: &str, airports: Option<PathBuf>, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("airports");

    let path = airports.unwrap_or_else(|| runner.config().airports.file.clone());
    let table = load_airports(&path).map_err(|error| CliError::Airports {
        path: path.clone(),
        error,
    })?;

    let results = search_airports(table.iter(), term);
    tracing::info!(term, matches = results.len(), "Airport search");

    if results.is_empty() {
        println!("No airports match '{}' ({} searched).", term.trim(), table.len());
        return Ok(());
    }

    for airport in &results {
        println!("{}", format_airport(airport));
    }
    println!();
    println!("{} of {} airports", results.len(), table.len());

    Ok(())
}

fn format_airport(airport: &AirportRecord) -> String {
    let iata = if airport.iata.is_empty() {
        "---"
    } else {
        airport.iata.as_str()
    };
    format!(
        "{:<5} {:<4} {} ({}, {})  elev {} ft",
        airport.icao, iata, airport.name, airport.city, airport.country, airport.elevation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_airport_without_iata() {
        let airport = AirportRecord {
            icao: "00AK".to_string(),
            name: "Lowell Field".to_string(),
            city: "Anchor Point".to_string(),
            country: "US".to_string(),
            elevation: 450,
            ..Default::default()
        };

        assert_eq!(
            format_airport(&airport),
            "00AK  ---  Lowell Field (Anchor Point, US)  elev 450 ft"
        );
    }
}
