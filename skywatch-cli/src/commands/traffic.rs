//! Traffic command - recent arrivals and departures at one airport.

use skywatch::airports::load_airports;
use skywatch::opensky::{AirportFlight, OpenSkyClient, TimeWindow, TrafficDirection};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the traffic command.
pub fn run(icao: &str, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(debug, false)?;
    runner.log_startup("traffic");
    let config = runner.config();

    let icao = icao.trim().to_uppercase();
    if icao.is_empty() {
        return Err(CliError::Config("airport code must not be empty".to_string()));
    }

    let client = OpenSkyClient::new(
        config.opensky.base_url.as_str(),
        config.credentials(),
        config.request_timeout(),
    )?;

    // The table is only used for a friendlier heading.
    let heading = match load_airports(&config.airports.file) {
        Ok(airports) => airports
            .get(&icao)
            .map(|a| format!("{} - {}", icao, a.name))
            .unwrap_or_else(|| icao.clone()),
        Err(e) => {
            tracing::debug!(error = %e, "Airport table unavailable for traffic heading");
            icao.clone()
        }
    };

    let window = TimeWindow::last_day_from_now();
    println!("{} (last 24 hours)", heading);

    for direction in [TrafficDirection::Arrival, TrafficDirection::Departure] {
        let flights = client.fetch_airport_traffic(direction, &icao, window)?;
        print_flights(direction, &flights);
    }

    Ok(())
}

fn print_flights(direction: TrafficDirection, flights: &[AirportFlight]) {
    println!();
    println!("{} ({})", direction, flights.len());
    println!("{}", "─".repeat(48));

    if flights.is_empty() {
        println!("  none");
        return;
    }

    let mut sorted: Vec<&AirportFlight> = flights.iter().collect();
    sorted.sort_by_key(|f| std::cmp::Reverse(f.last_seen.unwrap_or(0)));

    for flight in sorted {
        println!("  {}", format_flight(direction, flight));
    }
}

fn format_flight(direction: TrafficDirection, flight: &AirportFlight) -> String {
    let label = match direction {
        TrafficDirection::Arrival => "from",
        TrafficDirection::Departure => "to",
    };
    let seen = flight
        .last_seen_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{:<8} {} {:<4}  {}  last seen {}",
        flight.callsign_or_unknown(),
        label,
        flight.counterpart(direction).unwrap_or("????"),
        flight.icao24,
        seen
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arrival() {
        let flight = AirportFlight {
            icao24: "a808c5".to_string(),
            callsign: Some("DAL123  ".to_string()),
            est_departure_airport: Some("KLAX".to_string()),
            est_arrival_airport: Some("KSFO".to_string()),
            first_seen: Some(1717100000),
            last_seen: Some(1717243200),
        };

        assert_eq!(
            format_flight(TrafficDirection::Arrival, &flight),
            "DAL123   from KLAX  a808c5  last seen 2024-06-01 12:00 UTC"
        );
    }

    #[test]
    fn test_format_departure_unknown_destination() {
        let flight = AirportFlight {
            icao24: "4b1805".to_string(),
            callsign: None,
            est_departure_airport: Some("KSFO".to_string()),
            est_arrival_airport: None,
            first_seen: None,
            last_seen: None,
        };

        assert_eq!(
            format_flight(TrafficDirection::Departure, &flight),
            "Unknown  to ????  4b1805  last seen unknown"
        );
    }
}
