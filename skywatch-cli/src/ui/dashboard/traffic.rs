//! Background lookup of arrivals and departures for the selected airport.
//!
//! Requests run on a short-lived thread so the draw loop never blocks on
//! HTTP. Results come back over a channel and are picked up by
//! [`TrafficLookup::poll`] once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use skywatch::opensky::{AirportFlight, FetchError, OpenSkyClient, TimeWindow, TrafficDirection};

/// Arrivals and departures for one airport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportTraffic {
    pub arrivals: Vec<AirportFlight>,
    pub departures: Vec<AirportFlight>,
}

/// Source of per-airport traffic.
pub trait TrafficSource: Send + Sync + 'static {
    fn airport_traffic(&self, icao: &str) -> Result<AirportTraffic, FetchError>;
}

impl TrafficSource for OpenSkyClient {
    fn airport_traffic(&self, icao: &str) -> Result<AirportTraffic, FetchError> {
        let window = TimeWindow::last_day_from_now();
        Ok(AirportTraffic {
            arrivals: self.fetch_airport_traffic(TrafficDirection::Arrival, icao, window)?,
            departures: self.fetch_airport_traffic(TrafficDirection::Departure, icao, window)?,
        })
    }
}

/// What the traffic panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TrafficStatus {
    Loading,
    Loaded(AirportTraffic),
    Failed(String),
}

/// Traffic panel contents for one airport.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficPanel {
    pub icao: String,
    pub status: TrafficStatus,
}

type TrafficReply = (String, Result<AirportTraffic, FetchError>);

/// Runs traffic requests off the draw thread and holds the latest panel.
pub struct TrafficLookup {
    source: Arc<dyn TrafficSource>,
    sender: Sender<TrafficReply>,
    receiver: Receiver<TrafficReply>,
    panel: Option<TrafficPanel>,
}

impl TrafficLookup {
    pub fn new(source: Arc<dyn TrafficSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
            panel: None,
        }
    }

    pub fn panel(&self) -> Option<&TrafficPanel> {
        self.panel.as_ref()
    }

    /// Start a lookup for `icao`. The panel shows loading until it finishes.
    pub fn request(&mut self, icao: &str) {
        let icao = icao.to_string();
        self.panel = Some(TrafficPanel {
            icao: icao.clone(),
            status: TrafficStatus::Loading,
        });

        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name("airport-traffic".to_string())
            .spawn(move || {
                let result = source.airport_traffic(&icao);
                // The dashboard may already be gone.
                let _ = sender.send((icao, result));
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "Failed to start traffic lookup");
            if let Some(panel) = self.panel.as_mut() {
                panel.status = TrafficStatus::Failed(e.to_string());
            }
        }
    }

    /// Apply finished lookups. Replies for an airport other than the one
    /// currently shown are dropped.
    ///
    /// Returns `true` if the panel changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((icao, result)) = self.receiver.try_recv() {
            let Some(panel) = self.panel.as_mut() else {
                continue;
            };
            if panel.icao != icao {
                tracing::debug!(icao = %icao, "Dropping stale traffic reply");
                continue;
            }
            panel.status = match result {
                Ok(traffic) => {
                    tracing::debug!(
                        icao = %icao,
                        arrivals = traffic.arrivals.len(),
                        departures = traffic.departures.len(),
                        "Airport traffic loaded"
                    );
                    TrafficStatus::Loaded(traffic)
                }
                Err(e) => {
                    tracing::warn!(icao = %icao, error = %e, "Airport traffic lookup failed");
                    TrafficStatus::Failed(e.to_string())
                }
            };
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct FixedSource;

    impl TrafficSource for FixedSource {
        fn airport_traffic(&self, icao: &str) -> Result<AirportTraffic, FetchError> {
            if icao == "FAIL" {
                return Err(FetchError::Status {
                    status: 429,
                    url: "http://localhost/api/flights/arrival".to_string(),
                });
            }
            Ok(AirportTraffic {
                arrivals: vec![AirportFlight {
                    icao24: "a808c5".to_string(),
                    callsign: Some("DAL123  ".to_string()),
                    est_departure_airport: Some("KLAX".to_string()),
                    est_arrival_airport: Some(icao.to_string()),
                    first_seen: None,
                    last_seen: Some(1717243200),
                }],
                departures: Vec::new(),
            })
        }
    }

    fn settle(lookup: &mut TrafficLookup) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            lookup.poll();
            if !matches!(lookup.panel().map(|p| &p.status), Some(TrafficStatus::Loading)) {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_request_loads_traffic() {
        let mut lookup = TrafficLookup::new(Arc::new(FixedSource));
        assert!(lookup.panel().is_none());

        lookup.request("KSFO");
        assert_eq!(lookup.panel().unwrap().status, TrafficStatus::Loading);

        settle(&mut lookup);
        let panel = lookup.panel().unwrap();
        assert_eq!(panel.icao, "KSFO");
        match &panel.status {
            TrafficStatus::Loaded(traffic) => {
                assert_eq!(traffic.arrivals.len(), 1);
                assert!(traffic.departures.is_empty());
            }
            other => panic!("expected loaded traffic, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_is_shown() {
        let mut lookup = TrafficLookup::new(Arc::new(FixedSource));
        lookup.request("FAIL");
        settle(&mut lookup);

        match &lookup.panel().unwrap().status {
            TrafficStatus::Failed(message) => assert!(message.contains("429")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut lookup = TrafficLookup::new(Arc::new(FixedSource));
        lookup
            .sender
            .send(("KLAX".to_string(), Ok(AirportTraffic::default())))
            .unwrap();
        lookup.panel = Some(TrafficPanel {
            icao: "KSFO".to_string(),
            status: TrafficStatus::Loading,
        });

        assert!(!lookup.poll());
        assert_eq!(lookup.panel().unwrap().status, TrafficStatus::Loading);
    }
}
