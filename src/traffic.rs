//! Per-station departure and arrival counts.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::{Station, Trip};

/// A station with the traffic counted over one trip set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTraffic {
    pub short_name: String,
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
    pub departures: usize,
    pub arrivals: usize,
    pub total_traffic: usize,
}

impl StationTraffic {
    fn new(station: &Station, departures: usize, arrivals: usize) -> Self {
        StationTraffic {
            short_name: station.short_name.clone(),
            name: station.name.clone(),
            lon: station.lon,
            lat: station.lat,
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }
}

/// Counts, for every station, the trips starting and ending there.
///
/// The result follows the order of `stations`. Trips whose station ids match
/// no station are not counted anywhere.
pub fn compute_station_traffic(stations: &[Station], trips: &[Trip]) -> Vec<StationTraffic> {
    let departures = count_by(trips, |t| &t.start_station_id);
    let arrivals = count_by(trips, |t| &t.end_station_id);

    stations
        .iter()
        .map(|st| {
            let id = st.short_name.as_str();
            StationTraffic::new(
                st,
                departures.get(id).copied().unwrap_or(0),
                arrivals.get(id).copied().unwrap_or(0),
            )
        })
        .collect()
}

fn count_by<'a, F>(trips: &'a [Trip], key: F) -> HashMap<&'a str, usize>
where
    F: Fn(&'a Trip) -> &'a String,
{
    let mut counts = HashMap::new();
    for trip in trips {
        *counts.entry(key(trip).as_str()).or_insert(0) += 1;
    }
    counts
}

/// Totals across one aggregation, used for reporting.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TrafficSummary {
    pub stations: usize,
    pub active_stations: usize,
    pub departures: usize,
    pub arrivals: usize,
    pub busiest_station: Option<String>,
    pub busiest_total: usize,
}

impl TrafficSummary {
    pub fn from_traffic(traffic: &[StationTraffic]) -> Self {
        let mut s = TrafficSummary {
            stations: traffic.len(),
            ..Default::default()
        };

        for st in traffic {
            s.departures += st.departures;
            s.arrivals += st.arrivals;

            if st.total_traffic > 0 {
                s.active_stations += 1;
            }

            // first station wins ties
            if st.total_traffic > s.busiest_total {
                s.busiest_total = st.total_traffic;
                s.busiest_station = Some(st.short_name.clone());
            }
        }

        s
    }

    /// Largest `total_traffic`, or 0 when there are no stations.
    pub fn max_total(traffic: &[StationTraffic]) -> usize {
        traffic.iter().map(|st| st.total_traffic).max().unwrap_or(0)
    }
}
