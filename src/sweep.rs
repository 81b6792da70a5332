//! Traffic at regular steps across the day.

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::debug;

use crate::model::{Station, Trip};
use crate::time_filter::{MINUTES_PER_DAY, TimeFilter, filter_trips_by_time, format_time};
use crate::traffic::{StationTraffic, compute_station_traffic};

/// Traffic for one station at one sweep step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    pub minutes: i32,
    pub time: String,
    pub short_name: String,
    pub departures: usize,
    pub arrivals: usize,
    pub total_traffic: usize,
}

impl SweepRecord {
    pub fn new(minutes: i32, time: &str, st: &StationTraffic) -> Self {
        SweepRecord {
            minutes,
            time: time.to_string(),
            short_name: st.short_name.clone(),
            departures: st.departures,
            arrivals: st.arrivals,
            total_traffic: st.total_traffic,
        }
    }
}

/// Filters and aggregates at every `step` minutes from midnight up to, but
/// not including, the next midnight. Rows are grouped by step, stations in
/// input order within each step.
pub fn sweep(stations: &[Station], trips: &[Trip], step: i32) -> Result<Vec<SweepRecord>> {
    if step <= 0 {
        bail!("Sweep step must be positive, got {}", step);
    }

    let mut records = Vec::new();

    for minutes in (0..MINUTES_PER_DAY).step_by(step as usize) {
        let filtered = filter_trips_by_time(trips, TimeFilter::At(minutes));
        let label = format_time(minutes);

        records.extend(
            compute_station_traffic(stations, &filtered)
                .iter()
                .map(|st| SweepRecord::new(minutes, &label, st)),
        );

        debug!(time = %label, trips = filtered.len(), "Sweep step done");
    }

    Ok(records)
}
