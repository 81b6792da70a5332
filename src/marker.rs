//! Marker sizing and colouring inputs for the map layer.
//!
//! Projection and drawing belong to the map client; this module only turns
//! station traffic into the numbers a marker is drawn from.

use serde::Serialize;

use crate::time_filter::TimeFilter;
use crate::traffic::StationTraffic;

/// Radius range before any time filter is chosen.
pub const INITIAL_RADIUS_RANGE: (f64, f64) = (4.0, 25.0);
/// Radius range while every trip is shown.
pub const ANY_TIME_RADIUS_RANGE: (f64, f64) = (0.0, 25.0);
/// Radius range while a time window is active; fewer trips, larger spread.
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

/// Departure-share buckets: mostly arrivals, balanced, mostly departures.
const FLOW_BUCKETS: [f64; 3] = [0.0, 0.5, 1.0];

/// Square-root scale from total traffic to marker radius, so marker area
/// grows linearly with traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl RadiusScale {
    /// Domain runs from 0 to the busiest station's total.
    pub fn new(max_total: usize) -> Self {
        RadiusScale {
            domain: (0.0, max_total as f64),
            range: INITIAL_RADIUS_RANGE,
        }
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Picks the range matching the active filter.
    pub fn for_filter(self, filter: TimeFilter) -> Self {
        match filter {
            TimeFilter::Any => self.with_range(ANY_TIME_RADIUS_RANGE),
            TimeFilter::At(_) => self.with_range(FILTERED_RADIUS_RANGE),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Values past the domain extrapolate rather than clamp.
    pub fn radius(&self, total: usize) -> f64 {
        let (d0, d1) = (self.domain.0.sqrt(), self.domain.1.sqrt());
        let (r0, r1) = self.range;

        let t = if d1 == d0 {
            0.5
        } else {
            ((total as f64).sqrt() - d0) / (d1 - d0)
        };

        r0 + (r1 - r0) * t
    }
}

/// Share of departures in a station's traffic, or 0.0 for no traffic.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Quantizes the departure share into one of three buckets. `None` for a
/// station without traffic, where the share is undefined.
pub fn departure_flow(departures: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }

    let share = pct(departures, total);
    let n = FLOW_BUCKETS.len();
    let bucket = (0..n - 1)
        .take_while(|i| share >= (i + 1) as f64 / n as f64)
        .count();

    Some(FLOW_BUCKETS[bucket])
}

/// Everything the map client needs to place and style one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub short_name: String,
    pub lon: f64,
    pub lat: f64,
    pub radius: f64,
    pub departure_flow: Option<f64>,
    pub title: String,
}

impl Marker {
    pub fn from_traffic(st: &StationTraffic, scale: &RadiusScale) -> Self {
        Marker {
            short_name: st.short_name.clone(),
            lon: st.lon,
            lat: st.lat,
            radius: scale.radius(st.total_traffic),
            departure_flow: departure_flow(st.departures, st.total_traffic),
            title: format!(
                "{} trips ({} departures, {} arrivals)",
                st.total_traffic, st.departures, st.arrivals
            ),
        }
    }
}

pub fn markers(traffic: &[StationTraffic], scale: &RadiusScale) -> Vec<Marker> {
    traffic
        .iter()
        .map(|st| Marker::from_traffic(st, scale))
        .collect()
}
