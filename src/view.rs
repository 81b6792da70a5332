//! The stateful side of the map: loaded data, current filter, current markers.

use tracing::debug;

use crate::marker::{Marker, RadiusScale, markers};
use crate::model::{Station, Trip};
use crate::time_filter::{TimeFilter, filter_trips_by_time};
use crate::traffic::{StationTraffic, TrafficSummary, compute_station_traffic};

/// Holds the loaded stations and trips and the markers for the active time
/// filter. Every filter change recomputes traffic from the full trip set.
pub struct TrafficView {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    scale: RadiusScale,
    filter: TimeFilter,
    traffic: Vec<StationTraffic>,
    markers: Vec<Marker>,
}

impl TrafficView {
    /// Aggregates the full trip set once; the busiest station fixes the radius
    /// scale domain for the lifetime of the view.
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        let traffic = compute_station_traffic(&stations, &trips);
        let scale = RadiusScale::new(TrafficSummary::max_total(&traffic));
        let markers = markers(&traffic, &scale);

        TrafficView {
            stations,
            trips,
            scale,
            filter: TimeFilter::Any,
            traffic,
            markers,
        }
    }

    /// Applies a new filter and returns the recomputed markers.
    pub fn set_time_filter(&mut self, filter: TimeFilter) -> &[Marker] {
        let filtered = filter_trips_by_time(&self.trips, filter);
        debug!(
            filter = %filter,
            trips = filtered.len(),
            total_trips = self.trips.len(),
            "Time filter applied"
        );

        self.filter = filter;
        self.scale = self.scale.for_filter(filter);
        self.traffic = compute_station_traffic(&self.stations, &filtered);
        self.markers = markers(&self.traffic, &self.scale);

        &self.markers
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Text for the time display next to the slider.
    pub fn time_label(&self) -> String {
        self.filter.label()
    }

    pub fn traffic(&self) -> &[StationTraffic] {
        &self.traffic
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn summary(&self) -> TrafficSummary {
        TrafficSummary::from_traffic(&self.traffic)
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}
