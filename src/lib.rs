pub mod config;
pub mod dataset;
pub mod fetch;
pub mod loader;
pub mod marker;
pub mod model;
pub mod output;
pub mod sweep;
pub mod time_filter;
pub mod traffic;
pub mod view;

pub use model::{Station, Trip};
pub use time_filter::{TimeFilter, filter_trips_by_time, format_time};
pub use traffic::{StationTraffic, compute_station_traffic};
pub use view::TrafficView;
