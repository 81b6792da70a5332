use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
pub const DEFAULT_TRIPS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

/// Where the station document and trip export are read from. Each entry is a
/// URL or a local path.
///
/// Can be stored as a JSON file:
/// ```json
/// {
///   "stations": "data/bluebikes-stations.json",
///   "trips": "data/bluebikes-traffic-2024-03.csv.gz"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sources {
    pub stations: String,
    pub trips: String,
}

impl Default for Sources {
    fn default() -> Self {
        Sources {
            stations: DEFAULT_STATIONS_URL.to_string(),
            trips: DEFAULT_TRIPS_URL.to_string(),
        }
    }
}

impl Sources {
    /// Reads `STATIONS_URL` and `TRIPS_URL`, falling back to the Bluebikes
    /// March 2024 data.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Sources {
            stations: std::env::var("STATIONS_URL").unwrap_or(defaults.stations),
            trips: std::env::var("TRIPS_URL").unwrap_or(defaults.trips),
        }
    }

    /// Loads sources from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sources file '{path}'"))?;
        let sources: Sources = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sources file '{path}'"))?;
        Ok(sources)
    }

    /// Command-line values take precedence over whatever was loaded.
    pub fn with_overrides(mut self, stations: Option<String>, trips: Option<String>) -> Self {
        if let Some(s) = stations {
            self.stations = s;
        }
        if let Some(t) = trips {
            self.trips = t;
        }
        self
    }
}
