//! Station and trip records as loaded from the bike-share data sources.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A bike-share dock location.
///
/// `short_name` is the identifier trips refer to in their
/// `start_station_id` / `end_station_id` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub short_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
}

impl Station {
    pub fn new(short_name: &str, lon: f64, lat: f64) -> Self {
        Station {
            short_name: short_name.to_string(),
            name: None,
            lon,
            lat,
        }
    }
}

/// One rental, from pick-up to drop-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub ride_id: Option<String>,
    pub start_station_id: String,
    pub end_station_id: String,
    #[serde(deserialize_with = "crate::loader::deserialize_timestamp")]
    pub started_at: NaiveDateTime,
    #[serde(deserialize_with = "crate::loader::deserialize_timestamp")]
    pub ended_at: NaiveDateTime,
}

/// Station feeds are inconsistent about quoting coordinates.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(n) => Ok(n),
        Coordinate::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
