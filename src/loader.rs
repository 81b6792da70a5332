//! Decoders for the station JSON document and the trip CSV export.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime};
use flate2::read::GzDecoder;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

use crate::model::{Station, Trip};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Wall-clock layouts seen in trip exports, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Deserialize)]
struct StationDocument {
    data: StationData,
}

#[derive(Deserialize)]
struct StationData {
    stations: Vec<Station>,
}

/// Decodes the station list from a `{"data": {"stations": [...]}}` document.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON of that shape or a station has
/// a non-numeric coordinate.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let doc: StationDocument =
        serde_json::from_slice(bytes).context("Failed to decode station document")?;
    debug!(stations = doc.data.stations.len(), "Stations decoded");
    Ok(doc.data.stations)
}

/// Reads trips from a headed CSV stream. Columns other than the trip fields
/// are ignored.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<Trip>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (row, result) in rdr.deserialize().enumerate() {
        let trip: Trip = result.with_context(|| format!("Invalid trip on data row {}", row + 1))?;
        trips.push(trip);
    }

    debug!(trips = trips.len(), "Trips decoded");
    Ok(trips)
}

/// Like [`parse_trips`], but transparently inflates gzip-compressed input.
pub fn decode_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    if bytes.starts_with(&GZIP_MAGIC) {
        debug!(bytes = bytes.len(), "Trip data is gzip-compressed");
        parse_trips(GzDecoder::new(bytes))
    } else {
        parse_trips(bytes)
    }
}

/// Parses trip timestamp text into its wall-clock value.
///
/// Offset-qualified RFC 3339 input keeps the wall clock of its own offset, so
/// `2024-03-01T08:00:00-05:00` reads as 08:00.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(ts);
        }
    }

    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.naive_local())
        .map_err(|_| anyhow!("Unrecognized timestamp '{}'", text))
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).map_err(serde::de::Error::custom)
}
