//! One-shot loading of stations and trips.

use anyhow::Result;
use tracing::info;

use crate::config::Sources;
use crate::fetch::{HttpClient, fetch_source};
use crate::loader::{decode_trips, parse_stations};
use crate::model::{Station, Trip};

#[derive(Debug, Clone)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
}

/// Fetches both sources concurrently, then decodes them. Either failure
/// aborts the load.
#[tracing::instrument(skip(client), fields(stations = %sources.stations, trips = %sources.trips))]
pub async fn load<C: HttpClient>(client: &C, sources: &Sources) -> Result<Dataset> {
    let (station_bytes, trip_bytes) = tokio::try_join!(
        fetch_source(client, &sources.stations),
        fetch_source(client, &sources.trips),
    )?;

    let stations = parse_stations(&station_bytes)?;
    let trips = decode_trips(&trip_bytes)?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Dataset loaded"
    );

    Ok(Dataset { stations, trips })
}
