//! Output formatting and persistence for station traffic.
//!
//! Supports a plain table, JSON, and CSV files for traffic and sweep rows.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::sweep::SweepRecord;
use crate::traffic::StationTraffic;
use csv::WriterBuilder;

/// Logs traffic rows using Rust's debug pretty-print format.
pub fn print_pretty(traffic: &[StationTraffic]) {
    debug!("{:#?}", traffic);
}

/// Writes an aligned text table, one station per line.
pub fn write_table<W: Write>(mut out: W, traffic: &[StationTraffic]) -> Result<()> {
    writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10}  {}",
        "station", "departures", "arrivals", "total", "name"
    )?;
    for st in traffic {
        writeln!(
            out,
            "{:<12} {:>10} {:>10} {:>10}  {}",
            st.short_name,
            st.departures,
            st.arrivals,
            st.total_traffic,
            st.name.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(out, value)?;
    Ok(())
}

/// Writes traffic rows as CSV with a header row.
pub fn write_csv<W: Write>(out: W, traffic: &[StationTraffic]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);
    for st in traffic {
        writer.serialize(st)?;
    }
    writer.flush()?;
    Ok(())
}

/// Replaces the file at `path` with the traffic rows as CSV.
pub fn write_traffic_csv(path: &str, traffic: &[StationTraffic]) -> Result<()> {
    debug!(path, rows = traffic.len(), "Writing traffic CSV");
    let file = std::fs::File::create(path)?;
    write_csv(file, traffic)
}

/// Writes sweep rows to a fresh CSV with a single header, replacing any
/// earlier run at `path`.
pub fn write_sweep_csv(path: &str, records: &[SweepRecord]) -> Result<()> {
    debug!(path, rows = records.len(), "Writing sweep CSV");
    let file = std::fs::File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn traffic() -> Vec<StationTraffic> {
        vec![
            StationTraffic {
                short_name: "A32000".to_string(),
                name: Some("Kendall T".to_string()),
                lon: -71.09,
                lat: 42.36,
                departures: 3,
                arrivals: 4,
                total_traffic: 7,
            },
            StationTraffic {
                short_name: "M32006".to_string(),
                name: None,
                lon: -71.1,
                lat: 42.37,
                departures: 0,
                arrivals: 0,
                total_traffic: 0,
            },
        ]
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&traffic());
    }

    #[test]
    fn test_write_table() {
        let mut buf = Vec::new();
        write_table(&mut buf, &traffic()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("station"));
        assert!(lines[1].contains("Kendall T"));
    }

    #[test]
    fn test_write_json_uses_field_names() {
        let mut buf = Vec::new();
        write_json(&mut buf, &traffic()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value[0]["total_traffic"], 7);
        assert_eq!(value[1]["name"], serde_json::Value::Null);
    }

    #[test]
    fn test_write_traffic_csv_overwrites() {
        let path = temp_path("bikeshare_traffic_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_traffic_csv(&path, &traffic()).unwrap();
        write_traffic_csv(&path, &traffic()[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("total_traffic"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_sweep_csv_replaces_earlier_run() {
        let path = temp_path("bikeshare_traffic_test_sweep.csv");
        let _ = fs::remove_file(&path);

        let rows = traffic();
        let first = vec![
            SweepRecord::new(480, "8:00 AM", &rows[0]),
            SweepRecord::new(480, "8:00 AM", &rows[1]),
        ];
        write_sweep_csv(&path, &first).unwrap();
        write_sweep_csv(&path, &first[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("minutes")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
