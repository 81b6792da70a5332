//! Time-of-day filtering of trips around a minutes-since-midnight value.

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::borrow::Cow;
use std::fmt;

use crate::model::Trip;

/// Half-width of the window around the filter time.
pub const WINDOW_MINUTES: i32 = 60;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Slider value meaning "no filter".
pub const ANY_TIME_SLIDER: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    /// Every trip passes.
    #[default]
    Any,
    /// Minutes since midnight.
    At(i32),
}

impl TimeFilter {
    /// Interprets a slider position: `-1` is [`TimeFilter::Any`], `0..=1440`
    /// a time of day.
    pub fn from_slider(value: i32) -> Result<Self> {
        match value {
            ANY_TIME_SLIDER => Ok(TimeFilter::Any),
            0..=MINUTES_PER_DAY => Ok(TimeFilter::At(value)),
            _ => bail!(
                "Time filter {} out of range (expected -1 or 0..={})",
                value,
                MINUTES_PER_DAY
            ),
        }
    }

    /// Accepts `any`, a slider integer, or `HH:MM`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if text.eq_ignore_ascii_case("any") {
            return Ok(TimeFilter::Any);
        }

        if let Ok(value) = text.parse::<i32>() {
            return Self::from_slider(value);
        }

        match NaiveTime::parse_from_str(text, "%H:%M") {
            Ok(t) => Ok(TimeFilter::At(minutes_of(&t))),
            Err(_) => bail!("Invalid time filter '{}'", text),
        }
    }

    /// Display text for the current filter.
    pub fn label(&self) -> String {
        match self {
            TimeFilter::Any => "(any time)".to_string(),
            TimeFilter::At(m) => format_time(*m),
        }
    }

    /// Whether a trip starts or ends inside the window.
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            TimeFilter::Any => true,
            TimeFilter::At(f) => {
                // no wraparound: 23:50 is 1430 minutes away from 00:10
                let start = minutes_since_midnight(&trip.started_at);
                let end = minutes_since_midnight(&trip.ended_at);
                let window = WINDOW_MINUTES.unsigned_abs();
                start.abs_diff(*f) <= window || end.abs_diff(*f) <= window
            }
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn minutes_since_midnight(ts: &NaiveDateTime) -> i32 {
    minutes_of(&ts.time())
}

fn minutes_of(t: &NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Keeps the trips within [`WINDOW_MINUTES`] of the filter, in input order.
///
/// [`TimeFilter::Any`] hands back the input slice itself.
pub fn filter_trips_by_time(trips: &[Trip], filter: TimeFilter) -> Cow<'_, [Trip]> {
    match filter {
        TimeFilter::Any => Cow::Borrowed(trips),
        TimeFilter::At(_) => Cow::Owned(
            trips
                .iter()
                .filter(|trip| filter.matches(trip))
                .cloned()
                .collect(),
        ),
    }
}

/// Formats minutes since midnight as a short US clock time, e.g. `2:30 PM`.
///
/// Values outside one day wrap around.
pub fn format_time(minutes: i32) -> String {
    let minutes = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn trip(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Trip {
        Trip {
            ride_id: Some(id.to_string()),
            start_station_id: "A".to_string(),
            end_station_id: "B".to_string(),
            started_at: start,
            ended_at: end,
        }
    }

    fn ids(trips: &[Trip]) -> Vec<&str> {
        trips.iter().filter_map(|t| t.ride_id.as_deref()).collect()
    }

    #[test]
    fn test_window_example() {
        let trips = vec![trip("morning", at(8, 0), at(8, 20))];

        assert_eq!(filter_trips_by_time(&trips, TimeFilter::At(500)).len(), 1);
        assert!(filter_trips_by_time(&trips, TimeFilter::At(300)).is_empty());
    }

    #[test]
    fn test_any_returns_input() {
        let trips = vec![
            trip("a", at(1, 0), at(1, 10)),
            trip("b", at(12, 0), at(12, 30)),
        ];
        let result = filter_trips_by_time(&trips, TimeFilter::Any);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), trips.as_slice());
    }

    #[test]
    fn test_window_edges_inclusive() {
        let trips = vec![
            trip("early_edge", at(7, 0), at(7, 0)),
            trip("late_edge", at(9, 0), at(9, 0)),
            trip("too_early", at(6, 59), at(6, 59)),
            trip("too_late", at(9, 1), at(9, 1)),
            trip("ends_inside", at(5, 0), at(7, 30)),
        ];
        let result = filter_trips_by_time(&trips, TimeFilter::At(8 * 60));

        assert_eq!(ids(&result), vec!["early_edge", "late_edge", "ends_inside"]);
    }

    #[test]
    fn test_no_midnight_wraparound() {
        let trips = vec![trip("late", at(23, 50), at(23, 55))];
        assert!(filter_trips_by_time(&trips, TimeFilter::At(10)).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let trips: Vec<Trip> = (0..24)
            .map(|h| trip(&format!("t{h}"), at(h, 15), at(h, 45)))
            .collect();
        let filter = TimeFilter::At(13 * 60);

        let once = filter_trips_by_time(&trips, filter).into_owned();
        let twice = filter_trips_by_time(&once, filter).into_owned();
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["t12", "t13"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_trips_by_time(&[], TimeFilter::At(0)).is_empty());
    }

    #[test]
    fn test_from_slider() {
        assert_eq!(TimeFilter::from_slider(-1).unwrap(), TimeFilter::Any);
        assert_eq!(TimeFilter::from_slider(0).unwrap(), TimeFilter::At(0));
        assert_eq!(TimeFilter::from_slider(1440).unwrap(), TimeFilter::At(1440));
        assert!(TimeFilter::from_slider(-2).is_err());
        assert!(TimeFilter::from_slider(1441).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(TimeFilter::parse("any").unwrap(), TimeFilter::Any);
        assert_eq!(TimeFilter::parse("ANY").unwrap(), TimeFilter::Any);
        assert_eq!(TimeFilter::parse("-1").unwrap(), TimeFilter::Any);
        assert_eq!(TimeFilter::parse("750").unwrap(), TimeFilter::At(750));
        assert_eq!(TimeFilter::parse("08:20").unwrap(), TimeFilter::At(500));
        assert!(TimeFilter::parse("noon").is_err());
        assert!(TimeFilter::parse("25:00").is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(90), "1:30 AM");
        assert_eq!(format_time(750), "12:30 PM");
        assert_eq!(format_time(0), "12:00 AM");
        assert_eq!(format_time(1439), "11:59 PM");
        assert_eq!(format_time(1440), "12:00 AM");
    }

    #[test]
    fn test_label() {
        assert_eq!(TimeFilter::Any.label(), "(any time)");
        assert_eq!(TimeFilter::At(870).to_string(), "2:30 PM");
    }

    #[test]
    fn test_extreme_filter_values_match_nothing() {
        let trips = vec![
            trip("midnight", at(0, 0), at(0, 0)),
            trip("late", at(23, 59), at(23, 59)),
        ];

        assert!(filter_trips_by_time(&trips, TimeFilter::At(i32::MIN)).is_empty());
        assert!(filter_trips_by_time(&trips, TimeFilter::At(i32::MAX)).is_empty());
        assert_eq!(filter_trips_by_time(&trips, TimeFilter::At(-60)).len(), 1);
    }
}
