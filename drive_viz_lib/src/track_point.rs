use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single timestamped GPS fix. `position` is (x = longitude, y = latitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub position: Point,
    pub timestamp: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(position: Point, timestamp: DateTime<Utc>) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

/// Parses `"YYYY-MM-DD HH:MM:SS (lat, lon)"`. The archive sometimes keeps
/// its raw `;` between the coordinates, so both separators are accepted.
impl FromStr for TrackPoint {
    type Err = FormatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (ts_raw, pos_raw) = raw
            .split_once('(')
            .ok_or_else(|| FormatError::MissingOpenParen { token: raw.to_string() })?;

        let ts_raw = ts_raw.trim();
        let naive = NaiveDateTime::parse_from_str(ts_raw, TIMESTAMP_FORMAT)
            .map_err(|_| FormatError::BadTimestamp { token: ts_raw.to_string() })?;

        let inner = pos_raw
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| FormatError::MissingCloseParen { token: raw.to_string() })?;

        let coords: Vec<&str> = inner.split([',', ';']).collect();
        let &[lat_raw, lon_raw] = coords.as_slice() else {
            return Err(FormatError::BadPosition { token: inner.to_string() });
        };
        let lat: f64 = lat_raw
            .trim()
            .parse()
            .map_err(|_| FormatError::BadPosition { token: inner.to_string() })?;
        let lon: f64 = lon_raw
            .trim()
            .parse()
            .map_err(|_| FormatError::BadPosition { token: inner.to_string() })?;

        Ok(TrackPoint::new(Point::new(lon, lat), naive.and_utc()))
    }
}

impl fmt::Display for TrackPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.latitude(),
            self.longitude()
        )
    }
}

#[test]
fn parse_and_format_round_trip() {
    let point: TrackPoint = "2021-01-01 08:00:00 (40.25, -75.5)".parse().unwrap();
    assert_eq!(point.latitude(), 40.25);
    assert_eq!(point.longitude(), -75.5);
    assert_eq!(point.to_string(), "2021-01-01 08:00:00 (40.25, -75.5)");

    let again: TrackPoint = point.to_string().parse().unwrap();
    assert_eq!(again.timestamp, point.timestamp);
    assert!((again.latitude() - point.latitude()).abs() < 1e-12);
    assert!((again.longitude() - point.longitude()).abs() < 1e-12);
}

#[test]
fn parse_accepts_semicolon_coordinates() {
    let point: TrackPoint = "2021-01-01 08:00:00 (40.0; -75.0)".parse().unwrap();
    assert_eq!(point.latitude(), 40.0);
    assert_eq!(point.longitude(), -75.0);
}

#[test]
fn missing_parentheses_is_a_format_error() {
    let err = "2021-01-01 08:00:00 40.0, -75.0".parse::<TrackPoint>().unwrap_err();
    assert!(matches!(err, FormatError::MissingOpenParen { .. }));

    let err = "2021-01-01 08:00:00 (40.0, -75.0".parse::<TrackPoint>().unwrap_err();
    assert!(matches!(err, FormatError::MissingCloseParen { .. }));
}

#[test]
fn bad_timestamp_is_a_format_error() {
    let err = "01/01/2021 08:00 (40.0, -75.0)".parse::<TrackPoint>().unwrap_err();
    assert!(matches!(err, FormatError::BadTimestamp { .. }));
}

#[test]
fn wrong_coordinate_count_is_a_format_error() {
    let err = "2021-01-01 08:00:00 (40.0)".parse::<TrackPoint>().unwrap_err();
    assert!(matches!(err, FormatError::BadPosition { .. }));

    let err = "2021-01-01 08:00:00 (40.0, -75.0, 12.0)".parse::<TrackPoint>().unwrap_err();
    assert!(matches!(err, FormatError::BadPosition { .. }));
}
