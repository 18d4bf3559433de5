use geo::{Distance, Geodesic};
use serde::{Deserialize, Serialize};

use crate::{error::SpeedError, track_point::TrackPoint};

/// The leg between two consecutive points of a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: TrackPoint,
    pub to: TrackPoint,
}

impl Segment {
    pub fn new(from: TrackPoint, to: TrackPoint) -> Self {
        Self { from, to }
    }

    /// Ellipsoidal ground distance between the endpoints, in kilometers.
    pub fn distance_km(&self) -> f64 {
        Geodesic.distance(self.from.position, self.to.position) / 1000.0
    }

    /// Absolute timestamp difference in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        let delta = self.to.timestamp.signed_duration_since(self.from.timestamp);
        delta.num_milliseconds().abs() as f64 / (1000.0 * 60.0 * 60.0)
    }

    pub fn speed_kmh(&self) -> Result<f64, SpeedError> {
        let hours = self.duration_hours();
        if hours == 0.0 {
            return Err(SpeedError::ZeroDuration);
        }
        Ok(self.distance_km() / hours)
    }

    /// Hover text, speed rounded to the nearest whole km/h.
    pub fn label(&self) -> Result<String, SpeedError> {
        Ok(format!("{:.0}km/h", self.speed_kmh()?))
    }
}

#[cfg(test)]
fn one_hour_segment() -> Segment {
    let from: TrackPoint = "2021-01-01 08:00:00 (40.0, -75.0)".parse().unwrap();
    let to: TrackPoint = "2021-01-01 09:00:00 (40.5, -75.0)".parse().unwrap();
    Segment::new(from, to)
}

#[test]
fn half_degree_of_latitude_is_about_55_km() {
    let distance = one_hour_segment().distance_km();
    assert!((distance - 55.5).abs() < 0.5, "distance was {}", distance);
}

#[test]
fn distance_is_symmetric() {
    let segment = one_hour_segment();
    let reversed = Segment::new(segment.to.clone(), segment.from.clone());
    assert_eq!(segment.distance_km(), reversed.distance_km());
}

#[test]
fn speed_is_distance_over_duration() {
    let segment = one_hour_segment();
    assert_eq!(segment.duration_hours(), 1.0);
    assert_eq!(segment.speed_kmh().unwrap(), segment.distance_km());
    assert_eq!(segment.label().unwrap(), "56km/h");
}

#[test]
fn duration_is_absolute() {
    let segment = one_hour_segment();
    let reversed = Segment::new(segment.to.clone(), segment.from.clone());
    assert_eq!(reversed.duration_hours(), 1.0);
}

#[test]
fn zero_duration_speed_is_a_fault() {
    let from: TrackPoint = "2021-01-01 08:00:00 (40.0, -75.0)".parse().unwrap();
    let to: TrackPoint = "2021-01-01 08:00:00 (40.5, -75.0)".parse().unwrap();
    let segment = Segment::new(from, to);
    assert_eq!(segment.speed_kmh(), Err(SpeedError::ZeroDuration));
    assert_eq!(segment.label(), Err(SpeedError::ZeroDuration));
}
