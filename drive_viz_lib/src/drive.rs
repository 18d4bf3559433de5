use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::FormatError, segment::Segment, track_point::TrackPoint};

/// One trip: the points in travel order plus the segments between
/// consecutive pairs. A drive with fewer than 2 points has no segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    /// Identifier carried by the archive record. Not used by analysis.
    pub label: String,
    pub points: Vec<TrackPoint>,
    pub segments: Vec<Segment>,
}

impl Drive {
    pub fn new(label: String, points: Vec<TrackPoint>) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| Segment::new(pair[0].clone(), pair[1].clone()))
            .collect();
        Self {
            label,
            points,
            segments,
        }
    }

    /// Parses a `"=>"`-joined point string, e.g.
    /// `"2021-01-01 08:00:00 (40.0, -75.0) => 2021-01-01 09:00:00 (40.5, -75.0)"`.
    pub fn from_route(label: &str, raw: &str) -> Result<Self, FormatError> {
        let points = raw
            .split("=>")
            .map(|token| token.trim().parse())
            .collect::<Result<Vec<TrackPoint>, FormatError>>()?;
        Ok(Drive::new(label.to_string(), points))
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route: Vec<String> = self.points.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", route.join(" => "))
    }
}

#[test]
fn consecutive_pairs_become_segments() {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) \
               => 2021-01-01 08:30:00 (40.2, -75.1) \
               => 2021-01-01 09:00:00 (40.5, -75.0)";
    let drive = Drive::from_route("d", raw).unwrap();
    assert_eq!(drive.points.len(), 3);
    assert_eq!(drive.segments.len(), 2);
    assert_eq!(drive.segments[0].from, drive.points[0]);
    assert_eq!(drive.segments[0].to, drive.points[1]);
    assert_eq!(drive.segments[1].from, drive.points[1]);
    assert_eq!(drive.segments[1].to, drive.points[2]);
}

#[test]
fn single_point_drive_has_no_segments() {
    let drive = Drive::from_route("d", "2021-01-01 08:00:00 (40.0, -75.0)").unwrap();
    assert_eq!(drive.points.len(), 1);
    assert!(drive.segments.is_empty());
}

#[test]
fn bad_point_fails_the_whole_route() {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) => not a point";
    assert!(matches!(
        Drive::from_route("d", raw),
        Err(FormatError::MissingOpenParen { .. })
    ));
}

#[test]
fn display_joins_points_in_order() {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) => 2021-01-01 09:00:00 (40.5, -75.0)";
    let drive = Drive::from_route("d", raw).unwrap();
    assert_eq!(
        drive.to_string(),
        "2021-01-01 08:00:00 (40, -75) => 2021-01-01 09:00:00 (40.5, -75)"
    );
}
