use crate::{drive::Drive, error::SpeedError};

pub const TRACE_WIDTH: f64 = 1.0;
pub const TRACE_COLOR: &str = "red";

/// One drawable line per segment. Sinks consume this instead of the drive
/// itself, so rendering carries no dependency on any viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTrace {
    /// (lon, lat) endpoints, from-point first.
    pub coordinates: [(f64, f64); 2],
    pub width: f64,
    pub color: &'static str,
    /// Hover text, e.g. "42km/h".
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveScene {
    pub label: String,
    pub traces: Vec<SegmentTrace>,
}

impl DriveScene {
    /// Fails on the first zero-duration segment; no partial scene is built
    /// for a faulting drive.
    pub fn build(drive: &Drive) -> Result<Self, SpeedError> {
        let mut traces = Vec::with_capacity(drive.segments.len());
        for segment in &drive.segments {
            traces.push(SegmentTrace {
                coordinates: [
                    (segment.from.longitude(), segment.from.latitude()),
                    (segment.to.longitude(), segment.to.latitude()),
                ],
                width: TRACE_WIDTH,
                color: TRACE_COLOR,
                label: segment.label()?,
            });
        }
        Ok(Self {
            label: drive.label.clone(),
            traces,
        })
    }
}

#[test]
fn one_trace_per_segment() {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) => 2021-01-01 09:00:00 (40.5, -75.0)";
    let drive = Drive::from_route("d", raw).unwrap();
    let scene = DriveScene::build(&drive).unwrap();

    assert_eq!(scene.traces.len(), 1);
    let trace = &scene.traces[0];
    assert_eq!(trace.coordinates, [(-75.0, 40.0), (-75.0, 40.5)]);
    assert_eq!(trace.width, TRACE_WIDTH);
    assert_eq!(trace.color, TRACE_COLOR);
    assert_eq!(trace.label, "56km/h");
}

#[test]
fn zero_duration_segment_fails_the_scene() {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) => 2021-01-01 08:00:00 (40.5, -75.0)";
    let drive = Drive::from_route("d", raw).unwrap();
    assert_eq!(DriveScene::build(&drive), Err(SpeedError::ZeroDuration));
}

#[test]
fn pointless_drive_yields_an_empty_scene() {
    let drive = Drive::from_route("d", "2021-01-01 08:00:00 (40.0, -75.0)").unwrap();
    let scene = DriveScene::build(&drive).unwrap();
    assert!(scene.traces.is_empty());
}
