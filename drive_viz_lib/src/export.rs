use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

use crate::scene::{DriveScene, SegmentTrace};

pub fn to_feature_collection(scene: &DriveScene) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: scene.traces.iter().map(trace_feature).collect(),
        foreign_members: None,
    }
}

pub fn to_geojson_string(scene: &DriveScene) -> String {
    GeoJson::from(to_feature_collection(scene)).to_string()
}

fn trace_feature(trace: &SegmentTrace) -> Feature {
    let [(lon_a, lat_a), (lon_b, lat_b)] = trace.coordinates;
    let geometry = Geometry::new(Value::LineString(vec![
        vec![lon_a, lat_a],
        vec![lon_b, lat_b],
    ]));

    let mut properties = JsonObject::new();
    properties.insert("text".to_string(), json!(trace.label));
    properties.insert("stroke".to_string(), json!(trace.color));
    properties.insert("stroke-width".to_string(), json!(trace.width));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// A self-contained Leaflet page embedding the drive's GeoJSON. Each trace
/// becomes a polyline styled from its properties, with the speed label bound
/// as a tooltip.
pub fn to_leaflet_page(scene: &DriveScene) -> String {
    PAGE_TEMPLATE
        .replace("__TITLE__", &page_title(&scene.label))
        .replace("__GEOJSON__", &to_geojson_string(scene))
}

fn page_title(label: &str) -> String {
    let safe: String = label
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&'))
        .collect();
    format!("Drive {}", safe)
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const drive = __GEOJSON__;
const map = L.map("map");
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
const layer = L.geoJSON(drive, {
    style: f => ({ color: f.properties["stroke"], weight: f.properties["stroke-width"] }),
    onEachFeature: (f, l) => l.bindTooltip(f.properties["text"], { sticky: true })
}).addTo(map);
if (drive.features.length > 0) {
    map.fitBounds(layer.getBounds());
} else {
    map.setView([0, 0], 2);
}
</script>
</body>
</html>
"#;

#[cfg(test)]
fn example_scene() -> DriveScene {
    let raw = "2021-01-01 08:00:00 (40.0, -75.0) \
               => 2021-01-01 09:00:00 (40.5, -75.0) \
               => 2021-01-01 09:30:00 (40.6, -75.2)";
    let drive = crate::drive::Drive::from_route("17", raw).unwrap();
    DriveScene::build(&drive).unwrap()
}

#[test]
fn one_feature_per_trace_with_style_properties() {
    let collection = to_feature_collection(&example_scene());
    assert_eq!(collection.features.len(), 2);

    let feature = &collection.features[0];
    let properties = feature.properties.as_ref().unwrap();
    assert_eq!(properties["text"], json!("56km/h"));
    assert_eq!(properties["stroke"], json!("red"));
    assert_eq!(properties["stroke-width"], json!(1.0));

    match &feature.geometry.as_ref().unwrap().value {
        Value::LineString(coords) => {
            assert_eq!(coords, &vec![vec![-75.0, 40.0], vec![-75.0, 40.5]]);
        }
        other => panic!("expected a LineString, got {:?}", other),
    }
}

#[test]
fn geojson_string_round_trips_through_serde() {
    let raw = to_geojson_string(&example_scene());
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["type"], json!("FeatureCollection"));
    assert_eq!(parsed["features"].as_array().unwrap().len(), 2);
}

#[test]
fn leaflet_page_embeds_the_drive() {
    let page = to_leaflet_page(&example_scene());
    assert!(page.contains("<title>Drive 17</title>"));
    assert!(page.contains("\"FeatureCollection\""));
    assert!(page.contains("56km/h"));
    assert!(!page.contains("__GEOJSON__"));
}
