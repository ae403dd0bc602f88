// Data model for the AGS-derived documents produced by the bedrock-ge
// export pipeline: one GeoJSON point collection for locations, and two
// JSON documents mapping location_uid to record arrays.

use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Attributes carried by one location feature. Field names follow the
/// AGS HOLE group; everything except the join key can be absent in real
/// files.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BoreholeProperties {
    pub location_uid: String,
    #[serde(rename = "HOLE_ID", default)]
    pub hole_id: Option<String>,
    #[serde(rename = "HOLE_TYPE", default)]
    pub hole_type: Option<String>,
    #[serde(rename = "HOLE_STAR", default)]
    pub start_date: Option<String>,
    #[serde(rename = "HOLE_ENDD", default)]
    pub end_date: Option<String>,
    #[serde(rename = "HOLE_REM", default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub egm2008_ground_level_height: Option<f64>,
}

/// One Standard Penetration Test reading (AGS ISPT group).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TestReading {
    #[serde(default)]
    pub location_uid: Option<String>,
    #[serde(rename = "ISPT_TOP")]
    pub depth_top: f64,
    #[serde(rename = "ISPT_NVAL")]
    pub value: f64,
}

/// One stratigraphy interval (AGS GEOL group). Layers for a location
/// arrive ordered by depth_to_top and are assumed contiguous; the
/// composer renders them in document order.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StratigraphyLayer {
    #[serde(default)]
    pub location_uid: Option<String>,
    pub depth_to_top: f64,
    pub depth_to_base: f64,
    #[serde(rename = "GEOL_LEG")]
    pub legend_code: String,
    #[serde(rename = "GEOL_DESC", default)]
    pub description: Option<String>,
}

/// A borehole location: attributes plus its WGS84 ground-level point.
#[derive(Clone, Debug)]
pub struct Borehole {
    pub properties: BoreholeProperties,
    pub position: Point<f64>,
}

// GeoJSON-like feature structures, parsed directly with serde rather
// than through a geojson crate.
#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: FeatureGeometry,
    properties: BoreholeProperties,
}

#[derive(Deserialize)]
struct FeatureGeometry {
    r#type: String,
    coordinates: Vec<f64>,
}

/// Parse the locations GeoJSON into boreholes. Only point features are
/// valid: the export pipeline emits ground-level points, and skipping a
/// malformed feature would leave a clickable location with no backing
/// data.
pub fn parse_locations(geojson: &str) -> Result<Vec<Borehole>, EngineError> {
    let collection: FeatureCollection =
        serde_json::from_str(geojson).map_err(|e| EngineError::Parse {
            doc: "locations geojson",
            detail: e.to_string(),
        })?;

    let mut boreholes = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        if feature.geometry.r#type != "Point" || feature.geometry.coordinates.len() < 2 {
            return Err(EngineError::Parse {
                doc: "locations geojson",
                detail: format!(
                    "expected Point geometry for location {}, got {}",
                    feature.properties.location_uid, feature.geometry.r#type
                ),
            });
        }
        let lng = feature.geometry.coordinates[0];
        let lat = feature.geometry.coordinates[1];
        boreholes.push(Borehole {
            properties: feature.properties,
            position: Point::new(lng, lat),
        });
    }
    Ok(boreholes)
}
