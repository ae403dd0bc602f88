// Keyed lookup over the two subsurface documents. Built once at load
// time and read-only afterwards; an explicit value owned by the engine,
// not module state.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::records::{StratigraphyLayer, TestReading};

/// Index of per-location subsurface records. Lookup of a location_uid
/// absent from either document returns an empty slice: "no data" is a
/// normal state for a borehole, never an error. Only a failed load may
/// report a problem, and that happens before this index exists.
#[derive(Debug)]
pub struct SubsurfaceIndex {
    readings: HashMap<String, Vec<TestReading>>,
    layers: HashMap<String, Vec<StratigraphyLayer>>,
}

impl SubsurfaceIndex {
    /// Build the index from the two JSON documents
    /// (`location_uid -> [records]`). Record order within a location is
    /// preserved as delivered; the export pipeline orders by depth.
    pub fn build(readings_json: &str, layers_json: &str) -> Result<SubsurfaceIndex, EngineError> {
        let readings: HashMap<String, Vec<TestReading>> = serde_json::from_str(readings_json)
            .map_err(|e| EngineError::Parse {
                doc: "test readings",
                detail: e.to_string(),
            })?;
        let layers: HashMap<String, Vec<StratigraphyLayer>> = serde_json::from_str(layers_json)
            .map_err(|e| EngineError::Parse {
                doc: "stratigraphy layers",
                detail: e.to_string(),
            })?;
        Ok(SubsurfaceIndex { readings, layers })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        readings: HashMap<String, Vec<TestReading>>,
        layers: HashMap<String, Vec<StratigraphyLayer>>,
    ) -> SubsurfaceIndex {
        SubsurfaceIndex { readings, layers }
    }

    pub fn readings_for(&self, location_uid: &str) -> &[TestReading] {
        self.readings
            .get(location_uid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn layers_for(&self, location_uid: &str) -> &[StratigraphyLayer] {
        self.layers
            .get(location_uid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of locations with at least one test reading.
    pub fn reading_location_count(&self) -> usize {
        self.readings.len()
    }

    /// Number of locations with at least one stratigraphy layer.
    pub fn layer_location_count(&self) -> usize {
        self.layers.len()
    }
}
