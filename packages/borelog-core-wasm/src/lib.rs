use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

// Create a console module for logging
pub mod console;
// Classification of hole types and soil codes
mod classify;
// Error taxonomy
mod error;
// Subsurface data index
mod index;
// Interaction controller for the point layer
mod interaction;
// Startup document loading
mod loader;
// Shared response structures
mod models;
// Profile composer
mod profile;
// Data model for the AGS-derived documents
mod records;

use error::EngineError;
use index::SubsurfaceIndex;
use interaction::InteractionController;
use models::DatasetStats;
use records::Borehole;

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

#[wasm_bindgen]
extern "C" {
    // JavaScript helper that fetches a URL and resolves to its text body
    #[wasm_bindgen(js_namespace = wasmJsHelpers, catch)]
    pub fn fetch_text(url: &str) -> Result<js_sys::Promise, JsValue>;
}

// Use the macro from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => ($crate::console::log(&format!($($t)*)))
}

// Re-export the async loader entry point
pub use loader::load_engine;

use std::sync::Once;
static INIT: Once = Once::new();

// This sets up the wasm_bindgen start functionality
#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        // Set the panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("borelog core initialized");
    });
}

/// The engine owns the loaded boreholes, the subsurface index built
/// from the two record documents, and the interaction controller. It is
/// constructed explicitly after all documents are resident; nothing in
/// here is global.
#[wasm_bindgen]
pub struct BoreholeEngine {
    boreholes: Vec<Borehole>,
    index: SubsurfaceIndex,
    controller: InteractionController,
}

impl BoreholeEngine {
    /// Build the engine from already-fetched document text. Any parse
    /// failure is fatal: a partially loaded engine would misreport a
    /// missing dataset as "no data for this borehole".
    pub fn build(
        readings_json: &str,
        layers_json: &str,
        locations_geojson: &str,
    ) -> Result<BoreholeEngine, EngineError> {
        let index = SubsurfaceIndex::build(readings_json, layers_json)?;
        let boreholes = records::parse_locations(locations_geojson)?;
        Ok(BoreholeEngine {
            boreholes,
            index,
            controller: InteractionController::new(),
        })
    }

    fn borehole(&self, location_uid: &str) -> Option<&Borehole> {
        self.boreholes
            .iter()
            .find(|b| b.properties.location_uid == location_uid)
    }
}

#[wasm_bindgen]
impl BoreholeEngine {
    /// JS-facing constructor over pre-fetched document text; prefer
    /// `load_engine` which fetches and awaits all three documents.
    #[wasm_bindgen(js_name = fromDocuments)]
    pub fn from_documents(
        readings_json: &str,
        layers_json: &str,
        locations_geojson: &str,
    ) -> Result<BoreholeEngine, JsValue> {
        BoreholeEngine::build(readings_json, layers_json, locations_geojson).map_err(Into::into)
    }

    #[wasm_bindgen(js_name = featureCount)]
    pub fn feature_count(&self) -> usize {
        self.boreholes.len()
    }

    /// Counts of loaded locations and indexed record groups.
    #[wasm_bindgen(js_name = datasetStats)]
    pub fn dataset_stats(&self) -> Result<JsValue, JsValue> {
        let stats = DatasetStats {
            location_count: self.boreholes.len(),
            reading_location_count: self.index.reading_location_count(),
            layer_location_count: self.index.layer_location_count(),
        };
        Ok(to_value(&stats)?)
    }

    /// The `circle-color` match expression for the point layer's paint,
    /// keyed on HOLE_TYPE with a fallback for unmatched codes.
    #[wasm_bindgen(js_name = layerPaintExpression)]
    pub fn layer_paint_expression(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(&classify::hole_type_match_expression())?)
    }

    /// Hole-type legend rows in declaration order.
    pub fn legend(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(&classify::legend_entries())?)
    }

    /// Pointer entered the point layer; returns the CSS cursor to apply.
    #[wasm_bindgen(js_name = onPointerEnter)]
    pub fn on_pointer_enter(&mut self) -> String {
        self.controller.pointer_enter().as_css().to_string()
    }

    /// Pointer left the point layer; returns the CSS cursor to apply.
    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&mut self) -> String {
        self.controller.pointer_leave().as_css().to_string()
    }

    /// Click on a rendered point feature. Returns the popup request:
    /// anchor coordinates, formatted info panel, and the composed depth
    /// profile. The frontend closes its previous popup handle first
    /// (`close_previous` is always set).
    #[wasm_bindgen(js_name = onClick)]
    pub fn on_click(&mut self, location_uid: &str) -> Result<JsValue, JsValue> {
        let borehole = self
            .boreholes
            .iter()
            .find(|b| b.properties.location_uid == location_uid)
            .ok_or_else(|| {
                JsValue::from_str(&format!("Unknown location clicked: {}", location_uid))
            })?;
        let request = self.controller.click(borehole, &self.index)?;
        Ok(to_value(&request)?)
    }

    /// Compose the depth profile for one location without touching the
    /// interaction state.
    #[wasm_bindgen(js_name = profileFor)]
    pub fn profile_for(&self, location_uid: &str) -> Result<JsValue, JsValue> {
        let spec = profile::compose_profile(location_uid, &self.index)?;
        Ok(to_value(&spec)?)
    }
}
