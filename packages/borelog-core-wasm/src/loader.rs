// Startup loading: the three documents are fetched through the JS
// helper and fully awaited before the engine exists. A failed fetch or
// parse is fatal and reported once; the engine is never built from
// partial data, so "absent from the index" always means "this borehole
// has no records" and never "the file didn't arrive".

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::EngineError;
use crate::{console, console_log, fetch_text, BoreholeEngine};

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Fetch one URL to completion and return its text body.
pub async fn fetch_document(url: &str) -> Result<String, EngineError> {
    let promise = fetch_text(url).map_err(|e| EngineError::Load {
        source: url.to_string(),
        detail: js_detail(&e),
    })?;
    let result = JsFuture::from(promise).await.map_err(|e| EngineError::Load {
        source: url.to_string(),
        detail: js_detail(&e),
    })?;
    result.as_string().ok_or_else(|| EngineError::Load {
        source: url.to_string(),
        detail: "response body was not text".to_string(),
    })
}

/// Fetch the readings, stratigraphy, and locations documents and build
/// the engine. Rejects once with the load error; callers must not
/// initialize the map layer when this fails.
#[wasm_bindgen]
pub async fn load_engine(
    readings_url: String,
    layers_url: String,
    locations_url: String,
) -> Result<BoreholeEngine, JsValue> {
    console_log!(
        "Loading borehole datasets: {} {} {}",
        readings_url,
        layers_url,
        locations_url
    );

    let load = async {
        let readings = fetch_document(&readings_url).await?;
        let layers = fetch_document(&layers_url).await?;
        let locations = fetch_document(&locations_url).await?;
        BoreholeEngine::build(&readings, &layers, &locations)
    };

    match load.await {
        Ok(engine) => {
            console_log!(
                "Engine ready: {} locations indexed",
                engine.feature_count()
            );
            Ok(engine)
        }
        Err(err) => {
            // Surface the failure once; the promise rejection carries
            // the same message to the caller.
            console::error(&err.to_string());
            Err(err.into())
        }
    }
}
