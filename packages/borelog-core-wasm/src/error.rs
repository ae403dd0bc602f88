use std::fmt;

use wasm_bindgen::JsValue;

/// Error taxonomy for the engine.
///
/// `Load` and `Parse` are fatal to initialization: the engine is never
/// constructed from partial data, because the index treats an absent
/// location id as "no data" and a half-loaded dataset would silently
/// masquerade as boreholes without tests. `Record` is raised at
/// composition time for malformed records and names the offending
/// location and field rather than dropping the record.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Load { source: String, detail: String },
    Parse { doc: &'static str, detail: String },
    Record { uid: String, field: &'static str, detail: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Load { source, detail } => {
                write!(f, "Failed to load {}: {}", source, detail)
            }
            EngineError::Parse { doc, detail } => {
                write!(f, "Failed to parse {}: {}", doc, detail)
            }
            EngineError::Record { uid, field, detail } => {
                write!(f, "Bad record for location {}: {} {}", uid, field, detail)
            }
        }
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
