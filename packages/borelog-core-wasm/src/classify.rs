// Classification of AGS categorical codes into colors and display names.
// Both lookups are total: real-world AGS files carry hole types and
// geology legend codes outside any fixed table, so a miss always falls
// back to a defined style instead of failing.

use serde::Serialize;

/// Color and full display name for one hole-type code.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoleTypeStyle {
    pub color: &'static str,
    pub name: &'static str,
}

/// Colors and full names for the hole types in our AGS files.
const HOLE_TYPE_TABLE: &[(&str, HoleTypeStyle)] = &[
    (
        "SCP",
        HoleTypeStyle { color: "#e31a1c", name: "Standard Penetration Test" },
    ),
    (
        "CP+RO+RC",
        HoleTypeStyle { color: "#1f78b4", name: "CPT + Rotary Open + Rotary Cored" },
    ),
    (
        "CP+RC+RO",
        HoleTypeStyle { color: "#1f78b4", name: "CPT + Rotary Cored + Rotary Open" },
    ),
    (
        "CP+RO",
        HoleTypeStyle { color: "#33a02c", name: "CPT + Rotary Open" },
    ),
    (
        "RO+CP",
        HoleTypeStyle { color: "#33a02c", name: "Rotary Open + CPT" },
    ),
    (
        "VC",
        HoleTypeStyle { color: "#ff7f0e", name: "Vibro Core" },
    ),
];

/// Style used for any hole-type code not in the table.
pub const HOLE_TYPE_FALLBACK: HoleTypeStyle =
    HoleTypeStyle { color: "#999999", name: "Unknown" };

/// Soil colors keyed by material code prefix. First match wins, so if a
/// future code ever matches more than one prefix the earlier entry
/// takes it.
const SOIL_PREFIX_TABLE: &[(&str, &str)] = &[
    ("SAND", "#fdae61"),    // orange-yellow
    ("CLAY", "#8c510a"),    // brown
    ("SILT", "#ffffbf"),    // pale yellow
    ("GRAV", "#999999"),    // grey
    ("GRANITE", "#e6a0c4"), // pink (common for granite in logs)
];

/// Fill used for geology codes matching no known prefix.
pub const SOIL_FALLBACK_COLOR: &str = "black";

/// Look up the style for a hole-type code. Exact match against the
/// known table; unknown codes get the fallback color and the "Unknown"
/// display name.
pub fn hole_type_style(code: &str) -> HoleTypeStyle {
    HOLE_TYPE_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, style)| *style)
        .unwrap_or(HOLE_TYPE_FALLBACK)
}

/// Classify a geology legend code by prefix (e.g. "SAND-fine" is SAND).
pub fn soil_color(code: &str) -> &'static str {
    SOIL_PREFIX_TABLE
        .iter()
        .find(|(prefix, _)| code.starts_with(prefix))
        .map(|(_, color)| *color)
        .unwrap_or(SOIL_FALLBACK_COLOR)
}

/// One legend row, in table declaration order.
#[derive(Serialize, Clone, Debug)]
pub struct LegendEntry {
    pub code: &'static str,
    pub color: &'static str,
    pub name: &'static str,
}

/// The hole-type table as legend rows for the frontend's legend widget.
pub fn legend_entries() -> Vec<LegendEntry> {
    HOLE_TYPE_TABLE
        .iter()
        .map(|(code, style)| LegendEntry {
            code,
            color: style.color,
            name: style.name,
        })
        .collect()
}

/// Build the MapLibre `match` expression that colors the point layer by
/// hole type. Every known code maps to its configured color and the
/// trailing value is the fallback for anything unexpected.
pub fn hole_type_match_expression() -> serde_json::Value {
    let mut expr = vec![
        serde_json::json!("match"),
        serde_json::json!(["get", "HOLE_TYPE"]),
    ];
    for (code, style) in HOLE_TYPE_TABLE {
        expr.push(serde_json::json!(code));
        expr.push(serde_json::json!(style.color));
    }
    expr.push(serde_json::json!(HOLE_TYPE_FALLBACK.color));
    serde_json::Value::Array(expr)
}
