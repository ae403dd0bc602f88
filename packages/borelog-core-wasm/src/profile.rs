// Profile Composer: assembles the layered depth-profile chart for one
// borehole from its stratigraphy and (optional) test readings. The
// output is a mark list plus an explicit axis/size configuration that
// the frontend hands to its plot assembler.

use serde::Serialize;

use crate::classify::soil_color;
use crate::error::EngineError;
use crate::index::SubsurfaceIndex;

/// Chart width when the reading overlay (and its value axis) is shown.
pub const WIDE_WIDTH: u32 = 300;
/// Chart width for a stratigraphy-only column.
pub const NARROW_WIDTH: u32 = 100;
/// Fixed value-axis domain used whenever readings are present, so SPT
/// charts are comparable across boreholes.
pub const READING_DOMAIN: [f64; 2] = [0.0, 100.0];

/// Chart mark primitives understood by the plot assembler.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "mark", rename_all = "lowercase")]
pub enum Mark {
    /// Filled soil-column cell spanning [y1, y2] on the depth axis.
    Rect {
        y1: f64,
        y2: f64,
        fill: String,
        title: String,
    },
    /// Material code label centered in its layer.
    Text { y: f64, text: String, fill: String },
    Frame,
    /// Reading overlay; points are [value, depth_top] pairs.
    Line { points: Vec<[f64; 2]>, clip: bool },
    Dot { points: Vec<[f64; 2]>, clip: bool },
}

/// Axis and size configuration. Every field has a defined default so
/// the chart never depends on conditionally-present keys; the composer
/// only overrides `x_domain` and `width`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub grid: bool,
    /// Depth grows downward: the vertical axis is always reversed so a
    /// layer with the larger depth_to_base renders lower on screen.
    pub y_reverse: bool,
    pub x_domain: Option<[f64; 2]>,
    pub width: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            grid: true,
            y_reverse: true,
            x_domain: None,
            width: NARROW_WIDTH,
        }
    }
}

/// A renderable depth profile: configuration plus marks in draw order.
#[derive(Serialize, Clone, Debug)]
pub struct ProfileSpec {
    pub config: ProfileConfig,
    pub marks: Vec<Mark>,
}

fn finite(
    value: f64,
    uid: &str,
    field: &'static str,
) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::Record {
            uid: uid.to_string(),
            field,
            detail: format!("is not a finite number ({})", value),
        })
    }
}

/// Compose the depth profile for one location.
///
/// Stratigraphy layers become rect + centered text marks in data order
/// (overlapping layers are not re-ordered); readings, when present,
/// overlay a clipped line + dot series and switch the chart to the wide
/// layout with the fixed value domain. A location with neither dataset
/// yields an empty-marks spec rather than a failure. A record with a
/// non-finite depth or value is reported, not skipped, since a dropped
/// layer would break the column's contiguity.
pub fn compose_profile(
    location_uid: &str,
    index: &SubsurfaceIndex,
) -> Result<ProfileSpec, EngineError> {
    let layers = index.layers_for(location_uid);
    let readings = index.readings_for(location_uid);

    let mut marks = Vec::with_capacity(layers.len() * 2 + 3);

    for layer in layers {
        let top = finite(layer.depth_to_top, location_uid, "depth_to_top")?;
        let base = finite(layer.depth_to_base, location_uid, "depth_to_base")?;
        marks.push(Mark::Rect {
            y1: top,
            y2: base,
            fill: soil_color(&layer.legend_code).to_string(),
            title: format!(
                "{} – {}\n{}",
                top,
                base,
                layer.description.as_deref().unwrap_or("")
            ),
        });
        marks.push(Mark::Text {
            y: top + (base - top) / 2.0,
            text: layer.legend_code.clone(),
            fill: "black".to_string(),
        });
    }

    marks.push(Mark::Frame);

    if !readings.is_empty() {
        let mut points = Vec::with_capacity(readings.len());
        for reading in readings {
            let depth = finite(reading.depth_top, location_uid, "ISPT_TOP")?;
            let value = finite(reading.value, location_uid, "ISPT_NVAL")?;
            // Out-of-span readings are plotted as-is; clipping to the
            // plot bounds is the renderer's job.
            points.push([value, depth]);
        }
        marks.push(Mark::Line {
            points: points.clone(),
            clip: true,
        });
        marks.push(Mark::Dot { points, clip: true });
    }

    let config = ProfileConfig {
        x_domain: if readings.is_empty() {
            None
        } else {
            Some(READING_DOMAIN)
        },
        width: if readings.is_empty() {
            NARROW_WIDTH
        } else {
            WIDE_WIDTH
        },
        ..ProfileConfig::default()
    };

    Ok(ProfileSpec { config, marks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_from(readings: &str, layers: &str) -> SubsurfaceIndex {
        SubsurfaceIndex::build(readings, layers).unwrap()
    }

    const THREE_LAYERS: &str = r#"{
        "BH-001": [
            {"depth_to_top": 0.0, "depth_to_base": 2.0, "GEOL_LEG": "SAND", "GEOL_DESC": "Fine sand"},
            {"depth_to_top": 2.0, "depth_to_base": 5.0, "GEOL_LEG": "CLAY", "GEOL_DESC": "Marine clay"},
            {"depth_to_top": 5.0, "depth_to_base": 9.0, "GEOL_LEG": "GRANITE", "GEOL_DESC": "HDG"}
        ]
    }"#;

    const READINGS: &str = r#"{
        "BH-001": [
            {"ISPT_TOP": 1.5, "ISPT_NVAL": 8},
            {"ISPT_TOP": 3.0, "ISPT_NVAL": 22},
            {"ISPT_TOP": 12.0, "ISPT_NVAL": 55}
        ]
    }"#;

    fn count_marks(spec: &ProfileSpec) -> (usize, usize, usize, usize) {
        let rects = spec.marks.iter().filter(|m| matches!(m, Mark::Rect { .. })).count();
        let texts = spec.marks.iter().filter(|m| matches!(m, Mark::Text { .. })).count();
        let lines = spec.marks.iter().filter(|m| matches!(m, Mark::Line { .. })).count();
        let dots = spec.marks.iter().filter(|m| matches!(m, Mark::Dot { .. })).count();
        (rects, texts, lines, dots)
    }

    #[test]
    fn stratigraphy_only_chart_is_narrow_with_free_domain() {
        let index = index_from("{}", THREE_LAYERS);
        let spec = compose_profile("BH-001", &index).unwrap();

        let (rects, texts, lines, dots) = count_marks(&spec);
        assert_eq!((rects, texts, lines, dots), (3, 3, 0, 0));
        assert_eq!(spec.config.width, NARROW_WIDTH);
        assert_eq!(spec.config.x_domain, None);
        assert!(spec.config.y_reverse);
    }

    #[test]
    fn readings_switch_to_wide_layout_with_fixed_domain() {
        let index = index_from(READINGS, THREE_LAYERS);
        let spec = compose_profile("BH-001", &index).unwrap();

        let (rects, texts, lines, dots) = count_marks(&spec);
        assert_eq!((rects, texts, lines, dots), (3, 3, 1, 1));
        assert_eq!(spec.config.width, WIDE_WIDTH);
        assert_eq!(spec.config.x_domain, Some([0.0, 100.0]));
    }

    #[test]
    fn layer_marks_follow_soil_classification_and_depth_span() {
        let index = index_from("{}", THREE_LAYERS);
        let spec = compose_profile("BH-001", &index).unwrap();

        match &spec.marks[0] {
            Mark::Rect { y1, y2, fill, title } => {
                assert_eq!((*y1, *y2), (0.0, 2.0));
                assert_eq!(fill, "#fdae61");
                assert!(title.contains("Fine sand"));
            }
            other => panic!("expected rect first, got {:?}", other),
        }
        // Label sits at the middle of its layer
        match &spec.marks[3] {
            Mark::Text { y, text, .. } => {
                assert!((*y - 3.5).abs() < 1e-9);
                assert_eq!(text, "CLAY");
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn reversed_axis_puts_deeper_layers_below_shallower_ones() {
        let index = index_from(READINGS, THREE_LAYERS);
        let spec = compose_profile("BH-001", &index).unwrap();
        assert!(spec.config.y_reverse);

        // With a reversed axis, larger depth_to_base means lower on
        // screen; the marks must keep the raw depths for that to hold.
        let bases: Vec<f64> = spec
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Rect { y2, .. } => Some(*y2),
                _ => None,
            })
            .collect();
        assert_eq!(bases, vec![2.0, 5.0, 9.0]);
    }

    #[test]
    fn reading_outside_stratigraphy_span_is_not_clamped() {
        let index = index_from(READINGS, THREE_LAYERS);
        let spec = compose_profile("BH-001", &index).unwrap();

        let points = spec
            .marks
            .iter()
            .find_map(|m| match m {
                Mark::Line { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        // Deepest reading (12m) sits below the 9m column base and stays
        assert_eq!(points[2], [55.0, 12.0]);
    }

    #[test]
    fn location_with_no_data_yields_empty_chart() {
        let index = index_from("{}", "{}");
        let spec = compose_profile("BH-404", &index).unwrap();
        assert_eq!(spec.marks, vec![Mark::Frame]);
        assert_eq!(spec.config.width, NARROW_WIDTH);
        assert_eq!(spec.config.x_domain, None);
    }

    #[test]
    fn non_finite_depth_is_reported_not_dropped() {
        use crate::records::TestReading;
        use std::collections::HashMap;

        // JSON itself cannot carry NaN, but records can arrive through
        // other construction paths; the composer still guards.
        let mut readings = HashMap::new();
        readings.insert(
            "BH-001".to_string(),
            vec![TestReading {
                location_uid: Some("BH-001".to_string()),
                depth_top: f64::NAN,
                value: 5.0,
            }],
        );
        let index = SubsurfaceIndex::from_parts(readings, HashMap::new());

        let err = compose_profile("BH-001", &index).unwrap_err();
        match err {
            EngineError::Record { uid, field, .. } => {
                assert_eq!(uid, "BH-001");
                assert_eq!(field, "ISPT_TOP");
            }
            other => panic!("expected Record error, got {:?}", other),
        }

        // A null depth never even builds an index.
        let layers = r#"{
            "BH-001": [
                {"depth_to_top": 0.0, "depth_to_base": null, "GEOL_LEG": "SAND"}
            ]
        }"#;
        assert!(SubsurfaceIndex::build("{}", layers).is_err());
    }
}
