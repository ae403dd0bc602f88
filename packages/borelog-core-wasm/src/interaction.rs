// Interaction Controller: the one stateful piece of the engine. Pointer
// and click events on the rendered point layer come in from the map
// widget; side effects go back out as plain values (cursor commands and
// popup requests) because the widget itself lives on the JS side.

use serde::Serialize;

use crate::classify::hole_type_style;
use crate::error::EngineError;
use crate::index::SubsurfaceIndex;
use crate::profile::{compose_profile, ProfileSpec};
use crate::records::Borehole;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Hovering,
    PopupOpen,
}

/// Cursor affordance the frontend should apply to the map canvas.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CursorChange {
    Pointer,
    Default,
}

impl CursorChange {
    /// CSS cursor value; the default is the empty string so the canvas
    /// reverts to the map widget's own cursor.
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorChange::Pointer => "pointer",
            CursorChange::Default => "",
        }
    }
}

/// Formatted fields for the popup's info panel.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PanelInfo {
    pub title: String,
    pub type_name: String,
    pub ground_level: String,
    pub coordinates: String,
    pub date_range: String,
    pub remarks: String,
}

impl PanelInfo {
    pub fn from_borehole(borehole: &Borehole) -> PanelInfo {
        let props = &borehole.properties;
        let style = hole_type_style(props.hole_type.as_deref().unwrap_or(""));

        let date_range = match (props.start_date.as_deref(), props.end_date.as_deref()) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            (Some(start), None) => start.to_string(),
            (None, _) => "N/A".to_string(),
        };

        PanelInfo {
            title: format!(
                "Borehole: {}",
                props.hole_id.as_deref().unwrap_or("Unknown")
            ),
            type_name: style.name.to_string(),
            ground_level: props
                .egm2008_ground_level_height
                .map(|h| format!("{:.2} m", h))
                .unwrap_or_else(|| "N/A".to_string()),
            coordinates: format!(
                "{:.6}, {:.6}",
                borehole.position.x(),
                borehole.position.y()
            ),
            date_range,
            remarks: props.remarks.clone().unwrap_or_else(|| "None".to_string()),
        }
    }
}

/// Everything the frontend needs to open one popup: where to anchor it,
/// the formatted panel, and the composed depth profile.
#[derive(Serialize, Clone, Debug)]
pub struct PopupRequest {
    pub lnglat: [f64; 2],
    /// Always true: the controller owns a single active popup, so the
    /// frontend must close the previous handle before anchoring this
    /// one.
    pub close_previous: bool,
    /// Monotonic id of this popup, for the frontend to tag its handle.
    pub generation: u64,
    pub panel: PanelInfo,
    pub profile: ProfileSpec,
}

/// State machine over {Idle, Hovering, PopupOpen}. Clicks are accepted
/// from any state; a click on empty map area never reaches the
/// controller (the map widget only forwards events scoped to the point
/// layer) and popup dismissal is the widget's own close affordance.
pub struct InteractionController {
    state: InteractionState,
    popup_generation: u64,
}

impl InteractionController {
    pub fn new() -> InteractionController {
        InteractionController {
            state: InteractionState::Idle,
            popup_generation: 0,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn pointer_enter(&mut self) -> CursorChange {
        self.state = InteractionState::Hovering;
        CursorChange::Pointer
    }

    pub fn pointer_leave(&mut self) -> CursorChange {
        self.state = InteractionState::Idle;
        CursorChange::Default
    }

    pub fn click(
        &mut self,
        borehole: &Borehole,
        index: &SubsurfaceIndex,
    ) -> Result<PopupRequest, EngineError> {
        let profile = compose_profile(&borehole.properties.location_uid, index)?;
        self.state = InteractionState::PopupOpen;
        self.popup_generation += 1;
        Ok(PopupRequest {
            lnglat: [borehole.position.x(), borehole.position.y()],
            close_previous: true,
            generation: self.popup_generation,
            panel: PanelInfo::from_borehole(borehole),
            profile,
        })
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        InteractionController::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Borehole, BoreholeProperties};
    use geo_types::Point;

    fn borehole(hole_type: Option<&str>) -> Borehole {
        Borehole {
            properties: BoreholeProperties {
                location_uid: "BH-001".to_string(),
                hole_id: Some("KT/BH/001".to_string()),
                hole_type: hole_type.map(String::from),
                start_date: Some("1998-03-02".to_string()),
                end_date: Some("1998-03-10".to_string()),
                remarks: None,
                egm2008_ground_level_height: Some(4.517),
            },
            position: Point::new(114.211234, 22.312987),
        }
    }

    fn empty_index() -> SubsurfaceIndex {
        SubsurfaceIndex::build("{}", "{}").unwrap()
    }

    #[test]
    fn hover_transitions_change_cursor_and_back() {
        let mut controller = InteractionController::new();
        assert_eq!(controller.state(), InteractionState::Idle);

        let enter = controller.pointer_enter();
        assert_eq!(controller.state(), InteractionState::Hovering);
        assert_eq!(enter.as_css(), "pointer");

        let leave = controller.pointer_leave();
        assert_eq!(controller.state(), InteractionState::Idle);
        assert_eq!(leave.as_css(), "");
    }

    #[test]
    fn click_opens_popup_from_any_state() {
        let mut controller = InteractionController::new();
        let bh = borehole(Some("SCP"));
        let index = empty_index();

        controller.click(&bh, &index).unwrap();
        assert_eq!(controller.state(), InteractionState::PopupOpen);

        // A second click while a popup is open replaces it.
        let second = controller.click(&bh, &index).unwrap();
        assert_eq!(controller.state(), InteractionState::PopupOpen);
        assert!(second.close_previous);
        assert_eq!(second.generation, 2);
    }

    #[test]
    fn panel_formats_full_attribute_set() {
        let panel = PanelInfo::from_borehole(&borehole(Some("SCP")));
        assert_eq!(panel.title, "Borehole: KT/BH/001");
        assert_eq!(panel.type_name, "Standard Penetration Test");
        assert_eq!(panel.ground_level, "4.52 m");
        assert_eq!(panel.coordinates, "114.211234, 22.312987");
        assert_eq!(panel.date_range, "1998-03-02 - 1998-03-10");
        assert_eq!(panel.remarks, "None");
    }

    #[test]
    fn panel_handles_absent_fields_without_failing() {
        let mut bh = borehole(Some("XYZ"));
        bh.properties.hole_id = None;
        bh.properties.end_date = None;
        bh.properties.egm2008_ground_level_height = None;

        let panel = PanelInfo::from_borehole(&bh);
        assert_eq!(panel.title, "Borehole: Unknown");
        // Unknown hole type gets the hardened fallback name, not a crash
        assert_eq!(panel.type_name, "Unknown");
        assert_eq!(panel.ground_level, "N/A");
        assert_eq!(panel.date_range, "1998-03-02");

        bh.properties.hole_type = None;
        assert_eq!(PanelInfo::from_borehole(&bh).type_name, "Unknown");
    }

    #[test]
    fn popup_request_anchors_at_the_borehole_position() {
        let mut controller = InteractionController::new();
        let request = controller.click(&borehole(Some("VC")), &empty_index()).unwrap();
        assert!((request.lnglat[0] - 114.211234).abs() < 1e-9);
        assert!((request.lnglat[1] - 22.312987).abs() < 1e-9);
    }
}
