use super::view_state::Orbit;
use serde::Serialize;

/// Bottom offcanvas label shown once any orbit is active.
pub const BOTTOM_LABEL_ID: &str = "offcanvasBottomLabel";
/// Instrument detail panel.
pub const DETAIL_PANEL_ID: &str = "canvas3";
pub const INIT_MARKER_ID: &str = "INIT";

const ORBIT_LABEL_IDS: [(Orbit, &str); 4] = [
    (Orbit::A, "orbit-a"),
    (Orbit::B, "orbit-b"),
    (Orbit::C, "orbit-c"),
    (Orbit::D, "orbit-d"),
];

const ORBIT_MARKER_IDS: [(Orbit, &str); 4] = [
    (Orbit::A, "OA"),
    (Orbit::B, "OB"),
    (Orbit::C, "OC"),
    (Orbit::D, "OD"),
];

/// Host page element visibility for one view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiVisibility {
    pub visible: Vec<&'static str>,
    pub hidden: Vec<&'static str>,
}

impl UiVisibility {
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|v| *v == id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.iter().any(|h| *h == id)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "visible": self.visible,
            "hidden": self.hidden,
        })
    }
}

/// Which host elements are visible for `orbit`.
///
/// The detail panel is left untouched by orbit changes; it is only shown at
/// startup and by instrument picks.
pub fn ui_visibility(orbit: Orbit) -> UiVisibility {
    let mut visible = Vec::new();
    let mut hidden = Vec::new();

    if orbit == Orbit::Init {
        visible.extend([DETAIL_PANEL_ID, INIT_MARKER_ID]);
        hidden.push(BOTTOM_LABEL_ID);
        hidden.extend(ORBIT_LABEL_IDS.iter().map(|(_, id)| *id));
        hidden.extend(ORBIT_MARKER_IDS.iter().map(|(_, id)| *id));
        return UiVisibility { visible, hidden };
    }

    visible.push(BOTTOM_LABEL_ID);
    for (candidate, id) in ORBIT_LABEL_IDS.iter().chain(ORBIT_MARKER_IDS.iter()) {
        if *candidate == orbit {
            visible.push(*id);
        } else {
            hidden.push(*id);
        }
    }
    hidden.push(INIT_MARKER_ID);

    UiVisibility { visible, hidden }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_shows_intro_and_hides_orbit_markers() {
        let ui = ui_visibility(Orbit::Init);
        assert!(ui.is_visible("INIT"));
        assert!(ui.is_visible("canvas3"));
        assert!(ui.is_hidden("offcanvasBottomLabel"));
        for id in ["OA", "OB", "OC", "OD"] {
            assert!(ui.is_hidden(id));
        }
    }

    #[test]
    fn orbit_a_highlights_only_its_own_elements() {
        let ui = ui_visibility(Orbit::A);
        assert!(ui.is_visible("orbit-a"));
        assert!(ui.is_visible("OA"));
        assert!(ui.is_visible("offcanvasBottomLabel"));
        assert!(ui.is_hidden("INIT"));
        for id in ["orbit-b", "orbit-c", "orbit-d", "OB", "OC", "OD"] {
            assert!(ui.is_hidden(id), "{id} should be hidden");
        }
        assert!(!ui.is_visible("canvas3") && !ui.is_hidden("canvas3"));
    }

    #[test]
    fn no_element_is_both_visible_and_hidden() {
        for orbit in [Orbit::Init, Orbit::A, Orbit::B, Orbit::C, Orbit::D] {
            let ui = ui_visibility(orbit);
            for id in &ui.visible {
                assert!(!ui.is_hidden(id));
            }
        }
    }
}
