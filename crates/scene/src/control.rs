use foundation::LngLatBounds;

/// Button placement and markup shared with the map library's own controls.
pub const CONTAINER_CLASS: &str = "maplibregl-ctrl maplibregl-ctrl-group";
pub const BUTTON_CLASS: &str = "maplibregl-ctrl-icon fit-bounds-btn";
pub const BUTTON_TITLE: &str = "Recentrer sur les données";
pub const POSITION: &str = "top-right";

/// "Recenter on the data" map control.
///
/// Holds the envelope of the latest table load. Activating the button replays
/// that envelope; it is never recomputed from the markers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecenterControl {
    bounds: Option<LngLatBounds>,
    attached: bool,
}

impl RecenterControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, bounds: Option<LngLatBounds>) {
        self.bounds = bounds;
    }

    pub fn on_add(&mut self) {
        self.attached = true;
    }

    pub fn on_remove(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Bounds to fit when the button is pressed, if any.
    pub fn activate(&self) -> Option<LngLatBounds> {
        if !self.attached {
            return None;
        }
        self.bounds
    }
}
