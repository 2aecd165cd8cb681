use serde::{Deserialize, Serialize};

/// Marker fill colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerPalette {
    pub default_color: String,
    pub selected_color: String,
}

impl MarkerPalette {
    pub fn color_for(&self, selected: bool) -> &str {
        if selected {
            &self.selected_color
        } else {
            &self.default_color
        }
    }
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            default_color: "#0070C0".to_string(),
            selected_color: "#548235".to_string(),
        }
    }
}

/// Popup placement shared by the click and hover popups of a marker.
///
/// The click popup only takes `offset`; the hover popup takes everything so it
/// opens exactly where the click popup would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    /// Pixels between the marker anchor and the popup tip.
    pub offset: f64,
    pub anchor: String,
    pub max_width: String,
    pub class_name: String,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            offset: 25.0,
            anchor: "bottom".to_string(),
            max_width: "240px".to_string(),
            class_name: "maplibregl-popup".to_string(),
        }
    }
}

/// Camera animation parameters for a bounds fit.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub padding: f64,
    pub max_zoom: Option<f64>,
    pub duration_ms: u32,
}

impl FitOptions {
    pub const MAX_ZOOM: f64 = 18.9;

    /// Used when a table load lands on the map.
    pub const fn initial() -> Self {
        Self {
            padding: 75.0,
            max_zoom: Some(Self::MAX_ZOOM),
            duration_ms: 1000,
        }
    }

    /// Used by the recenter button: no zoom cap, the surface's own max zoom applies.
    pub const fn recenter() -> Self {
        Self {
            padding: 75.0,
            max_zoom: None,
            duration_ms: 1000,
        }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_picks_colour_by_state() {
        let p = MarkerPalette::default();
        assert_eq!(p.color_for(true), "#548235");
        assert_eq!(p.color_for(false), "#0070C0");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let fit: FitOptions = serde_json::from_str(r#"{"padding": 20}"#).unwrap();
        assert_eq!(fit.padding, 20.0);
        assert_eq!(fit.max_zoom, Some(FitOptions::MAX_ZOOM));
        assert_eq!(fit.duration_ms, 1000);
    }
}
