use scene::SessionConfig;
use serde::{Deserialize, Serialize};

/// Widget settings. Every field is optional in the JSON handed to
/// `start_widget`; missing ones keep the values below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Id of the element the map renders into.
    pub container: String,
    /// Dotted path to a style object on the page (e.g. a style registry
    /// loaded by a script tag), or a style URL.
    pub map_style: String,
    pub max_zoom: f64,
    /// Dotted path to a map-style selector control constructor, if the page
    /// provides one.
    pub map_selector: Option<String>,
    /// `tracing` filter directives, e.g. `"info"` or `"scene=debug,info"`.
    pub log_filter: String,
    #[serde(flatten)]
    pub session: SessionConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            map_style: "CarteFacile.mapStyles.simple".to_string(),
            max_zoom: 18.9,
            map_selector: Some("CarteFacile.MapSelectorControl".to_string()),
            log_filter: "info".to_string(),
            session: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "widget config is not valid JSON: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "widget config rejected: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl WidgetConfig {
    /// Parses optional JSON text; `None` or blank text yields the defaults.
    pub fn from_json(text: Option<&str>) -> Result<Self, ConfigError> {
        let config = match text.map(str::trim) {
            None | Some("") => WidgetConfig::default(),
            Some(text) => {
                serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.container.trim().is_empty() {
            return Err(ConfigError::Invalid("container is empty".to_string()));
        }
        if self.map_style.trim().is_empty() {
            return Err(ConfigError::Invalid("map_style is empty".to_string()));
        }
        if !(self.max_zoom > 0.0 && self.max_zoom <= 24.0) {
            return Err(ConfigError::Invalid(format!(
                "max_zoom {} outside (0, 24]",
                self.max_zoom
            )));
        }
        let palette = &self.session.palette;
        if palette.default_color.is_empty() || palette.selected_color.is_empty() {
            return Err(ConfigError::Invalid("marker colours must be set".to_string()));
        }
        for fit in [&self.session.fit, &self.session.recenter] {
            if fit.padding < 0.0 {
                return Err(ConfigError::Invalid("fit padding is negative".to_string()));
            }
        }
        Ok(())
    }
}
