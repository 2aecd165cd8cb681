use serde::{Deserialize, Serialize};

/// Semantic role names, as registered with the host.
pub const TITLE: &str = "Titre";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
}

/// One entry of the host's column-mapping negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRequirement {
    pub name: String,
    pub title: String,
    pub optional: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    pub description: String,
    pub allow_multiple: bool,
}

impl ColumnRequirement {
    fn required(name: &str, title: &str, column_type: Option<ColumnType>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            optional: false,
            column_type,
            description: description.to_string(),
            allow_multiple: false,
        }
    }
}

/// Payload of the host `ready` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyOptions {
    pub required_access: String,
    pub columns: Vec<ColumnRequirement>,
    /// Lets other widgets use this one as their selection source.
    pub allow_select_by: bool,
}

impl Default for ReadyOptions {
    fn default() -> Self {
        Self {
            required_access: "read table".to_string(),
            columns: required_columns(),
            allow_select_by: true,
        }
    }
}

/// The three columns every row must map to be drawn, in declaration order.
pub fn required_columns() -> Vec<ColumnRequirement> {
    vec![
        ColumnRequirement::required(
            TITLE,
            "Libellé",
            None,
            "Valeur ou libellé de l'objet géoréférencé",
        ),
        ColumnRequirement::required(LATITUDE, "Latitude", Some(ColumnType::Numeric), "Latitude"),
        ColumnRequirement::required(LONGITUDE, "Longitude", Some(ColumnType::Numeric), "Longitude"),
    ]
}
