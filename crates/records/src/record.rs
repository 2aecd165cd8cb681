use foundation::RowId;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A host row: stable id plus whatever columns the table has.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    pub id: RowId,
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawRecord {
    id: i64,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            id: RowId::new(raw.id),
            fields: raw.fields,
        }
    }
}

/// Resolves a row's columns into the widget's semantic roles.
///
/// Returns `None` when the user has not assigned every required role.
pub trait ColumnNames {
    fn map_column_names(&self, record: &Record) -> Option<Value>;
}
