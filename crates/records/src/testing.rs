//! Column resolution stand-in for tests: `role -> column` assignments applied
//! the way the host applies them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::columns::{LATITUDE, LONGITUDE, TITLE};
use crate::record::{ColumnNames, Record};

#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: BTreeMap<String, String>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: &str, column: &str) -> Self {
        self.columns.insert(role.to_string(), column.to_string());
        self
    }
}

impl ColumnNames for ColumnMap {
    fn map_column_names(&self, record: &Record) -> Option<Value> {
        let complete = [TITLE, LATITUDE, LONGITUDE]
            .iter()
            .all(|role| self.columns.contains_key(*role));
        if !complete {
            return None;
        }
        let mut out = Map::new();
        for (role, column) in &self.columns {
            if let Some(v) = record.fields.get(column) {
                out.insert(role.clone(), v.clone());
            }
        }
        Some(Value::Object(out))
    }
}
