use std::collections::BTreeMap;

use foundation::RowId;
use js_sys::Array;
use records::{ColumnNames, Record};
use scene::HostTable;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};

use crate::bindings::grist;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Copies a JavaScript value into JSON. `undefined` and `null` become `Null`.
pub fn to_json(value: &JsValue) -> Result<Value, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = js_sys::JSON::stringify(value)?.into();
    serde_json::from_str(&text).map_err(js_error)
}

pub fn from_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(js_error)?;
    js_sys::JSON::parse(&text)
}

/// Selection commands to the host table.
#[derive(Debug, Default, Copy, Clone)]
pub struct GristHost;

impl HostTable for GristHost {
    fn set_selected_rows(&self, rows: &[RowId]) {
        let ids: Array = rows
            .iter()
            .map(|id| JsValue::from_f64(id.get() as f64))
            .collect();
        if let Err(err) = grist::set_selected_rows(&ids) {
            warn!(error = ?err, "setSelectedRows failed");
        }
    }
}

/// Column resolution answered by the host, captured per row while the table
/// is read.
#[derive(Debug, Default, Clone)]
pub struct HostColumns {
    mapped: BTreeMap<RowId, Value>,
}

impl HostColumns {
    /// Folds `(row, resolved columns)` pairs into records.
    ///
    /// Rows that cannot be read at all (no integer id) are dropped here; rows
    /// that read but do not resolve are left for the feature builder to skip.
    pub fn collect<I>(rows: I) -> (Vec<Record>, HostColumns)
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let rows = rows.into_iter();
        let mut out = Vec::with_capacity(rows.size_hint().0);
        let mut columns = HostColumns::default();

        for (row, mapped) in rows {
            let record: Record = match serde_json::from_value(row) {
                Ok(r) => r,
                Err(err) => {
                    debug!(%err, "unreadable row dropped");
                    continue;
                }
            };
            if !mapped.is_null() {
                columns.mapped.insert(record.id, mapped);
            }
            out.push(record);
        }
        (out, columns)
    }
}

impl ColumnNames for HostColumns {
    fn map_column_names(&self, record: &Record) -> Option<Value> {
        self.mapped.get(&record.id).cloned()
    }
}

/// Reads the host's row array, asking the host to resolve each row's columns.
pub fn read_table(records: &JsValue) -> Result<(Vec<Record>, HostColumns), JsValue> {
    let rows: Array = records.clone().dyn_into()?;
    let mut pairs = Vec::with_capacity(rows.length() as usize);

    for (index, item) in rows.iter().enumerate() {
        let mapped = match grist::map_column_names(&item) {
            Ok(v) => to_json(&v)?,
            Err(err) => {
                warn!(index, error = ?err, "mapColumnNames failed");
                Value::Null
            }
        };
        pairs.push((to_json(&item)?, mapped));
    }
    Ok(HostColumns::collect(pairs))
}

/// Reads a single host row, if there is one.
pub fn read_record(record: &JsValue) -> Option<Record> {
    let value = to_json(record).ok()?;
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::HostColumns;
    use foundation::RowId;
    use pretty_assertions::assert_eq;
    use records::{ColumnNames, FeatureSet};
    use serde_json::{Value, json};

    fn mapped(title: &str, lat: f64, lon: f64) -> Value {
        json!({ "Titre": title, "Latitude": lat, "Longitude": lon })
    }

    #[test]
    fn rows_without_integer_id_are_dropped() {
        let (records, _) = HostColumns::collect([
            (json!({ "id": 1, "Nom": "Gare" }), mapped("Gare", 48.8, 2.3)),
            (json!({ "Nom": "sans id" }), mapped("x", 1.0, 1.0)),
            (json!({ "id": "7" }), mapped("y", 1.0, 1.0)),
            (json!(null), Value::Null),
        ]);
        let ids: Vec<RowId> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RowId::new(1)]);
    }

    #[test]
    fn resolution_is_looked_up_by_row_id() {
        let (records, columns) = HostColumns::collect([
            (json!({ "id": 3 }), mapped("Trois", 45.0, 1.0)),
            (json!({ "id": 9 }), mapped("Neuf", 46.0, 2.0)),
        ]);
        assert_eq!(
            columns.map_column_names(&records[1]),
            Some(mapped("Neuf", 46.0, 2.0))
        );
        assert_eq!(
            columns.map_column_names(&records[0]),
            Some(mapped("Trois", 45.0, 1.0))
        );
    }

    #[test]
    fn unresolved_rows_are_kept_but_never_drawn() {
        let (records, columns) = HostColumns::collect([
            (json!({ "id": 1 }), Value::Null),
            (json!({ "id": 2 }), mapped("Deux", 45.0, 1.0)),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(columns.map_column_names(&records[0]), None);

        let set = FeatureSet::from_records(&records, &columns);
        assert_eq!(set.len(), 1);
        assert_eq!(set.skipped(), 1);
        assert_eq!(set.first().map(|f| f.id), Some(RowId::new(2)));
    }
}
