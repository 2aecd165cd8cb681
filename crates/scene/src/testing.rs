//! Recording fakes for the host table and the map surface.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use foundation::{LngLatBounds, RowId};
use records::{ColumnNames, Feature, LATITUDE, LONGITUDE, Record, TITLE};
use serde_json::{Map, Value};

use crate::style::FitOptions;
use crate::surface::{HostTable, MapSurface, MarkerSpec, MarkerVisual};

pub fn feature(id: i64, title: &str, longitude: f64, latitude: f64) -> Feature {
    Feature {
        id: RowId::new(id),
        title: title.to_string(),
        longitude,
        latitude,
    }
}

/// `role -> column` assignments, resolved the way the host resolves them.
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
        if ![TITLE, LATITUDE, LONGITUDE]
            .iter()
            .all(|role| self.columns.contains_key(*role))
        {
            return None;
        }
        let mapped: Map<String, Value> = self
            .columns
            .iter()
            .filter_map(|(role, column)| Some((role.clone(), record.fields.get(column)?.clone())))
            .collect();
        Some(Value::Object(mapped))
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    sent: RefCell<Vec<Vec<RowId>>>,
}

impl FakeHost {
    /// Every `set_selected_rows` call, as raw ids.
    pub fn sent(&self) -> Vec<Vec<i64>> {
        self.sent
            .borrow()
            .iter()
            .map(|rows| rows.iter().map(|r| r.get()).collect())
            .collect()
    }

    pub fn reset(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl HostTable for FakeHost {
    fn set_selected_rows(&self, rows: &[RowId]) {
        self.sent.borrow_mut().push(rows.to_vec());
    }
}

#[derive(Debug)]
pub struct FakeMarker {
    serial: u64,
    live: Rc<RefCell<BTreeSet<u64>>>,
    pub title: String,
    pub longitude: f64,
    pub latitude: f64,
    pub popup_offset: f64,
    color: String,
}

impl FakeMarker {
    pub fn color(&self) -> &str {
        &self.color
    }
}

impl MarkerVisual for FakeMarker {
    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn dispose(self) {
        self.live.borrow_mut().remove(&self.serial);
    }
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    next_serial: u64,
    live: Rc<RefCell<BTreeSet<u64>>>,
    pub fits: Vec<(LngLatBounds, FitOptions)>,
}

impl FakeSurface {
    pub fn created(&self) -> u64 {
        self.next_serial
    }

    pub fn live(&self) -> usize {
        self.live.borrow().len()
    }
}

impl MapSurface for FakeSurface {
    type Marker = FakeMarker;

    fn add_marker(&mut self, spec: &MarkerSpec<'_>) -> FakeMarker {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.live.borrow_mut().insert(serial);
        FakeMarker {
            serial,
            live: Rc::clone(&self.live),
            title: spec.title.to_string(),
            longitude: spec.longitude,
            latitude: spec.latitude,
            popup_offset: spec.popup.offset,
            color: spec.color.to_string(),
        }
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, opts: &FitOptions) {
        self.fits.push((bounds, *opts));
    }
}
