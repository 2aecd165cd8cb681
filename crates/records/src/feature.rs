use foundation::{BoundsAccumulator, LngLatBounds, RowId};
use tracing::debug;

use crate::mapping::map_record;
use crate::record::{ColumnNames, Record};

/// A row reduced to what the map draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: RowId,
    pub title: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Features and envelope for one table load.
///
/// Rows that fail mapping are left out without surfacing an error to the user;
/// only the count is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<Feature>,
    bounds: Option<LngLatBounds>,
    skipped: usize,
}

impl FeatureSet {
    pub fn from_records<'a, I, C>(records: I, columns: &C) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        C: ColumnNames + ?Sized,
    {
        let mut features = Vec::new();
        let mut bounds = BoundsAccumulator::new();
        let mut skipped = 0;

        for record in records {
            let mapped = columns.map_column_names(record);
            match map_record(record.id, mapped.as_ref()) {
                Ok(feature) => {
                    bounds.extend(feature.longitude, feature.latitude);
                    features.push(feature);
                }
                Err(err) => {
                    debug!(row = %record.id, %err, "row skipped");
                    skipped += 1;
                }
            }
        }

        FeatureSet {
            features,
            bounds: bounds.finish(),
            skipped,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn bounds(&self) -> Option<LngLatBounds> {
        self.bounds
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
