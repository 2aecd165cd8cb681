use std::collections::BTreeMap;

use foundation::RowId;
use records::Feature;

use crate::style::{MarkerPalette, PopupOptions};
use crate::surface::{MapSurface, MarkerSpec, MarkerVisual};

/// Markers currently on the surface, keyed by host row.
///
/// Ordering contract:
/// - Iteration yields row ids in ascending order.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    markers: BTreeMap<RowId, M>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }
}

impl<M: MarkerVisual> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn get(&self, id: RowId) -> Option<&M> {
        self.markers.get(&id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut M> {
        self.markers.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.markers.keys().copied()
    }

    /// Disposes every marker.
    pub fn clear(&mut self) {
        for (_, marker) in std::mem::take(&mut self.markers) {
            marker.dispose();
        }
    }

    /// Replaces the whole registry with one marker per feature.
    ///
    /// Previous markers are disposed first, so repeated loads never stack visuals
    /// or listeners on the surface.
    pub fn rebuild<S>(
        &mut self,
        surface: &mut S,
        features: &[Feature],
        selected: Option<RowId>,
        palette: &MarkerPalette,
        popup: &PopupOptions,
    ) where
        S: MapSurface<Marker = M>,
    {
        self.clear();
        for feature in features {
            let spec = MarkerSpec {
                id: feature.id,
                title: &feature.title,
                longitude: feature.longitude,
                latitude: feature.latitude,
                color: palette.color_for(selected == Some(feature.id)),
                popup,
            };
            let marker = surface.add_marker(&spec);
            if let Some(previous) = self.markers.insert(feature.id, marker) {
                previous.dispose();
            }
        }
    }

    pub fn paint_all(&mut self, color: &str) {
        for marker in self.markers.values_mut() {
            marker.set_color(color);
        }
    }
}
