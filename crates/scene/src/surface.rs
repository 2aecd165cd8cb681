//! Seams to the two external collaborators: the host table and the map library.
//!
//! Nothing here knows about the browser; the widget app implements these over
//! its JavaScript bindings and tests implement them with recording fakes.

use foundation::{LngLatBounds, RowId};

use crate::style::{FitOptions, PopupOptions};

/// Commands the widget sends to the host table.
pub trait HostTable {
    /// `[]` clears the host selection, `[id]` selects exactly one row.
    fn set_selected_rows(&self, rows: &[RowId]);
}

/// Everything needed to put one marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec<'a> {
    pub id: RowId,
    pub title: &'a str,
    pub longitude: f64,
    pub latitude: f64,
    pub color: &'a str,
    pub popup: &'a PopupOptions,
}

/// A marker on the surface, with its click popup, hover popup and listeners.
pub trait MarkerVisual {
    fn set_color(&mut self, color: &str);

    /// Removes the marker and both popups from the surface and detaches every
    /// listener it registered.
    fn dispose(self);
}

pub trait MapSurface {
    type Marker: MarkerVisual;

    fn add_marker(&mut self, spec: &MarkerSpec<'_>) -> Self::Marker;

    fn fit_bounds(&mut self, bounds: LngLatBounds, opts: &FitOptions);
}
