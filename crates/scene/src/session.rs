use foundation::RowId;
use records::{ColumnNames, FeatureSet, Record};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::control::RecenterControl;
use crate::registry::MarkerRegistry;
use crate::selection::SelectionSync;
use crate::style::{FitOptions, MarkerPalette, PopupOptions};
use crate::surface::{HostTable, MapSurface};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub palette: MarkerPalette,
    pub popup: PopupOptions,
    /// Fit applied when a table load lands on the map.
    pub fit: FitOptions,
    /// Fit applied by the recenter button.
    pub recenter: FitOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            palette: MarkerPalette::default(),
            popup: PopupOptions::default(),
            fit: FitOptions::initial(),
            recenter: FitOptions::recenter(),
        }
    }
}

/// All widget state for one map surface.
///
/// Driven from a single thread by host notifications and map events; nothing
/// here is shared.
pub struct WidgetSession<S: MapSurface, H> {
    surface: S,
    host: H,
    config: SessionConfig,
    registry: MarkerRegistry<S::Marker>,
    selection: SelectionSync,
    control: RecenterControl,
    ready: bool,
    /// Latest load received before the surface was ready.
    pending: Option<FeatureSet>,
}

impl<S: MapSurface, H: HostTable> WidgetSession<S, H> {
    pub fn new(surface: S, host: H, config: SessionConfig) -> Self {
        Self {
            surface,
            host,
            config,
            registry: MarkerRegistry::new(),
            selection: SelectionSync::new(),
            control: RecenterControl::new(),
            ready: false,
            pending: None,
        }
    }

    /// Host "table changed": rebuild everything from `records`.
    pub fn on_table_changed<C>(&mut self, records: &[Record], columns: &C)
    where
        C: ColumnNames + ?Sized,
    {
        let set = FeatureSet::from_records(records, columns);
        debug!(
            rows = records.len(),
            features = set.len(),
            skipped = set.skipped(),
            "table changed"
        );

        self.registry.clear();
        self.control.set_bounds(set.bounds());
        if self.ready {
            self.apply(set);
        } else {
            self.pending = Some(set);
        }
    }

    /// Map "load": fires once per surface.
    pub fn on_surface_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        info!("map surface ready");
        if let Some(set) = self.pending.take() {
            self.apply(set);
        }
    }

    /// Host "current record changed".
    ///
    /// Ignored: selection only flows from the map to the host, which keeps the
    /// two from echoing each other.
    pub fn on_current_record_changed(&mut self, record: Option<&Record>) {
        trace!(row = ?record.map(|r| r.id), "current record change ignored");
    }

    pub fn marker_clicked(&mut self, id: RowId) -> bool {
        self.selection
            .select(id, &mut self.registry, &self.host, &self.config.palette)
    }

    /// Recenter button pressed. Returns whether a fit was issued.
    pub fn recenter(&mut self) -> bool {
        let Some(bounds) = self.control.activate() else {
            return false;
        };
        self.surface.fit_bounds(bounds, &self.config.recenter);
        true
    }

    fn apply(&mut self, set: FeatureSet) {
        let Some(bounds) = set.bounds() else {
            debug!("empty table, nothing to draw");
            return;
        };

        self.surface.fit_bounds(bounds, &self.config.fit);
        self.registry.rebuild(
            &mut self.surface,
            set.features(),
            self.selection.current(),
            &self.config.palette,
            &self.config.popup,
        );

        let rendered = self
            .selection
            .current()
            .is_some_and(|id| self.registry.contains(id));
        if !rendered && let Some(first) = set.first() {
            self.selection.bootstrap(
                first.id,
                &mut self.registry,
                &self.host,
                &self.config.palette,
            );
        }
        info!(markers = self.registry.len(), "table drawn");
    }

    pub fn selected(&self) -> Option<RowId> {
        self.selection.current()
    }

    pub fn registry(&self) -> &MarkerRegistry<S::Marker> {
        &self.registry
    }

    pub fn control_mut(&mut self) -> &mut RecenterControl {
        &mut self.control
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
