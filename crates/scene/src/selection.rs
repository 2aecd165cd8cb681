use foundation::RowId;
use tracing::trace;

use crate::registry::MarkerRegistry;
use crate::style::MarkerPalette;
use crate::surface::{HostTable, MarkerVisual};

/// Single-row selection mirrored between the marker colours and the host table.
///
/// States:
/// - no selection (`current() == None`)
/// - selected (`current() == Some(id)`), where `id` was rendered when selected.
///
/// The widget is selection-authoritative: the host only ever learns about a
/// selection from here, never the other way round.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SelectionSync {
    current: Option<RowId>,
}

impl SelectionSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RowId> {
        self.current
    }

    /// Highlights `id` and pushes it to the host.
    ///
    /// Returns `true` if the selection changed. Re-selecting the current row and
    /// selecting a row with no marker are both no-ops.
    pub fn select<M, H>(
        &mut self,
        id: RowId,
        registry: &mut MarkerRegistry<M>,
        host: &H,
        palette: &MarkerPalette,
    ) -> bool
    where
        M: MarkerVisual,
        H: HostTable + ?Sized,
    {
        if self.current == Some(id) {
            return false;
        }
        if !registry.contains(id) {
            trace!(row = %id, "select ignored: row not rendered");
            return false;
        }

        registry.paint_all(&palette.default_color);
        if let Some(marker) = registry.get_mut(id) {
            marker.set_color(&palette.selected_color);
        }
        self.current = Some(id);
        host.set_selected_rows(&[id]);
        true
    }

    /// Initial selection after a load: clear the host selection, then select
    /// `first`.
    ///
    /// The empty push makes dependent widgets see a transition even when `first`
    /// matches whatever the host had selected before.
    pub fn bootstrap<M, H>(
        &mut self,
        first: RowId,
        registry: &mut MarkerRegistry<M>,
        host: &H,
        palette: &MarkerPalette,
    ) -> bool
    where
        M: MarkerVisual,
        H: HostTable + ?Sized,
    {
        host.set_selected_rows(&[]);
        self.current = None;
        self.select(first, registry, host, palette)
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionSync;
    use crate::registry::MarkerRegistry;
    use crate::style::{MarkerPalette, PopupOptions};
    use crate::testing::{FakeHost, FakeMarker, FakeSurface, feature};
    use foundation::RowId;
    use pretty_assertions::assert_eq;

    const DEFAULT: &str = "#0070C0";
    const SELECTED: &str = "#548235";

    fn registry(surface: &mut FakeSurface, ids: &[i64]) -> MarkerRegistry<FakeMarker> {
        let features: Vec<_> = ids
            .iter()
            .map(|&id| feature(id, "t", id as f64, 0.0))
            .collect();
        let mut reg = MarkerRegistry::new();
        reg.rebuild(
            surface,
            &features,
            None,
            &MarkerPalette::default(),
            &PopupOptions::default(),
        );
        reg
    }

    fn colors(reg: &MarkerRegistry<FakeMarker>) -> Vec<(i64, String)> {
        reg.ids()
            .map(|id| (id.get(), reg.get(id).unwrap().color().to_string()))
            .collect()
    }

    #[test]
    fn select_highlights_exactly_one_marker() {
        let mut surface = FakeSurface::default();
        let mut reg = registry(&mut surface, &[1, 2, 3]);
        let host = FakeHost::default();
        let mut sel = SelectionSync::new();

        assert!(sel.select(RowId::new(2), &mut reg, &host, &MarkerPalette::default()));
        assert_eq!(sel.current(), Some(RowId::new(2)));
        assert_eq!(
            colors(&reg),
            vec![
                (1, DEFAULT.to_string()),
                (2, SELECTED.to_string()),
                (3, DEFAULT.to_string())
            ]
        );
        assert_eq!(host.sent(), vec![vec![2]]);
    }

    #[test]
    fn select_is_idempotent() {
        let mut surface = FakeSurface::default();
        let mut reg = registry(&mut surface, &[1, 2]);
        let host = FakeHost::default();
        let mut sel = SelectionSync::new();
        let palette = MarkerPalette::default();

        assert!(sel.select(RowId::new(1), &mut reg, &host, &palette));
        let once = colors(&reg);
        assert!(!sel.select(RowId::new(1), &mut reg, &host, &palette));
        assert_eq!(colors(&reg), once);
        assert_eq!(host.sent(), vec![vec![1]]);
    }

    #[test]
    fn unknown_row_changes_nothing() {
        let mut surface = FakeSurface::default();
        let mut reg = registry(&mut surface, &[1, 2]);
        let host = FakeHost::default();
        let mut sel = SelectionSync::new();
        let palette = MarkerPalette::default();
        sel.select(RowId::new(1), &mut reg, &host, &palette);
        let before = colors(&reg);

        assert!(!sel.select(RowId::new(99), &mut reg, &host, &palette));
        assert_eq!(sel.current(), Some(RowId::new(1)));
        assert_eq!(colors(&reg), before);
        assert_eq!(host.sent(), vec![vec![1]]);
    }

    #[test]
    fn switching_rows_moves_the_highlight() {
        let mut surface = FakeSurface::default();
        let mut reg = registry(&mut surface, &[1, 2]);
        let host = FakeHost::default();
        let mut sel = SelectionSync::new();
        let palette = MarkerPalette::default();
        sel.select(RowId::new(1), &mut reg, &host, &palette);
        host.reset();

        assert!(sel.select(RowId::new(2), &mut reg, &host, &palette));
        assert_eq!(
            colors(&reg),
            vec![(1, DEFAULT.to_string()), (2, SELECTED.to_string())]
        );
        assert_eq!(host.sent(), vec![vec![2]]);
    }

    #[test]
    fn bootstrap_clears_then_selects() {
        let mut surface = FakeSurface::default();
        let mut reg = registry(&mut surface, &[4, 9]);
        let host = FakeHost::default();
        let mut sel = SelectionSync::new();

        assert!(sel.bootstrap(RowId::new(9), &mut reg, &host, &MarkerPalette::default()));
        assert_eq!(host.sent(), vec![vec![], vec![9]]);
        assert_eq!(sel.current(), Some(RowId::new(9)));
    }
}
