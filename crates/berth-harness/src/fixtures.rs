#![forbid(unsafe_code)]

//! Canonical layouts and assertions shared by the test suites.

use berth_core::geometry::{Point, Rect, Size};
use berth_state::{DockLayout, PanelAxis, PanelId, TabId, WidgetId};
use berth_widgets::{DropRegion, DropRegionKind};

/// One panel holding two widgets: `first` with tabs `a, b` (active `a`),
/// `second` with tabs `c, d` (active `c`).
#[derive(Debug, Clone)]
pub struct SamplePair {
    pub layout: DockLayout,
    pub panel: PanelId,
    pub first: WidgetId,
    pub second: WidgetId,
}

/// Build the [`SamplePair`] fixture.
#[must_use]
pub fn docked_pair() -> SamplePair {
    let mut layout = DockLayout::default();
    let panel = layout.add_panel(PanelAxis::Vertical);
    let first = layout
        .add_widget(panel, &["a", "b"])
        .expect("fixture panel exists");
    let second = layout
        .add_widget(panel, &["c", "d"])
        .expect("fixture panel exists");
    SamplePair {
        layout,
        panel,
        first,
        second,
    }
}

/// A docked widget (tabs `c, d`) plus a floating widget (tab `a`) at
/// (10, 10).
#[derive(Debug, Clone)]
pub struct FloatingOverDock {
    pub layout: DockLayout,
    pub panel: PanelId,
    pub docked: WidgetId,
    pub floating: WidgetId,
}

/// Build the [`FloatingOverDock`] fixture.
#[must_use]
pub fn floating_over_dock() -> FloatingOverDock {
    let mut layout = DockLayout::default();
    let panel = layout.add_panel(PanelAxis::Vertical);
    let docked = layout
        .add_widget(panel, &["c", "d"])
        .expect("fixture panel exists");
    let floating = layout
        .add_floating_widget(&["a"], Point::new(10, 10), Size::new(200, 150))
        .expect("fixture tabs are non-empty");
    FloatingOverDock {
        layout,
        panel,
        docked,
        floating,
    }
}

/// Every tab id in the layout, sorted: the conserved quantity of drag
/// transitions.
#[must_use]
pub fn tab_multiset(layout: &DockLayout) -> Vec<TabId> {
    let mut tabs: Vec<TabId> = layout
        .widgets()
        .flat_map(|widget| widget.tabs.iter().copied())
        .collect();
    tabs.sort_unstable();
    tabs
}

/// Panic with the violation if the layout is invalid.
pub fn assert_valid(layout: &DockLayout) {
    if let Err(err) = layout.validate() {
        panic!("layout invariant violated: {err}");
    }
}

/// A synthetic tab-strip drop region: `tab_count` tabs of 40×20 px laid
/// out left to right from `origin`, owned by `widget_id`.
#[must_use]
pub fn strip_region(widget_id: WidgetId, origin: Point, tab_count: usize) -> DropRegion {
    let tab_rects: Vec<Rect> = (0..tab_count)
        .map(|i| Rect::new(origin.x + 40 * i as i32, origin.y, 40, 20))
        .collect();
    let width = 40 * tab_count as i32;
    DropRegion {
        rect: Rect::new(origin.x, origin.y, width, 20),
        z: 0,
        kind: DropRegionKind::TabStrip {
            widget_id,
            tab_rects,
        },
    }
}

/// Canonical JSON snapshot of a layout, for golden comparisons.
#[must_use]
pub fn layout_snapshot(layout: &DockLayout) -> serde_json::Value {
    serde_json::to_value(layout).unwrap_or_else(|err| {
        panic!("layout failed to serialize: {err}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid() {
        assert_valid(&docked_pair().layout);
        assert_valid(&floating_over_dock().layout);
    }

    #[test]
    fn docked_pair_shape() {
        let fx = docked_pair();
        assert_eq!(fx.layout.panel(fx.panel).unwrap().widgets, vec![fx.first, fx.second]);
        assert_eq!(fx.layout.widget(fx.first).unwrap().tabs.len(), 2);
        assert_eq!(tab_multiset(&fx.layout).len(), 4);
    }

    #[test]
    fn snapshot_is_deterministic() {
        let fx = docked_pair();
        assert_eq!(layout_snapshot(&fx.layout), layout_snapshot(&fx.layout));
    }
}
