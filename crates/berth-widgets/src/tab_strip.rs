#![forbid(unsafe_code)]

//! Tab-strip binding: clicks activate tabs, drags detach them.

use berth_core::event::{PointerButton, PointerEvent, PointerEventKind};
use berth_core::geometry::{Point, Rect};
use berth_state::{DockAction, TabId, WidgetId};

use crate::tab_bar::DragContext;
use crate::target::{DropRegion, DropRegionKind};

/// The rendered tabs of one widget's tab bar.
#[derive(Debug, Clone)]
pub struct TabStrip {
    widget_id: WidgetId,
    /// Rendered tab bounds in bar order.
    tabs: Vec<(TabId, Rect)>,
    z: u16,
}

impl TabStrip {
    /// Create an empty strip for a widget.
    #[must_use]
    pub const fn new(widget_id: WidgetId) -> Self {
        Self {
            widget_id,
            tabs: Vec::new(),
            z: 0,
        }
    }

    /// The owning widget.
    #[inline]
    #[must_use]
    pub const fn widget_id(&self) -> WidgetId {
        self.widget_id
    }

    /// Replace the rendered tab bounds after a layout pass.
    pub fn set_tabs(&mut self, tabs: Vec<(TabId, Rect)>) {
        self.tabs = tabs;
    }

    /// Stacking order of the owning surface.
    pub fn set_z(&mut self, z: u16) {
        self.z = z;
    }

    /// The tab under a pointer position.
    #[must_use]
    pub fn hit(&self, pos: Point) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|&(tab, _)| tab)
    }

    /// Handle a pointer event; a left-button down on a tab activates it.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_pointer(
        &self,
        event: &PointerEvent,
        dispatch: &mut dyn FnMut(DockAction),
    ) -> bool {
        if event.kind != PointerEventKind::Down(PointerButton::Left) {
            return false;
        }
        let Some(tab_id) = self.hit(event.pos) else {
            return false;
        };
        dispatch(DockAction::TabClick {
            widget_id: self.widget_id,
            tab_id,
        });
        true
    }

    /// Detach a tab into a fresh floating widget at `position`.
    ///
    /// Returns `false` (dispatching nothing) if the tab is not part of
    /// this strip.
    pub fn begin_tab_drag(&self, tab_id: TabId, position: Point, ctx: &mut DragContext<'_>) -> bool {
        if !self.tabs.iter().any(|&(tab, _)| tab == tab_id) {
            return false;
        }
        let new_floating_widget_id = (ctx.fresh_widget_id)();
        (ctx.dispatch)(DockAction::TabDragStart {
            widget_id: self.widget_id,
            tab_id,
            new_floating_widget_id,
            position,
        });
        true
    }

    /// The strip as a drop-candidate region, if any tabs are rendered.
    #[must_use]
    pub fn drop_region(&self) -> Option<DropRegion> {
        let mut rects = self.tabs.iter().map(|&(_, rect)| rect);
        let first = rects.next()?;
        let bounds = rects.fold(first, |acc, rect| acc.union(&rect));
        Some(DropRegion {
            rect: bounds,
            z: self.z,
            kind: DropRegionKind::TabStrip {
                widget_id: self.widget_id,
                tab_rects: self.tabs.iter().map(|&(_, rect)| rect).collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> TabStrip {
        let mut strip = TabStrip::new(WidgetId::new(1));
        strip.set_tabs(vec![
            (TabId::new(10), Rect::new(0, 0, 40, 20)),
            (TabId::new(11), Rect::new(40, 0, 40, 20)),
        ]);
        strip
    }

    fn down(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Down(PointerButton::Left), Point::new(x, y))
    }

    #[test]
    fn click_on_tab_dispatches_activation() {
        let strip = strip();
        let mut actions = Vec::new();
        let handled = strip.handle_pointer(&down(50, 10), &mut |a| actions.push(a));
        assert!(handled);
        assert_eq!(
            actions,
            vec![DockAction::TabClick {
                widget_id: WidgetId::new(1),
                tab_id: TabId::new(11),
            }]
        );
    }

    #[test]
    fn click_outside_tabs_not_consumed() {
        let strip = strip();
        let mut actions = Vec::new();
        assert!(!strip.handle_pointer(&down(200, 10), &mut |a| actions.push(a)));
        assert!(actions.is_empty());
    }

    #[test]
    fn right_click_ignored() {
        let strip = strip();
        let ev = PointerEvent::new(
            PointerEventKind::Down(PointerButton::Right),
            Point::new(10, 10),
        );
        let mut actions = Vec::new();
        assert!(!strip.handle_pointer(&ev, &mut |a| actions.push(a)));
        assert!(actions.is_empty());
    }

    #[test]
    fn begin_tab_drag_uses_fresh_id() {
        let strip = strip();
        let mut actions = Vec::new();
        let mut dispatch = |a: DockAction| actions.push(a);
        let mut fresh = || WidgetId::new(77);
        let mut ctx = DragContext {
            regions: &[],
            dispatch: &mut dispatch,
            fresh_widget_id: &mut fresh,
        };
        assert!(strip.begin_tab_drag(TabId::new(10), Point::new(3, 3), &mut ctx));
        assert_eq!(
            actions,
            vec![DockAction::TabDragStart {
                widget_id: WidgetId::new(1),
                tab_id: TabId::new(10),
                new_floating_widget_id: WidgetId::new(77),
                position: Point::new(3, 3),
            }]
        );
    }

    #[test]
    fn begin_tab_drag_rejects_foreign_tab() {
        let strip = strip();
        let mut actions = Vec::new();
        let mut dispatch = |a: DockAction| actions.push(a);
        let mut fresh = || WidgetId::new(77);
        let mut ctx = DragContext {
            regions: &[],
            dispatch: &mut dispatch,
            fresh_widget_id: &mut fresh,
        };
        assert!(!strip.begin_tab_drag(TabId::new(99), Point::new(3, 3), &mut ctx));
        assert!(actions.is_empty());
    }

    #[test]
    fn drop_region_covers_all_tabs() {
        let strip = strip();
        let region = strip.drop_region().unwrap();
        assert_eq!(region.rect, Rect::new(0, 0, 80, 20));
        assert!(region.is_for_widget(WidgetId::new(1)));
    }

    #[test]
    fn empty_strip_has_no_region() {
        let strip = TabStrip::new(WidgetId::new(1));
        assert!(strip.drop_region().is_none());
    }
}
