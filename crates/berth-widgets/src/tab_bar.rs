#![forbid(unsafe_code)]

//! Tab-bar drag binding.
//!
//! [`TabBar`] is the grip surface of one widget: it feeds host pointer
//! events through its captor into the shared drag monitor and dispatches
//! the resulting layout actions. All collaborators arrive as explicit
//! arguments: the monitor, and a [`DragContext`] carrying the rendered
//! drop regions, the dispatch sink, and a fresh-id source. There is no
//! ambient lookup and nothing is memoized across gestures.
//!
//! One widget-drag gesture dispatches:
//! - zero or more `WIDGET_DRAG` actions (only while the widget floats),
//! - exactly one `WIDGET_DRAG_END` carrying the resolved target.
//!
//! A plain click (up before promotion) dispatches nothing.

use berth_core::captor::{CaptureEvent, PointerCaptor};
use berth_core::drag::{DragEvent, DragMonitor, DragRelease, DragSession};
use berth_core::event::PointerEvent;
use berth_core::geometry::{Point, Rect};
use berth_state::{DockAction, WidgetId};
use web_time::Instant;

use crate::target::{DropRegion, resolve_drop_target};

/// Explicit per-event collaborators for the bindings.
pub struct DragContext<'a> {
    /// Candidate drop regions currently rendered.
    pub regions: &'a [DropRegion],
    /// Sink for dispatched actions; the owner of the layout applies them
    /// through the reducer.
    pub dispatch: &'a mut dyn FnMut(DockAction),
    /// Allocates widget ids distinct from every id in the layout.
    pub fresh_widget_id: &'a mut dyn FnMut() -> WidgetId,
}

/// The tab bar of one widget, acting as its drag grip.
#[derive(Debug)]
pub struct TabBar {
    widget_id: WidgetId,
    /// Set when the widget floats. The wrapper shares the widget's id;
    /// carrying both mirrors how the bindings are wired by the host.
    floating_widget_id: Option<WidgetId>,
    captor: PointerCaptor,
}

impl TabBar {
    /// Create a tab bar binding for a widget with the given grip bounds.
    #[must_use]
    pub fn new(widget_id: WidgetId, floating_widget_id: Option<WidgetId>, grip: Rect) -> Self {
        Self {
            widget_id,
            floating_widget_id,
            captor: PointerCaptor::new(grip),
        }
    }

    /// The bound widget.
    #[inline]
    #[must_use]
    pub fn widget_id(&self) -> WidgetId {
        self.widget_id
    }

    /// The id the drag is keyed by: the floating wrapper when the widget
    /// floats, the widget itself otherwise.
    #[inline]
    #[must_use]
    pub fn dragged_id(&self) -> WidgetId {
        self.floating_widget_id.unwrap_or(self.widget_id)
    }

    /// Update the grip bounds after a relayout.
    pub fn set_grip(&mut self, grip: Rect) {
        self.captor.set_grip(grip);
    }

    /// Update the floating wrapper id when the widget docks or floats.
    pub fn set_floating_widget_id(&mut self, id: Option<WidgetId>) {
        self.floating_widget_id = id;
    }

    /// Route one pointer event.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        monitor: &mut DragMonitor<WidgetId>,
        ctx: &mut DragContext<'_>,
    ) {
        let Some(captured) = self.captor.process(event) else {
            return;
        };
        match captured {
            CaptureEvent::Down(pos) => {
                if !monitor.on_pointer_down(self.dragged_id(), pos, now) {
                    // Another session is active; give the pointer back so
                    // our stale capture cannot feed that session.
                    self.captor.release();
                }
            }
            CaptureEvent::Move(pos) => match monitor.on_pointer_move(pos, now) {
                Some(DragEvent::Moved { delta, .. }) => {
                    if let Some(floating_widget_id) = self.floating_widget_id {
                        (ctx.dispatch)(DockAction::WidgetDrag {
                            floating_widget_id,
                            drag_by: delta,
                        });
                    }
                }
                Some(DragEvent::Started { .. }) | None => {}
            },
            CaptureEvent::Up(pos) => match monitor.on_pointer_up(pos) {
                DragRelease::Drop { session, position } => {
                    self.finish_drag(&session, position, ctx);
                }
                DragRelease::Click(_) | DragRelease::None => {}
            },
            CaptureEvent::Cancel => {
                monitor.cancel();
            }
        }
    }

    /// Teardown: drop the capture and abandon any session this bar owns.
    pub fn release(&mut self, monitor: &mut DragMonitor<WidgetId>) {
        if self.captor.is_capturing() {
            monitor.cancel();
        }
        self.captor.release();
    }

    fn finish_drag(
        &self,
        session: &DragSession<WidgetId>,
        position: Point,
        ctx: &mut DragContext<'_>,
    ) {
        let dragged = *session.payload();
        // A widget never resolves onto its own tab strip.
        let candidates: Vec<DropRegion> = ctx
            .regions
            .iter()
            .filter(|region| !region.is_for_widget(self.widget_id))
            .cloned()
            .collect();
        let fallback = (ctx.fresh_widget_id)();
        let target = resolve_drop_target(&candidates, position, fallback);
        self.log_drag_end(dragged);
        (ctx.dispatch)(DockAction::WidgetDragEnd {
            floating_widget_id: dragged,
            target,
        });
    }

    #[cfg(feature = "tracing")]
    fn log_drag_end(&self, dragged: WidgetId) {
        tracing::debug!(message = "tab_bar.drag_end", widget = %dragged);
    }

    #[cfg(not(feature = "tracing"))]
    fn log_drag_end(&self, _dragged: WidgetId) {}
}

/// Hook-style drag registration for one widget.
///
/// Hosts that run their own gesture detection register the widget and get
/// a trigger: calling [`start`](DragSource::start) with the initial
/// pointer position begins a session directly, bypassing the captor/timer
/// promotion race. The session then flows through the same monitor and
/// the same dispatch path as captor-initiated drags.
#[derive(Debug, Clone, Copy)]
pub struct DragSource {
    widget_id: WidgetId,
}

impl DragSource {
    /// Register a drag source for a widget.
    #[must_use]
    pub const fn new(widget_id: WidgetId) -> Self {
        Self { widget_id }
    }

    /// The registered widget.
    #[inline]
    #[must_use]
    pub const fn widget_id(&self) -> WidgetId {
        self.widget_id
    }

    /// Begin a drag session at `initial`. Returns `false` if another
    /// session is already active.
    pub fn start(&self, monitor: &mut DragMonitor<WidgetId>, initial: Point) -> bool {
        monitor.begin(self.widget_id, initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::drag::DragConfig;
    use berth_core::event::{PointerButton, PointerEventKind};
    use berth_state::{DropTarget, PanelId, PanelSide};
    use std::time::Duration;

    use crate::target::DropRegionKind;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_350: Duration = Duration::from_millis(350);

    fn down(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Down(PointerButton::Left), Point::new(x, y))
    }

    fn mv(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, Point::new(x, y))
    }

    fn up(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Up(PointerButton::Left), Point::new(x, y))
    }

    fn panel_region(panel: u64, rect: Rect) -> DropRegion {
        DropRegion {
            rect,
            z: 0,
            kind: DropRegionKind::PanelEdge {
                panel_id: PanelId::new(panel),
                side: PanelSide::End,
            },
        }
    }

    fn strip_region(widget: u64, rect: Rect) -> DropRegion {
        DropRegion {
            rect,
            z: 1,
            kind: DropRegionKind::TabStrip {
                widget_id: WidgetId::new(widget),
                tab_rects: vec![rect],
            },
        }
    }

    /// Drives a tab bar against a collecting dispatch sink.
    fn run_gesture(
        bar: &mut TabBar,
        monitor: &mut DragMonitor<WidgetId>,
        regions: &[DropRegion],
        script: &[(PointerEvent, Duration)],
    ) -> Vec<DockAction> {
        let mut actions = Vec::new();
        let mut next_raw = 1000u64;
        let t0 = Instant::now();
        for (event, at) in script {
            let mut dispatch = |action: DockAction| actions.push(action);
            let mut fresh = || {
                next_raw += 1;
                WidgetId::new(next_raw)
            };
            let mut ctx = DragContext {
                regions,
                dispatch: &mut dispatch,
                fresh_widget_id: &mut fresh,
            };
            bar.handle_pointer(event, t0 + *at, monitor, &mut ctx);
        }
        actions
    }

    fn grip() -> Rect {
        Rect::new(0, 0, 100, 20)
    }

    #[test]
    fn plain_click_dispatches_nothing() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[(down(5, 5), Duration::ZERO), (up(5, 5), MS_50)],
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn floating_widget_drag_dispatches_moves_and_end() {
        let id = WidgetId::new(4);
        let mut bar = TabBar::new(id, Some(id), grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[
                (down(5, 5), Duration::ZERO),
                (mv(6, 5), MS_50),   // promotes
                (mv(10, 9), MS_100), // first dispatched move
                (up(10, 9), MS_350),
            ],
        );
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            actions[0],
            DockAction::WidgetDrag { floating_widget_id, drag_by }
                if floating_widget_id == id
                    && drag_by == berth_core::geometry::Vector::new(5, 4)
        ));
        assert!(matches!(
            actions[1],
            DockAction::WidgetDragEnd {
                floating_widget_id,
                target: DropTarget::FloatingWidget { .. },
            } if floating_widget_id == id
        ));
    }

    #[test]
    fn docked_widget_drag_dispatches_only_end() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let regions = [panel_region(7, Rect::new(0, 0, 400, 400))];
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &regions,
            &[
                (down(5, 5), Duration::ZERO),
                (mv(50, 50), MS_50),
                (mv(200, 200), MS_100),
                (up(200, 200), MS_350),
            ],
        );
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0],
            DockAction::WidgetDragEnd {
                floating_widget_id: WidgetId::new(1),
                target: DropTarget::Panel {
                    panel_id: PanelId::new(7),
                    side: PanelSide::End,
                },
            }
        );
    }

    #[test]
    fn exactly_one_drag_end_per_gesture() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[
                (down(5, 5), Duration::ZERO),
                (mv(6, 5), MS_50),
                (up(6, 5), MS_100),
                // Stray events after the gesture must not re-dispatch.
                (mv(7, 5), MS_350),
                (up(7, 5), MS_350),
            ],
        );
        let ends = actions
            .iter()
            .filter(|a| matches!(a, DockAction::WidgetDragEnd { .. }))
            .count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn own_tab_strip_is_not_a_target() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let regions = [strip_region(1, Rect::new(0, 0, 400, 400))];
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &regions,
            &[
                (down(5, 5), Duration::ZERO),
                (mv(50, 50), MS_50),
                (up(50, 50), MS_100),
            ],
        );
        assert!(matches!(
            actions[..],
            [DockAction::WidgetDragEnd {
                target: DropTarget::FloatingWidget { .. },
                ..
            }]
        ));
    }

    #[test]
    fn other_widgets_tab_strip_is_a_target() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let regions = [strip_region(2, Rect::new(0, 100, 100, 20))];
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &regions,
            &[
                (down(5, 5), Duration::ZERO),
                (mv(50, 110), MS_50),
                (up(50, 110), MS_100),
            ],
        );
        assert!(matches!(
            actions[..],
            [DockAction::WidgetDragEnd {
                target: DropTarget::Tab { widget_id, .. },
                ..
            }] if widget_id == WidgetId::new(2)
        ));
    }

    #[test]
    fn cancel_dispatches_no_end() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[
                (down(5, 5), Duration::ZERO),
                (mv(6, 5), MS_50),
                (
                    PointerEvent::new(PointerEventKind::Cancel, Point::new(0, 0)),
                    MS_100,
                ),
            ],
        );
        assert!(actions.is_empty());
        assert!(!monitor.is_dragging());
    }

    #[test]
    fn long_press_then_move_drags_floating_widget() {
        let id = WidgetId::new(4);
        let mut bar = TabBar::new(id, Some(id), grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let t0 = Instant::now();

        let mut actions = Vec::new();
        let mut next_raw = 1000u64;
        {
            let mut dispatch = |action: DockAction| actions.push(action);
            let mut fresh = || {
                next_raw += 1;
                WidgetId::new(next_raw)
            };
            let mut ctx = DragContext {
                regions: &[],
                dispatch: &mut dispatch,
                fresh_widget_id: &mut fresh,
            };
            bar.handle_pointer(&down(5, 5), t0, &mut monitor, &mut ctx);
        }
        // Host tick observes the long-press promotion; no movement needed.
        assert!(monitor.poll(t0 + MS_350).is_some());
        assert!(monitor.is_dragging());

        {
            let mut dispatch = |action: DockAction| actions.push(action);
            let mut fresh = || {
                next_raw += 1;
                WidgetId::new(next_raw)
            };
            let mut ctx = DragContext {
                regions: &[],
                dispatch: &mut dispatch,
                fresh_widget_id: &mut fresh,
            };
            bar.handle_pointer(&mv(8, 5), t0 + MS_350 + MS_50, &mut monitor, &mut ctx);
        }
        assert!(matches!(
            actions[..],
            [DockAction::WidgetDrag { floating_widget_id, .. }] if floating_widget_id == id
        ));
    }

    #[test]
    fn rejected_down_releases_capture() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        // Another binding's session is already active.
        monitor.begin(WidgetId::new(9), Point::new(500, 500));

        let actions = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[(down(5, 5), Duration::ZERO), (mv(6, 5), MS_50)],
        );
        // Our bar must not feed the foreign session.
        assert!(actions.is_empty());
        assert_eq!(
            monitor.session().map(|s| *s.payload()),
            Some(WidgetId::new(9))
        );
        assert_eq!(monitor.session().unwrap().total_delta(), berth_core::geometry::Vector::ZERO);
    }

    #[test]
    fn drag_source_trigger_starts_session() {
        let mut monitor = DragMonitor::new(DragConfig::default());
        let source = DragSource::new(WidgetId::new(3));
        assert!(source.start(&mut monitor, Point::new(10, 10)));
        assert!(monitor.is_dragging());
        assert!(!source.start(&mut monitor, Point::new(0, 0)));
    }

    #[test]
    fn release_abandons_owned_session() {
        let mut bar = TabBar::new(WidgetId::new(1), None, grip());
        let mut monitor = DragMonitor::new(DragConfig::default());
        let _ = run_gesture(
            &mut bar,
            &mut monitor,
            &[],
            &[(down(5, 5), Duration::ZERO), (mv(6, 5), MS_50)],
        );
        assert!(monitor.is_dragging());
        bar.release(&mut monitor);
        assert!(!monitor.is_dragging());
        assert!(!bar.captor.is_capturing());
    }
}
