#![forbid(unsafe_code)]

//! The layout reducer: `(layout, action) -> layout'`.
//!
//! [`reduce`] is the single point where the shared layout tree changes.
//! It is pure (no hidden inputs, no interior state) and atomic: the
//! returned layout is either fully transformed or the input unchanged.
//!
//! Preconditions are programmer errors, not runtime conditions: an action
//! referencing an id that is not in the layout, or dragging a docked
//! widget by delta, panics with a diagnostic naming the violated
//! expectation. Dispatch sites are expected to build actions from the same
//! layout they dispatch against, which makes these unreachable.

use berth_core::geometry::{Point, Size};

use crate::action::{DockAction, DropTarget, PanelSide};
use crate::id::{PanelId, WidgetId};
use crate::layout::{DockLayout, EmptyPanelPolicy, FloatingWidgetState, WidgetState};

/// Bounds given to a floating widget created by extraction, before the
/// host lays it out properly.
pub const DEFAULT_FLOATING_BOUNDS: Size = Size::new(320, 240);

/// Apply one action to the layout.
pub fn reduce(mut layout: DockLayout, action: DockAction) -> DockLayout {
    log_action(&action);
    match action {
        DockAction::WidgetDrag {
            floating_widget_id,
            drag_by,
        } => {
            let Some(floating) = layout.floating.get_mut(&floating_widget_id) else {
                panic!(
                    "drag-by-delta requires a floating widget: \
                     {floating_widget_id} has no floating wrapper"
                );
            };
            floating.position = floating.position + drag_by;
            layout
        }

        DockAction::WidgetDragEnd {
            floating_widget_id,
            target,
        } => drag_end(layout, floating_widget_id, target),

        DockAction::TabClick { widget_id, tab_id } => {
            let Some(widget) = layout.widgets.get_mut(&widget_id) else {
                panic!("widget {widget_id} is not part of the layout");
            };
            if !widget.tabs.contains(&tab_id) {
                panic!("tab {tab_id} is not a member of widget {widget_id}");
            }
            widget.active_tab = tab_id;
            layout
        }

        DockAction::TabDragStart {
            widget_id,
            tab_id,
            new_floating_widget_id,
            position,
        } => {
            require_fresh(&layout, new_floating_widget_id);
            let Some(widget) = layout.widgets.get_mut(&widget_id) else {
                panic!("widget {widget_id} is not part of the layout");
            };
            let Some(index) = widget.tabs.iter().position(|&t| t == tab_id) else {
                panic!("tab {tab_id} is not a member of widget {widget_id}");
            };
            widget.tabs.remove(index);
            let emptied = widget.tabs.is_empty();
            if !emptied && widget.active_tab == tab_id {
                // The detached tab was active: first remaining tab takes over.
                widget.active_tab = widget.tabs[0];
            }
            if emptied {
                layout.widgets.remove(&widget_id);
                remove_from_container(&mut layout, widget_id, None);
            }
            layout.widgets.insert(
                new_floating_widget_id,
                WidgetState {
                    id: new_floating_widget_id,
                    tabs: vec![tab_id],
                    active_tab: tab_id,
                },
            );
            insert_floating(&mut layout, new_floating_widget_id, position);
            layout
        }

        DockAction::FloatingWidgetResize {
            floating_widget_id,
            bounds,
        } => {
            let Some(floating) = layout.floating.get_mut(&floating_widget_id) else {
                panic!("floating widget {floating_widget_id} is not part of the layout");
            };
            floating.bounds = bounds;
            layout
        }

        DockAction::FloatingWidgetBringToFront { floating_widget_id } => {
            if !layout.floating.contains_key(&floating_widget_id) {
                panic!("floating widget {floating_widget_id} is not part of the layout");
            }
            layout.floating_order.retain(|&id| id != floating_widget_id);
            layout.floating_order.push(floating_widget_id);
            layout
        }
    }
}

fn drag_end(mut layout: DockLayout, dragged: WidgetId, target: DropTarget) -> DockLayout {
    if !layout.widgets.contains_key(&dragged) {
        panic!("widget {dragged} is not part of the layout");
    }
    match target {
        DropTarget::Tab {
            widget_id: target_widget,
            tab_index,
        } => {
            if target_widget == dragged {
                panic!("widget {dragged} cannot be dropped onto its own tab strip");
            }
            if !layout.widgets.contains_key(&target_widget) {
                panic!("widget {target_widget} is not part of the layout");
            }
            remove_from_container(&mut layout, dragged, None);
            let Some(source) = layout.widgets.remove(&dragged) else {
                panic!("widget {dragged} is not part of the layout");
            };
            let Some(target) = layout.widgets.get_mut(&target_widget) else {
                panic!("widget {target_widget} is not part of the layout");
            };
            let index = tab_index.min(target.tabs.len());
            target.tabs.splice(index..index, source.tabs);
            layout
        }

        DropTarget::Panel { panel_id, side } => {
            if !layout.panels.contains_key(&panel_id) {
                panic!("panel {panel_id} is not part of the layout");
            }
            // The target panel survives even if the drag empties it.
            remove_from_container(&mut layout, dragged, Some(panel_id));
            let Some(panel) = layout.panels.get_mut(&panel_id) else {
                panic!("panel {panel_id} is not part of the layout");
            };
            match side {
                PanelSide::Start => panel.widgets.insert(0, dragged),
                PanelSide::End => panel.widgets.push(dragged),
            }
            layout
        }

        DropTarget::FloatingWidget {
            new_widget_id,
            position,
        } => {
            if layout.floating.contains_key(&dragged) {
                // Already floating: the drag stream moved it; settle as-is.
                return layout;
            }
            require_fresh(&layout, new_widget_id);
            remove_from_container(&mut layout, dragged, None);
            let Some(mut widget) = layout.widgets.remove(&dragged) else {
                panic!("widget {dragged} is not part of the layout");
            };
            widget.id = new_widget_id;
            layout.widgets.insert(new_widget_id, widget);
            insert_floating(&mut layout, new_widget_id, position);
            layout
        }
    }
}

/// Detach `widget` from whichever container holds it.
///
/// A floating wrapper is deleted outright. A panel entry is removed and,
/// if the panel empties, the layout's [`EmptyPanelPolicy`] applies,
/// except for `keep_panel`, which survives regardless (it is about to
/// receive the widget back).
fn remove_from_container(layout: &mut DockLayout, widget: WidgetId, keep_panel: Option<PanelId>) {
    if layout.floating.remove(&widget).is_some() {
        layout.floating_order.retain(|&id| id != widget);
        return;
    }
    let mut owner = None;
    for panel in layout.panels.values_mut() {
        if let Some(index) = panel.widgets.iter().position(|&w| w == widget) {
            panel.widgets.remove(index);
            owner = Some(panel.id);
            break;
        }
    }
    let Some(owner) = owner else {
        panic!("widget {widget} belongs to no container");
    };
    let emptied = layout.panels.get(&owner).is_some_and(|p| p.widgets.is_empty());
    if emptied
        && layout.empty_panel_policy == EmptyPanelPolicy::Remove
        && keep_panel != Some(owner)
    {
        layout.panels.remove(&owner);
        layout.panel_order.retain(|&id| id != owner);
    }
}

fn insert_floating(layout: &mut DockLayout, id: WidgetId, position: Point) {
    layout.floating.insert(
        id,
        FloatingWidgetState {
            id,
            position,
            bounds: DEFAULT_FLOATING_BOUNDS,
        },
    );
    layout.floating_order.push(id);
    // Ids arriving via deserialized actions keep allocation collision-free.
    layout.next_id = layout.next_id.max(id.get() + 1);
}

fn require_fresh(layout: &DockLayout, id: WidgetId) {
    if layout.widgets.contains_key(&id) || layout.floating.contains_key(&id) {
        panic!("generated widget id {id} already exists in the layout");
    }
}

#[cfg(feature = "tracing")]
fn log_action(action: &DockAction) {
    let kind = match action {
        DockAction::WidgetDrag { .. } => "widget_drag",
        DockAction::WidgetDragEnd { .. } => "widget_drag_end",
        DockAction::TabClick { .. } => "tab_click",
        DockAction::TabDragStart { .. } => "tab_drag_start",
        DockAction::FloatingWidgetResize { .. } => "floating_widget_resize",
        DockAction::FloatingWidgetBringToFront { .. } => "floating_widget_bring_to_front",
    };
    tracing::debug!(message = "dock.reduce", kind);
}

#[cfg(not(feature = "tracing"))]
fn log_action(_action: &DockAction) {}
