#![forbid(unsafe_code)]

//! Dispatched actions and drop targets.
//!
//! Both enums carry their discriminant in a `type` field when serialized,
//! so the wire shape matches the host protocol:
//!
//! ```json
//! { "type": "WIDGET_DRAG", "floatingWidgetId": 4, "dragBy": {"x": 3, "y": -2} }
//! { "type": "WIDGET_DRAG_END", "floatingWidgetId": 4,
//!   "target": { "type": "tab", "widgetId": 2, "tabIndex": 1 } }
//! ```

use berth_core::geometry::{Point, Size, Vector};
use serde::{Deserialize, Serialize};

use crate::id::{PanelId, TabId, WidgetId};

/// Insertion side along a panel's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    /// Leading edge: the widget is inserted first.
    Start,
    /// Trailing edge: the widget is inserted last.
    End,
}

/// The resolved destination of a completed drag.
///
/// Exactly one variant is produced per drag end; "nowhere" is not an error
/// but the `FloatingWidget` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DropTarget {
    /// A tab-insertion point inside another widget's tab bar.
    #[serde(rename = "tab", rename_all = "camelCase")]
    Tab {
        widget_id: WidgetId,
        tab_index: usize,
    },

    /// A docking region at a panel edge.
    #[serde(rename = "panel", rename_all = "camelCase")]
    Panel { panel_id: PanelId, side: PanelSide },

    /// Empty space: detach into (or settle as) a floating widget.
    ///
    /// `new_widget_id` is freshly allocated before resolution so the id is
    /// distinct from every id in the layout; `position` is the final
    /// pointer location, carried explicitly so the reducer needs no
    /// ambient drag state.
    #[serde(rename = "floatingWidget", rename_all = "camelCase")]
    FloatingWidget {
        new_widget_id: WidgetId,
        position: Point,
    },
}

impl DropTarget {
    /// Whether this is a tab-insertion target.
    #[must_use]
    pub const fn is_tab(&self) -> bool {
        matches!(self, Self::Tab { .. })
    }

    /// Whether this is a panel-docking target.
    #[must_use]
    pub const fn is_panel(&self) -> bool {
        matches!(self, Self::Panel { .. })
    }

    /// Whether this is the floating-widget fallback.
    #[must_use]
    pub const fn is_floating_widget(&self) -> bool {
        matches!(self, Self::FloatingWidget { .. })
    }
}

/// A layout transition, applied by [`reduce`](crate::reducer::reduce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DockAction {
    /// Reposition a floating widget by a pointer delta.
    #[serde(rename = "WIDGET_DRAG", rename_all = "camelCase")]
    WidgetDrag {
        floating_widget_id: WidgetId,
        drag_by: Vector,
    },

    /// Finish a widget drag at the resolved target.
    ///
    /// `floating_widget_id` names the dragged widget: its floating
    /// wrapper when one exists (the two ids coincide), or the docked
    /// widget being extracted.
    #[serde(rename = "WIDGET_DRAG_END", rename_all = "camelCase")]
    WidgetDragEnd {
        floating_widget_id: WidgetId,
        target: DropTarget,
    },

    /// Activate a tab in its widget.
    #[serde(rename = "TAB_CLICK", rename_all = "camelCase")]
    TabClick { widget_id: WidgetId, tab_id: TabId },

    /// Detach a single tab into a fresh floating widget.
    #[serde(rename = "WIDGET_TAB_DRAG_START", rename_all = "camelCase")]
    TabDragStart {
        widget_id: WidgetId,
        tab_id: TabId,
        new_floating_widget_id: WidgetId,
        position: Point,
    },

    /// Resize a floating widget.
    #[serde(rename = "FLOATING_WIDGET_RESIZE", rename_all = "camelCase")]
    FloatingWidgetResize {
        floating_widget_id: WidgetId,
        bounds: Size,
    },

    /// Raise a floating widget to the front of the z-order.
    #[serde(rename = "FLOATING_WIDGET_BRING_TO_FRONT", rename_all = "camelCase")]
    FloatingWidgetBringToFront { floating_widget_id: WidgetId },
}
