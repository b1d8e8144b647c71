//! The dispatch wire shape: tagged JSON with camelCase fields.

use berth_core::geometry::{Point, Size, Vector};
use berth_state::{DockAction, DropTarget, PanelId, PanelSide, TabId, WidgetId};
use serde_json::json;

fn to_value(action: &DockAction) -> serde_json::Value {
    serde_json::to_value(action).expect("actions serialize")
}

#[test]
fn widget_drag_shape() {
    let action = DockAction::WidgetDrag {
        floating_widget_id: WidgetId::new(4),
        drag_by: Vector::new(3, -2),
    };
    assert_eq!(
        to_value(&action),
        json!({
            "type": "WIDGET_DRAG",
            "floatingWidgetId": 4,
            "dragBy": {"x": 3, "y": -2},
        })
    );
}

#[test]
fn drag_end_tab_target_shape() {
    let action = DockAction::WidgetDragEnd {
        floating_widget_id: WidgetId::new(4),
        target: DropTarget::Tab {
            widget_id: WidgetId::new(2),
            tab_index: 1,
        },
    };
    assert_eq!(
        to_value(&action),
        json!({
            "type": "WIDGET_DRAG_END",
            "floatingWidgetId": 4,
            "target": {"type": "tab", "widgetId": 2, "tabIndex": 1},
        })
    );
}

#[test]
fn drag_end_panel_target_shape() {
    let action = DockAction::WidgetDragEnd {
        floating_widget_id: WidgetId::new(4),
        target: DropTarget::Panel {
            panel_id: PanelId::new(9),
            side: PanelSide::Start,
        },
    };
    assert_eq!(
        to_value(&action),
        json!({
            "type": "WIDGET_DRAG_END",
            "floatingWidgetId": 4,
            "target": {"type": "panel", "panelId": 9, "side": "start"},
        })
    );
}

#[test]
fn drag_end_floating_fallback_shape() {
    let action = DockAction::WidgetDragEnd {
        floating_widget_id: WidgetId::new(4),
        target: DropTarget::FloatingWidget {
            new_widget_id: WidgetId::new(11),
            position: Point::new(60, 200),
        },
    };
    assert_eq!(
        to_value(&action),
        json!({
            "type": "WIDGET_DRAG_END",
            "floatingWidgetId": 4,
            "target": {
                "type": "floatingWidget",
                "newWidgetId": 11,
                "position": {"x": 60, "y": 200},
            },
        })
    );
}

#[test]
fn supplemental_action_shapes() {
    assert_eq!(
        to_value(&DockAction::TabClick {
            widget_id: WidgetId::new(2),
            tab_id: TabId::new(7),
        }),
        json!({"type": "TAB_CLICK", "widgetId": 2, "tabId": 7})
    );
    assert_eq!(
        to_value(&DockAction::FloatingWidgetResize {
            floating_widget_id: WidgetId::new(4),
            bounds: Size::new(400, 300),
        }),
        json!({
            "type": "FLOATING_WIDGET_RESIZE",
            "floatingWidgetId": 4,
            "bounds": {"width": 400, "height": 300},
        })
    );
}

#[test]
fn actions_round_trip() {
    let actions = [
        DockAction::WidgetDrag {
            floating_widget_id: WidgetId::new(4),
            drag_by: Vector::new(-5, 12),
        },
        DockAction::WidgetDragEnd {
            floating_widget_id: WidgetId::new(4),
            target: DropTarget::FloatingWidget {
                new_widget_id: WidgetId::new(11),
                position: Point::new(-3, 8),
            },
        },
        DockAction::TabDragStart {
            widget_id: WidgetId::new(2),
            tab_id: TabId::new(7),
            new_floating_widget_id: WidgetId::new(12),
            position: Point::new(1, 1),
        },
        DockAction::FloatingWidgetBringToFront {
            floating_widget_id: WidgetId::new(4),
        },
    ];
    for action in &actions {
        let text = serde_json::to_string(action).expect("serialize");
        let back: DockAction = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(&back, action);
    }
}
