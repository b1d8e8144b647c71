#![forbid(unsafe_code)]

//! Tab-bar button bindings.

use berth_core::event::{PointerButton, PointerEvent, PointerEventKind};
use berth_core::geometry::Rect;
use berth_state::{DockAction, WidgetId};

/// The button cluster at the end of a floating widget's tab bar.
///
/// Docked widgets render no buttons here, so the binding is inert unless a
/// floating wrapper id is set.
#[derive(Debug, Clone)]
pub struct TabBarButtons {
    floating_widget_id: Option<WidgetId>,
    rect: Rect,
}

impl TabBarButtons {
    /// Create the binding with the rendered button bounds.
    #[must_use]
    pub const fn new(floating_widget_id: Option<WidgetId>, rect: Rect) -> Self {
        Self {
            floating_widget_id,
            rect,
        }
    }

    /// Update the rendered bounds after a relayout.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Update the floating wrapper id when the widget docks or floats.
    pub fn set_floating_widget_id(&mut self, id: Option<WidgetId>) {
        self.floating_widget_id = id;
    }

    /// A left-button down inside the buttons raises the floating widget.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_pointer(
        &self,
        event: &PointerEvent,
        dispatch: &mut dyn FnMut(DockAction),
    ) -> bool {
        let Some(floating_widget_id) = self.floating_widget_id else {
            return false;
        };
        if event.kind != PointerEventKind::Down(PointerButton::Left)
            || !self.rect.contains(event.pos)
        {
            return false;
        }
        dispatch(DockAction::FloatingWidgetBringToFront { floating_widget_id });
        true
    }
}
