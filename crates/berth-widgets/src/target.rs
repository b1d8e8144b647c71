#![forbid(unsafe_code)]

//! Drop-target resolution.
//!
//! At drag end the view layer knows the set of currently rendered
//! candidate regions; [`resolve_drop_target`] picks the winner for a
//! pointer position. The function is pure: the same regions, position,
//! and pre-allocated fallback id yield the same target, every time.
//!
//! Resolution order, highest first:
//!
//! 1. A tab strip inside a widget's tab bar (yields a precise insertion
//!    index against the tab midpoints).
//! 2. A panel docking region.
//! 3. No containing region: the floating-widget fallback.
//!
//! Ties among containing regions of the same kind go to the higher
//! z-order, then to the smaller (innermost, most specific) region.

use berth_core::geometry::{Point, Rect};
use berth_state::{DropTarget, PanelId, PanelSide, WidgetId};

/// What a region resolves to when the pointer lands in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRegionKind {
    /// The tab bar of a widget; `tab_rects` are the rendered tab bounds in
    /// bar order, used to derive the insertion index.
    TabStrip {
        widget_id: WidgetId,
        tab_rects: Vec<Rect>,
    },
    /// An edge zone of a panel.
    PanelEdge { panel_id: PanelId, side: PanelSide },
}

/// A rendered candidate region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRegion {
    pub rect: Rect,
    /// Stacking order of the owning surface; higher is closer to the user.
    pub z: u16,
    pub kind: DropRegionKind,
}

impl DropRegion {
    /// Kind priority class: tab strips beat panel edges.
    const fn priority(&self) -> u8 {
        match self.kind {
            DropRegionKind::TabStrip { .. } => 2,
            DropRegionKind::PanelEdge { .. } => 1,
        }
    }

    /// Whether this region belongs to the given widget's tab bar.
    #[must_use]
    pub fn is_for_widget(&self, widget: WidgetId) -> bool {
        matches!(self.kind, DropRegionKind::TabStrip { widget_id, .. } if widget_id == widget)
    }
}

/// Insertion index for a pointer x against rendered tab bounds: the number
/// of tabs whose midpoint lies at or left of the pointer.
#[must_use]
pub fn tab_insertion_index(tab_rects: &[Rect], x: i32) -> usize {
    tab_rects
        .iter()
        .take_while(|rect| x >= rect.x + rect.width / 2)
        .count()
}

/// The winning candidate region for a pointer position, if any.
///
/// `None` means the pointer is over empty space, the floating-widget
/// fallback. Hosts call this per frame mid-drag to recompute the drop
/// candidate for preview highlighting; [`resolve_drop_target`] applies the
/// same choice at drag end.
#[must_use]
pub fn candidate_region<'a>(regions: &'a [DropRegion], pos: Point) -> Option<&'a DropRegion> {
    regions
        .iter()
        .filter(|region| region.rect.contains(pos))
        .min_by_key(|region| {
            (
                std::cmp::Reverse(region.priority()),
                std::cmp::Reverse(region.z),
                region.rect.area(),
            )
        })
}

/// Resolve the drop target for a pointer position.
///
/// `fallback_id` is a freshly allocated widget id used only when no region
/// contains the pointer (passed in so resolution stays pure).
#[must_use]
pub fn resolve_drop_target(
    regions: &[DropRegion],
    pos: Point,
    fallback_id: WidgetId,
) -> DropTarget {
    match candidate_region(regions, pos) {
        Some(DropRegion {
            kind: DropRegionKind::TabStrip {
                widget_id,
                tab_rects,
            },
            ..
        }) => DropTarget::Tab {
            widget_id: *widget_id,
            tab_index: tab_insertion_index(tab_rects, pos.x),
        },
        Some(DropRegion {
            kind: DropRegionKind::PanelEdge { panel_id, side },
            ..
        }) => DropTarget::Panel {
            panel_id: *panel_id,
            side: *side,
        },
        None => DropTarget::FloatingWidget {
            new_widget_id: fallback_id,
            position: pos,
        },
    }
}
