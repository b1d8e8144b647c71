#![forbid(unsafe_code)]

//! Dock layout state: the shared layout tree and its single writer path.
//!
//! # Role in Berth
//! `berth-state` owns the [`DockLayout`] tree (panels, widgets, tabs, and
//! floating widgets) plus the tagged [`DockAction`]s that describe every
//! permitted transition and the pure [`reduce`] function that applies
//! them. All layout mutation flows through `reduce`; everything else is
//! read-only access, validation, or setup-time construction.
//!
//! # Primary responsibilities
//! - **Ids**: `TabId` / `WidgetId` / `PanelId` newtypes with allocation
//!   guaranteed distinct from every id in the layout.
//! - **DockLayout**: entity maps, ordering, and invariant validation.
//! - **DockAction / DropTarget**: the dispatch wire shape.
//! - **reduce**: `(layout, action) -> layout'`, atomic and invariant
//!   preserving.

pub mod action;
pub mod id;
pub mod layout;
pub mod reducer;

pub use action::{DockAction, DropTarget, PanelSide};
pub use id::{PanelId, TabId, WidgetId};
pub use layout::{
    DockLayout, EmptyPanelPolicy, FloatingWidgetState, LayoutError, PanelAxis, PanelState,
    TabState, WidgetLocation, WidgetState,
};
pub use reducer::{DEFAULT_FLOATING_BOUNDS, reduce};
