#![forbid(unsafe_code)]

//! View bindings: the thin layer between host gestures and the layout.
//!
//! # Role in Berth
//! `berth-widgets` turns captured pointer gestures into drag-session calls
//! and dispatched actions. It owns no layout state: every handler receives
//! the drag monitor, the candidate drop regions, a dispatch sink, and a
//! fresh-id source as explicit arguments (a [`DragContext`]).
//!
//! # Primary responsibilities
//! - **target**: candidate [`DropRegion`]s and the pure drop-target
//!   resolver.
//! - **tab_bar**: the grip binding that arms, promotes, and completes
//!   widget drags.
//! - **tab_strip**: tab click activation and single-tab detach.
//! - **buttons**: floating-widget raise binding.

pub mod buttons;
pub mod tab_bar;
pub mod tab_strip;
pub mod target;

pub use buttons::TabBarButtons;
pub use tab_bar::{DragContext, DragSource, TabBar};
pub use tab_strip::TabStrip;
pub use target::{
    DropRegion, DropRegionKind, candidate_region, resolve_drop_target, tab_insertion_index,
};
