#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! The host (DOM, winit, a test driver) normalizes whatever it receives
//! into [`PointerEvent`] values: one `Down`, any number of `Move`s, then
//! exactly one `Up` or `Cancel` per gesture. Everything downstream (the
//! captor, the drag monitor, the view bindings) consumes only these.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Pointer position in logical pixels.
    pub pos: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pos: Point) -> Self {
        Self {
            kind,
            pos,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer button pressed down.
    Down(PointerButton),

    /// Pointer moved (with or without a button held).
    Move,

    /// Pointer button released.
    Up(PointerButton),

    /// The gesture was cancelled by the host (focus loss, pointer grab
    /// stolen, touch sequence aborted).
    Cancel,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointerButton {
    /// Left/primary button (or touch contact).
    Left,

    /// Right/secondary button.
    Right,

    /// Middle button.
    Middle,
}

bitflags! {
    /// Modifier keys that can be held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
