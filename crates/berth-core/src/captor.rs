#![forbid(unsafe_code)]

//! Gesture-scoped pointer capture.
//!
//! [`PointerCaptor`] scopes a gesture to one initiating element (the grip
//! rectangle) and then owns the pointer for the gesture's lifetime: once a
//! down inside the grip is observed, every subsequent move/up/cancel is
//! routed to the gesture regardless of where the pointer is, the
//! equivalent of attaching document-wide listeners after the down.
//!
//! # Invariants
//!
//! 1. At most one capture is active per captor.
//! 2. Exactly one `Up` (or `Cancel`) is delivered per delivered `Down`;
//!    further ups are ignored until the next down.
//! 3. After `Up`/`Cancel`/[`release`](PointerCaptor::release), no events
//!    are routed until a new down inside the grip; nothing leaks across
//!    gestures.
//! 4. Only the button that started the capture can end it; other buttons'
//!    downs and ups during a capture are ignored.

use crate::event::{PointerButton, PointerEvent, PointerEventKind};
use crate::geometry::{Point, Rect};

/// An event routed to the gesture that owns the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Pointer went down inside the grip; capture begins.
    Down(Point),
    /// Pointer moved while captured (may be outside the grip).
    Move(Point),
    /// Pointer released; capture ends.
    Up(Point),
    /// Host cancelled the gesture; capture ends.
    Cancel,
}

/// Routes pointer events to one gesture at a time.
#[derive(Debug, Clone)]
pub struct PointerCaptor {
    grip: Rect,
    capture: Option<PointerButton>,
}

impl PointerCaptor {
    /// Create a captor scoped to the given grip rectangle.
    #[must_use]
    pub const fn new(grip: Rect) -> Self {
        Self {
            grip,
            capture: None,
        }
    }

    /// The current grip rectangle.
    #[inline]
    #[must_use]
    pub const fn grip(&self) -> Rect {
        self.grip
    }

    /// Update the grip rectangle after a relayout.
    ///
    /// An active capture is unaffected: the gesture already owns the
    /// pointer and tracks it independently of the grip.
    pub fn set_grip(&mut self, grip: Rect) {
        self.grip = grip;
    }

    /// Whether a gesture currently owns the pointer.
    #[inline]
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Process a pointer event, returning the routed capture event if the
    /// gesture should observe it.
    pub fn process(&mut self, event: &PointerEvent) -> Option<CaptureEvent> {
        match (event.kind, self.capture) {
            (PointerEventKind::Down(button), None) if self.grip.contains(event.pos) => {
                self.capture = Some(button);
                Some(CaptureEvent::Down(event.pos))
            }
            // Down outside the grip, or a second down while captured
            // (concurrent gestures are rejected).
            (PointerEventKind::Down(_), _) => None,
            (PointerEventKind::Move, Some(_)) => Some(CaptureEvent::Move(event.pos)),
            (PointerEventKind::Up(button), Some(owner)) if button == owner => {
                self.capture = None;
                Some(CaptureEvent::Up(event.pos))
            }
            (PointerEventKind::Up(_), _) => None,
            (PointerEventKind::Cancel, Some(_)) => {
                self.capture = None;
                Some(CaptureEvent::Cancel)
            }
            (PointerEventKind::Move | PointerEventKind::Cancel, None) => None,
        }
    }

    /// Force-drop an active capture without delivering an event.
    ///
    /// Teardown path: the owning component is going away and must not keep
    /// routing events into a discarded session.
    pub fn release(&mut self) {
        self.capture = None;
    }
}
