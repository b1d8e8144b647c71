#![forbid(unsafe_code)]

//! Drag-session state machine.
//!
//! [`DragMonitor`] owns the transition from "pointer down" to "actively
//! dragging". A gesture is promoted to a drag by whichever happens first:
//! the long-press timer fires, or a pointer move is observed while armed.
//! The losing path is cancelled: movement stops the timer, and once the
//! timer has fired further movement is ordinary drag movement.
//!
//! The dragged payload is generic (the widget layer passes its widget id)
//! so this crate stays independent of the layout model.
//!
//! # State machine
//!
//! ```text
//! Idle --down--> Armed --move or timer--> Dragging --up--> Idle
//!                  |                          |
//!                  +-----up (plain click)-----+--cancel--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one session exists per monitor at any instant.
//! 2. Exactly one promotion occurs per session, no matter how many moves
//!    follow; the timer is stopped at the moment of a movement promotion.
//! 3. `Ended` is emitted exactly once per promoted session.
//! 4. A pointer-down observed while a session is active is ignored.
//! 5. Every exit path (drop, cancel, [`cancel`](DragMonitor::cancel))
//!    disarms the timer and discards the session.

use std::time::Duration;
use web_time::Instant;

use crate::geometry::{Point, Vector};
use crate::timer::SingleShot;

/// Delay before a stationary pointer-down is promoted to a drag.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(300);

/// Tunables for drag promotion.
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Long-press promotion delay (default: 300ms).
    pub start_delay: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            start_delay: DEFAULT_START_DELAY,
        }
    }
}

/// Where the monitor is in the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in flight.
    Idle,
    /// Pointer is down; promotion race is running.
    Armed,
    /// Drag in progress.
    Dragging,
}

/// An active drag: the payload being dragged plus pointer bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<T> {
    payload: T,
    initial_pointer_position: Point,
    total_delta: Vector,
}

impl<T> DragSession<T> {
    /// The payload captured at pointer-down (e.g. the dragged widget id).
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the session, returning the payload.
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Pointer position recorded at pointer-down.
    #[inline]
    #[must_use]
    pub fn initial_pointer_position(&self) -> Point {
        self.initial_pointer_position
    }

    /// Cumulative pointer delta since the session was armed.
    #[inline]
    #[must_use]
    pub fn total_delta(&self) -> Vector {
        self.total_delta
    }
}

/// Mid-gesture output of the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// The gesture was promoted to a drag (by movement or by timer).
    Started {
        /// The pointer position recorded at pointer-down.
        position: Point,
    },
    /// The pointer moved while dragging.
    Moved {
        /// Movement since the previous observed position.
        delta: Vector,
        /// Current pointer position.
        position: Point,
    },
}

/// Outcome of a pointer-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragRelease<T> {
    /// No gesture was in flight.
    None,
    /// Up before promotion: a plain click. The payload is handed back.
    Click(T),
    /// Up after promotion: the drag is complete and the caller should
    /// resolve a drop target at `position`.
    Drop {
        session: DragSession<T>,
        position: Point,
    },
}

/// The `Idle → Armed → Dragging` drag-session controller.
#[derive(Debug, Clone)]
pub struct DragMonitor<T> {
    timer: SingleShot,
    phase: DragPhase,
    last_pos: Point,
    session: Option<DragSession<T>>,
}

impl<T> DragMonitor<T> {
    /// Create an idle monitor.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            timer: SingleShot::new(config.start_delay),
            phase: DragPhase::Idle,
            last_pos: Point::default(),
            session: None,
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in progress (armed sessions don't count).
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// The active session, if any (armed or dragging).
    #[inline]
    pub fn session(&self) -> Option<&DragSession<T>> {
        self.session.as_ref()
    }

    /// Arm a session at pointer-down.
    ///
    /// Returns `false` (and does nothing) if a session is already active:
    /// a second pointer-down is rejected, not queued.
    pub fn on_pointer_down(&mut self, payload: T, pos: Point, now: Instant) -> bool {
        if self.phase != DragPhase::Idle {
            return false;
        }
        self.session = Some(DragSession {
            payload,
            initial_pointer_position: pos,
            total_delta: Vector::ZERO,
        });
        self.last_pos = pos;
        self.phase = DragPhase::Armed;
        self.timer.start(now);
        true
    }

    /// Begin dragging directly at `initial`, skipping the promotion race.
    ///
    /// This is the drag-start trigger for hosts that run their own gesture
    /// detection. Ignored if a session is already active.
    pub fn begin(&mut self, payload: T, initial: Point) -> bool {
        if self.phase != DragPhase::Idle {
            return false;
        }
        self.session = Some(DragSession {
            payload,
            initial_pointer_position: initial,
            total_delta: Vector::ZERO,
        });
        self.last_pos = initial;
        self.phase = DragPhase::Dragging;
        self.log_promote("direct");
        true
    }

    /// Observe a pointer move.
    ///
    /// While armed, the first move wins the promotion race and stops the
    /// timer. While dragging, updates the cumulative delta and reports the
    /// per-move delta.
    pub fn on_pointer_move(&mut self, pos: Point, _now: Instant) -> Option<DragEvent> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Armed => {
                self.timer.stop();
                self.phase = DragPhase::Dragging;
                self.log_promote("move");
                // The promoting move's displacement folds into the next
                // delta: last_pos stays at the initial position.
                let initial = self
                    .session
                    .as_ref()
                    .map(|s| s.initial_pointer_position)
                    .unwrap_or(pos);
                Some(DragEvent::Started { position: initial })
            }
            DragPhase::Dragging => {
                let delta = pos - self.last_pos;
                self.last_pos = pos;
                if let Some(session) = self.session.as_mut() {
                    session.total_delta += delta;
                }
                Some(DragEvent::Moved {
                    delta,
                    position: pos,
                })
            }
        }
    }

    /// Poll the long-press timer.
    ///
    /// Returns `Started` if the timer fired while armed. Call from the
    /// host loop's tick; a move that arrived first has already stopped the
    /// timer, so the two promotion paths are mutually exclusive.
    pub fn poll(&mut self, now: Instant) -> Option<DragEvent> {
        if self.phase == DragPhase::Armed && self.timer.poll(now) {
            self.phase = DragPhase::Dragging;
            self.log_promote("timer");
            let initial = self
                .session
                .as_ref()
                .map(|s| s.initial_pointer_position)
                .unwrap_or(self.last_pos);
            return Some(DragEvent::Started { position: initial });
        }
        None
    }

    /// Observe the pointer-up that ends the gesture.
    pub fn on_pointer_up(&mut self, pos: Point) -> DragRelease<T> {
        self.timer.stop();
        let phase = self.phase;
        self.phase = DragPhase::Idle;
        match (phase, self.session.take()) {
            (DragPhase::Armed, Some(session)) => DragRelease::Click(session.payload),
            (DragPhase::Dragging, Some(mut session)) => {
                let delta = pos - self.last_pos;
                session.total_delta += delta;
                DragRelease::Drop {
                    session,
                    position: pos,
                }
            }
            _ => DragRelease::None,
        }
    }

    /// Abandon the gesture on any phase.
    ///
    /// Returns the session if a drag had started (so the caller can tell a
    /// cancelled drag from a cancelled click); all resources are released
    /// either way.
    pub fn cancel(&mut self) -> Option<DragSession<T>> {
        self.timer.stop();
        let was_dragging = self.phase == DragPhase::Dragging;
        self.phase = DragPhase::Idle;
        let session = self.session.take();
        if was_dragging { session } else { None }
    }

    #[cfg(feature = "tracing")]
    fn log_promote(&self, reason: &str) {
        tracing::debug!(message = "drag.promote", reason);
    }

    #[cfg(not(feature = "tracing"))]
    fn log_promote(&self, _reason: &str) {}
}

impl<T> Default for DragMonitor<T> {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}
