#![forbid(unsafe_code)]

//! Core: pointer input normalization, gesture capture, and drag sessions.
//!
//! # Role in Berth
//! `berth-core` is the input layer. It owns the normalized pointer event
//! types, the gesture-scoped pointer captor, the single-shot timer, and the
//! drag-session state machine that the view bindings drive.
//!
//! # Primary responsibilities
//! - **PointerEvent**: canonical pointer input (down, move, up, cancel).
//! - **PointerCaptor**: grip-scoped capture for the lifetime of one gesture.
//! - **SingleShot**: rearmable deadline timer, polled by the host loop.
//! - **DragMonitor**: the `Idle → Armed → Dragging` session state machine.
//!
//! # How it fits in the system
//! The view bindings (`berth-widgets`) feed host pointer events through a
//! captor into a shared drag monitor, resolve drop targets, and dispatch
//! layout actions (`berth-state`). Nothing in this crate knows about the
//! layout tree; the dragged payload is a caller-supplied generic.

pub mod captor;
pub mod drag;
pub mod event;
pub mod geometry;
pub mod timer;
