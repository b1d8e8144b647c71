#![forbid(unsafe_code)]

//! Test harness and host lifecycle for Berth.
//!
//! # Role in Berth
//! `berth-harness` carries what the library crates need around them to be
//! exercised: canonical layout fixtures shared by the state and widget
//! test suites, JSON snapshot helpers, and the hosting application's
//! `initialize`/`terminate` lifecycle that view layers depend on.

pub mod fixtures;
pub mod lifecycle;

pub use fixtures::{
    FloatingOverDock, SamplePair, assert_valid, docked_pair, floating_over_dock, layout_snapshot,
    strip_region, tab_multiset,
};
pub use lifecycle::{ACTION_TRANSPORT, HostConfig, HostError, HostPhase, initialize, terminate};
