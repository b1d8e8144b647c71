#![forbid(unsafe_code)]

//! Hosting-application lifecycle.
//!
//! [`initialize`] sets up the process-wide state the view layer depends
//! on: a session-keyed scratch directory and the shared action transport.
//! [`terminate`] undoes it. Both are idempotent, and the phase state is an
//! explicit enum guarded against re-entry rather than a boolean flag.
//!
//! Multiple independent call sites may attempt to configure the shared
//! transport; a duplicate registration is the single tolerated (swallowed)
//! failure during setup. Every other setup error propagates and leaves
//! the host back in `Idle`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Name of the shared dock-action transport.
pub const ACTION_TRANSPORT: &str = "berth.dock-actions";

/// Where the host is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// Not initialized (the state after `terminate`, partial or not).
    Idle,
    /// `initialize` is running; re-entry is rejected.
    Initializing,
    /// Ready for use.
    Ready,
}

/// Configuration for [`initialize`].
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Session id keying the scratch directory. Generated when absent, so
    /// every session's resources land in a unique directory.
    pub session_id: Option<String>,
    /// Parent for the scratch directory. Defaults to the system temp dir.
    pub scratch_root: Option<PathBuf>,
}

/// Setup/teardown failure.
#[derive(Debug)]
pub enum HostError {
    /// `initialize` called re-entrantly while already initializing.
    InitInProgress,
    /// Scratch directory could not be created or removed.
    Scratch { path: PathBuf, source: io::Error },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitInProgress => write!(f, "host initialization is already in progress"),
            Self::Scratch { path, source } => {
                write!(f, "scratch directory {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scratch { source, .. } => Some(source),
            Self::InitInProgress => None,
        }
    }
}

/// Duplicate registration of a shared transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportAlreadyRegistered(pub String);

impl fmt::Display for TransportAlreadyRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport {:?} is already registered", self.0)
    }
}

impl std::error::Error for TransportAlreadyRegistered {}

#[derive(Debug)]
struct HostState {
    phase: HostPhase,
    session_id: Option<String>,
    scratch_dir: Option<PathBuf>,
}

static HOST: Mutex<HostState> = Mutex::new(HostState {
    phase: HostPhase::Idle,
    session_id: None,
    scratch_dir: None,
});

static TRANSPORTS: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

fn lock_host() -> MutexGuard<'static, HostState> {
    HOST.lock().unwrap_or_else(PoisonError::into_inner)
}

fn lock_transports() -> MutexGuard<'static, BTreeSet<String>> {
    TRANSPORTS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Register a shared transport by name.
///
/// Errors if the name is already registered; callers that share
/// transport state with other call sites treat that as "someone got here
/// first" and move on.
pub fn register_transport(name: &str) -> Result<(), TransportAlreadyRegistered> {
    let mut transports = lock_transports();
    if !transports.insert(name.to_owned()) {
        return Err(TransportAlreadyRegistered(name.to_owned()));
    }
    Ok(())
}

/// Remove a transport registration. No effect if absent.
pub fn unregister_transport(name: &str) {
    lock_transports().remove(name);
}

/// Whether a transport is currently registered.
#[must_use]
pub fn transport_registered(name: &str) -> bool {
    lock_transports().contains(name)
}

fn generate_session_id() -> String {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("session-{}-{n}", std::process::id())
}

/// Current lifecycle phase.
#[must_use]
pub fn phase() -> HostPhase {
    lock_host().phase
}

/// The active session's scratch directory, if initialized.
#[must_use]
pub fn scratch_dir() -> Option<PathBuf> {
    lock_host().scratch_dir.clone()
}

/// Set up the host for the view layer.
///
/// No-op when already initialized. Creates the session-keyed scratch
/// directory and registers the action transport; a duplicate transport
/// registration is swallowed, any other failure propagates with the phase
/// rolled back to `Idle`.
pub fn initialize(config: HostConfig) -> Result<(), HostError> {
    let mut host = lock_host();
    match host.phase {
        HostPhase::Ready => {
            tracing::debug!(message = "host.initialize", outcome = "already_ready");
            return Ok(());
        }
        HostPhase::Initializing => return Err(HostError::InitInProgress),
        HostPhase::Idle => {}
    }
    host.phase = HostPhase::Initializing;

    let session_id = config.session_id.unwrap_or_else(generate_session_id);
    let root = config.scratch_root.unwrap_or_else(std::env::temp_dir);
    let dir = root.join("berth").join(&session_id);
    if let Err(source) = fs::create_dir_all(&dir) {
        host.phase = HostPhase::Idle;
        return Err(HostError::Scratch { path: dir, source });
    }

    if let Err(err) = register_transport(ACTION_TRANSPORT) {
        // Another call site configured the shared transport first.
        tracing::debug!(message = "host.transport_reuse", transport = %err.0);
    }

    host.session_id = Some(session_id);
    host.scratch_dir = Some(dir);
    host.phase = HostPhase::Ready;
    tracing::debug!(message = "host.initialize", outcome = "ready");
    Ok(())
}

/// Undo the setup made by [`initialize`].
///
/// No-op when not initialized. Removes the session's scratch directory
/// and the transport registration. The phase is `Idle` afterward even if
/// a teardown step past the first fails; the error is still reported.
pub fn terminate() -> Result<(), HostError> {
    let mut host = lock_host();
    if host.phase == HostPhase::Idle {
        return Ok(());
    }

    let scratch = host.scratch_dir.take();
    host.session_id = None;

    let mut result = Ok(());
    if let Some(dir) = scratch {
        if let Err(source) = fs::remove_dir_all(&dir) {
            if source.kind() != io::ErrorKind::NotFound {
                result = Err(HostError::Scratch { path: dir, source });
            }
        }
    }
    unregister_transport(ACTION_TRANSPORT);

    host.phase = HostPhase::Idle;
    tracing::debug!(message = "host.terminate", ok = result.is_ok());
    result
}
