//! Lifecycle state and wakeup signalling for the shared store.
//!
//! The data state, exit flag and refresh flag are atomics so they can be
//! checked without the store mutex. The condvar below is only a wakeup
//! channel for the fetcher's inter-cycle wait; it guards no data.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Readiness of the shared data set.
///
/// Transitions only move forward: `Uninitialized → Loading → Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum DataState {
    /// Nothing has been loaded yet.
    Uninitialized = 0,
    /// The reference loader has started.
    Loading = 1,
    /// At least one airport load or fetch cycle has been published.
    Ready = 2,
}

impl DataState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => DataState::Uninitialized,
            1 => DataState::Loading,
            _ => DataState::Ready,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataState::Uninitialized => "waiting",
            DataState::Loading => "loading",
            DataState::Ready => "ready",
        }
    }
}

impl std::fmt::Display for DataState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// The full interval passed.
    Elapsed,
    /// Exit was requested.
    Exit,
    /// An on-demand refresh was requested.
    Refresh,
}

#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: AtomicU8,
    exit: AtomicBool,
    refresh: AtomicBool,
    wake_lock: Mutex<()>,
    wake: Condvar,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(DataState::Uninitialized as u8),
            exit: AtomicBool::new(false),
            refresh: AtomicBool::new(false),
            wake_lock: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    pub(crate) fn state(&self) -> DataState {
        DataState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move forward to `target`. Never moves backwards.
    ///
    /// Returns the state observed before the call.
    pub(crate) fn advance(&self, target: DataState) -> DataState {
        DataState::from_u8(self.state.fetch_max(target as u8, Ordering::AcqRel))
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually set the flag.
    pub(crate) fn request_exit(&self) -> bool {
        let first = !self.exit.swap(true, Ordering::AcqRel);
        self.notify();
        first
    }

    pub(crate) fn request_refresh(&self) {
        self.refresh.store(true, Ordering::Release);
        self.notify();
    }

    pub(crate) fn refresh_pending(&self) -> bool {
        self.refresh.load(Ordering::Acquire)
    }

    /// Block until `timeout` passes, exit is requested, or (when
    /// `consume_refresh` is set) a refresh is requested.
    pub(crate) fn wait(&self, timeout: Duration, consume_refresh: bool) -> WakeReason {
        let deadline = Instant::now() + timeout;
        let mut guard = self.wake_lock.lock();
        loop {
            if self.exit_requested() {
                return WakeReason::Exit;
            }
            if consume_refresh && self.refresh.swap(false, Ordering::AcqRel) {
                return WakeReason::Refresh;
            }
            if self.wake.wait_until(&mut guard, deadline).timed_out() {
                return if self.exit_requested() {
                    WakeReason::Exit
                } else {
                    WakeReason::Elapsed
                };
            }
        }
    }

    // Taking the lock orders the flag store before any waiter's re-check.
    fn notify(&self) {
        let _guard = self.wake_lock.lock();
        self.wake.notify_all();
    }
}
