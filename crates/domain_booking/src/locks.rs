//! Per-session booking locks
//!
//! The seat-uniqueness invariant relies on the availability check and the
//! ticket write happening without interleaving. Instead of one process-wide
//! mutex serializing every booking, each session gets its own lock, created
//! on demand: conflicting requests for one session queue up, bookings for
//! unrelated sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tokio::sync::Mutex;

use core_kernel::SessionId;

/// On-demand registry of per-session mutexes
#[derive(Default)]
pub struct SessionLocks {
    // Std mutex: the registry is only held long enough to clone an Arc,
    // never across an await point.
    locks: StdMutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for the session, creating it on first use
    pub fn lock_for(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("session lock registry poisoned");
        locks.entry(session_id).or_default().clone()
    }
}
