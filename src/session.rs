//! In-flight request accounting per verification session.
//!
//! # Responsibilities
//! - Count outstanding REST calls for one session
//! - Answer "is everything settled yet" without caller bookkeeping
//!
//! # Design Decisions
//! - Owned by the caller and passed into query calls explicitly; there is
//!   no process-wide counter
//! - Decrement is a Drop guard, so a terminal outcome decrements exactly
//!   once no matter which completion path ran

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Tracks in-flight queries for one verification session (e.g. "fetch
/// balance + unspent outputs for wallet W").
#[derive(Debug, Clone, Default)]
pub struct Session {
    in_flight: Arc<AtomicU64>,
}

impl Session {
    /// Create a new session with no outstanding queries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly submitted query. Returns a guard that decrements the
    /// counter when dropped, i.e. at the query's terminal outcome.
    pub fn track(&self) -> SessionGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        SessionGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Number of queries still awaiting a terminal outcome.
    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// True when every submitted query has reached a terminal outcome.
    pub fn is_settled(&self) -> bool {
        let left = self.in_flight();
        tracing::debug!(in_flight = left, "Session settlement check");
        left == 0
    }
}

/// Guard for one in-flight query. Dropping it records the terminal outcome.
#[derive(Debug)]
pub struct SessionGuard {
    in_flight: Arc<AtomicU64>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
