//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and tests
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Level configurable via RUST_LOG, defaults to crate-level debug

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber. Safe to call more than once;
/// later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chainscout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
