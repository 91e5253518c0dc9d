//! Blockchain data retrieval from pools of untrusted public nodes.
//!
//! # Architecture Overview
//!
//! ```text
//!  caller ──▶ ElectrumDispatcher ──▶ NodePool.pick ──▶ electrum::client
//!     ▲             │ (≤3 attempts)                      (blocking TCP,
//!     │             ▼                                     one line in/out)
//!     └──── ElectrumEvent channel
//!
//!  caller ──▶ RestClient ──▶ NodePool.pick ──▶ reqwest (JSON over HTTP)
//!     ▲          │
//!     │          ▼
//!     └──── per-category event channels        Session counts in-flight
//!                                              calls until settled
//! ```
//!
//! Two transports are supported: line-delimited JSON-RPC over raw TCP
//! ("Electrum" nodes) and JSON-over-HTTP gateways (address indexing and
//! Ethereum RPC). Node selection is uniformly random per attempt with no
//! blacklisting; failure handling and the bounded retry budget live in the
//! dispatcher.

pub mod config;
pub mod electrum;
pub mod error;
pub mod fees;
pub mod nodes;
pub mod observability;
pub mod rest;
pub mod session;

pub use config::PoolConfig;
pub use electrum::{ElectrumDispatcher, ElectrumEvent, ElectrumRequest};
pub use error::{ChainError, ChainResult};
pub use nodes::{Blockchain, NodeEndpoint, NodePool, Transport};
pub use rest::RestClient;
pub use session::Session;
