//! Crate-wide error definitions.

use thiserror::Error;

use crate::nodes::{Blockchain, Transport};

/// Errors that can occur while querying blockchain nodes.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The node pool has no candidate for the requested network/transport pair.
    #[error("no {transport} node available for {network}")]
    NoAvailableNode {
        network: Blockchain,
        transport: Transport,
    },

    /// The remote completed the exchange but returned no usable payload.
    #[error("no answer from server")]
    NoAnswer,

    /// DNS, connect, timeout or read/write fault during a socket or HTTP exchange.
    #[error("transport fault: {0}")]
    Transport(String),

    /// The network has no mapping on the REST gateway.
    #[error("network {0} is not supported by the REST gateway")]
    UnsupportedNetwork(Blockchain),

    /// Non-200 response from a REST gateway.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Malformed numeric answer during result interpretation.
    #[error("malformed numeric answer: {0}")]
    NumericFormat(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O error outside a dispatch attempt.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for chainscout operations.
pub type ChainResult<T> = Result<T, ChainError>;
