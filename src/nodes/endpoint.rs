//! Node endpoint value types.
//!
//! # Responsibilities
//! - Identify the blockchain network an endpoint serves
//! - Represent a single immutable endpoint (socket or REST)

use serde::{Deserialize, Serialize};

/// Blockchain network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Blockchain {
    Bitcoin,
    BitcoinTestNet,
    Litecoin,
    Ethereum,
    /// ERC-20 token transfers; shares Ethereum nodes but carries a higher gas limit.
    Token,
}

impl Blockchain {
    /// Whether this network is a test network.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Blockchain::BitcoinTestNet)
    }
}

impl std::fmt::Display for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Blockchain::Bitcoin => "Bitcoin",
            Blockchain::BitcoinTestNet => "BitcoinTestNet",
            Blockchain::Litecoin => "Litecoin",
            Blockchain::Ethereum => "Ethereum",
            Blockchain::Token => "Token",
        };
        write!(f, "{}", name)
    }
}

/// Transport an endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Line-delimited JSON-RPC over a raw TCP socket.
    Electrum,
    /// JSON over HTTP.
    Rest,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Electrum => write!(f, "electrum"),
            Transport::Rest => write!(f, "rest"),
        }
    }
}

/// A single candidate endpoint. Immutable; constructed from configuration at
/// startup and selected by the pool, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEndpoint {
    Electrum {
        host: String,
        port: u16,
        network: Blockchain,
    },
    Rest {
        base_url: String,
        network: Blockchain,
    },
}

impl NodeEndpoint {
    /// The network this endpoint serves.
    pub fn network(&self) -> Blockchain {
        match self {
            NodeEndpoint::Electrum { network, .. } => *network,
            NodeEndpoint::Rest { network, .. } => *network,
        }
    }

    /// The transport this endpoint speaks.
    pub fn transport(&self) -> Transport {
        match self {
            NodeEndpoint::Electrum { .. } => Transport::Electrum,
            NodeEndpoint::Rest { .. } => Transport::Rest,
        }
    }

    /// Human-readable description for display and audit.
    pub fn description(&self) -> String {
        match self {
            NodeEndpoint::Electrum { host, port, .. } => {
                format!("Electrum, {}:{}", host, port)
            }
            NodeEndpoint::Rest { base_url, .. } => format!("REST, {}", base_url),
        }
    }
}
