//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults reproduce the built-in static node pool so the library works
//! with no config file at all.

use serde::{Deserialize, Serialize};

use crate::nodes::Blockchain;

/// Root configuration: the static endpoint pool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Electrum (socket) node candidates.
    pub electrum_nodes: Vec<ElectrumNodeConfig>,

    /// REST gateway candidates.
    pub rest_gateways: Vec<RestGatewayConfig>,
}

/// A single Electrum node candidate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElectrumNodeConfig {
    /// Host name or IP address.
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Network this node serves.
    pub network: Blockchain,
}

/// A single REST gateway candidate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestGatewayConfig {
    /// Base URL, e.g. "https://chain.so".
    pub base_url: String,

    /// Network this gateway serves.
    pub network: Blockchain,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            electrum_nodes: vec![
                ElectrumNodeConfig {
                    host: "electrumx.hodlister.co".to_string(),
                    port: 50001,
                    network: Blockchain::Bitcoin,
                },
                ElectrumNodeConfig {
                    host: "electrum.bitaroo.net".to_string(),
                    port: 50001,
                    network: Blockchain::Bitcoin,
                },
                ElectrumNodeConfig {
                    host: "e.keff.org".to_string(),
                    port: 50001,
                    network: Blockchain::Bitcoin,
                },
                ElectrumNodeConfig {
                    host: "testnet.qtornado.com".to_string(),
                    port: 51001,
                    network: Blockchain::BitcoinTestNet,
                },
                ElectrumNodeConfig {
                    host: "testnet.hsmiths.com".to_string(),
                    port: 53011,
                    network: Blockchain::BitcoinTestNet,
                },
            ],
            rest_gateways: vec![
                RestGatewayConfig {
                    base_url: "https://chain.so".to_string(),
                    network: Blockchain::Bitcoin,
                },
                RestGatewayConfig {
                    base_url: "https://chain.so".to_string(),
                    network: Blockchain::BitcoinTestNet,
                },
                RestGatewayConfig {
                    base_url: "https://chain.so".to_string(),
                    network: Blockchain::Litecoin,
                },
                RestGatewayConfig {
                    base_url: "https://mainnet.infura.io/v3".to_string(),
                    network: Blockchain::Ethereum,
                },
            ],
        }
    }
}
