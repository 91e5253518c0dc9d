//! Node pool management.
//!
//! # Responsibilities
//! - Hold the static per-network endpoint lists
//! - Select a candidate uniformly at random per pick
//!
//! # Design Decisions
//! - Every pick is independent: no penalty or blacklist for failed nodes.
//!   A bad node may be re-selected immediately, including on retry of the
//!   same logical query. Favors rapid re-roll over adaptive routing.

use rand::Rng;

use crate::config::PoolConfig;
use crate::error::{ChainError, ChainResult};
use crate::nodes::endpoint::{Blockchain, NodeEndpoint, Transport};

/// Static pool of candidate endpoints, read-only after construction.
#[derive(Debug, Clone)]
pub struct NodePool {
    endpoints: Vec<NodeEndpoint>,
}

impl NodePool {
    /// Build the pool from configuration.
    pub fn from_config(config: &PoolConfig) -> Self {
        let mut endpoints = Vec::new();

        for node in &config.electrum_nodes {
            endpoints.push(NodeEndpoint::Electrum {
                host: node.host.clone(),
                port: node.port,
                network: node.network,
            });
        }
        for gateway in &config.rest_gateways {
            endpoints.push(NodeEndpoint::Rest {
                base_url: gateway.base_url.clone(),
                network: gateway.network,
            });
        }

        tracing::debug!(endpoint_count = endpoints.len(), "Node pool built");
        Self { endpoints }
    }

    /// Select one endpoint uniformly at random among those matching the
    /// network/transport pair.
    pub fn pick(&self, network: Blockchain, transport: Transport) -> ChainResult<&NodeEndpoint> {
        let candidates: Vec<&NodeEndpoint> = self.matching(network, transport).collect();
        if candidates.is_empty() {
            return Err(ChainError::NoAvailableNode { network, transport });
        }
        let index = rand::thread_rng().gen_range(0..candidates.len());
        Ok(candidates[index])
    }

    /// Iterate all endpoints matching the network/transport pair (for diagnostics).
    pub fn matching(
        &self,
        network: Blockchain,
        transport: Transport,
    ) -> impl Iterator<Item = &NodeEndpoint> {
        self.endpoints
            .iter()
            .filter(move |ep| ep.network() == network && ep.transport() == transport)
    }
}
