//! Typed JSON envelopes for the REST gateways.
//!
//! Address-indexing responses follow the SoChain v2 shape: a `status`
//! string plus a `data` payload. The Ethereum gateway speaks standard
//! JSON-RPC over HTTP.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outer envelope common to all address-indexing responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: T,
}

/// Confirmed/unconfirmed balance of one address.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddressBalance {
    pub network: String,
    pub address: String,
    pub confirmed_balance: String,
    pub unconfirmed_balance: String,
}

/// Unspent outputs of one address.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TxUnspent {
    pub network: String,
    pub address: String,
    pub txs: Vec<UnspentOutput>,
}

/// One unspent output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnspentOutput {
    pub txid: String,
    pub output_no: u32,
    pub script_hex: String,
    /// Amount as a decimal string in display units.
    pub value: String,
    pub confirmations: u64,
    pub time: u64,
}

/// Acknowledgement of a broadcast transaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendTx {
    pub network: String,
    pub txid: String,
}

/// Request body for broadcasting a raw transaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendTxRequest {
    pub tx_hex: String,
}

/// Status of one transaction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetTx {
    pub network: String,
    pub txid: String,
    pub blockhash: Option<String>,
    pub confirmations: u64,
    pub time: u64,
}

/// JSON-RPC request body for the Ethereum gateway.
#[derive(Debug, Clone, Serialize)]
pub struct EthRpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: Vec<Value>,
    pub id: u64,
}

impl EthRpcRequest {
    pub fn gas_price() -> Self {
        Self {
            jsonrpc: "2.0",
            method: "eth_gasPrice",
            params: Vec::new(),
            id: 1,
        }
    }
}

/// JSON-RPC response from the Ethereum gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct EthRpcResponse {
    /// Hex-encoded quantity with a `0x` prefix, absent on error.
    pub result: Option<String>,
}
