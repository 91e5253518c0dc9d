//! JSON-over-HTTP gateway queries (address indexing and Ethereum RPC).

pub mod client;
pub mod model;

pub use client::{
    network_code, AddressEvent, GasPriceEvent, RestClient, SendTxEvent, TxInfoEvent,
};
