//! Line-delimited JSON-RPC over TCP ("Electrum" protocol).

pub mod client;
pub mod orchestrator;
pub mod request;

pub use orchestrator::{ElectrumDispatcher, ElectrumEvent, MAX_ATTEMPTS};
pub use request::ElectrumRequest;
