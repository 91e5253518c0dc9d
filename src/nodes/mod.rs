//! Candidate node endpoints and random selection.

pub mod endpoint;
pub mod pool;

pub use endpoint::{Blockchain, NodeEndpoint, Transport};
pub use pool::NodePool;
