//! Retry-capable asynchronous dispatch of Electrum queries.
//!
//! # Responsibilities
//! - Pick a node, run the blocking exchange off the async runtime
//! - Classify the outcome and retry a bounded number of times
//! - Deliver the terminal outcome to the bound listener, never on the
//!   I/O thread
//!
//! # Design Decisions
//! - Only the "no answer" classification retries; a transport fault before
//!   a connection exists is terminal for the query
//! - Every attempt re-rolls node selection from scratch, no backoff
//! - Attempts of one query are strictly sequential

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc::UnboundedSender;

use crate::electrum::client;
use crate::electrum::request::ElectrumRequest;
use crate::error::{ChainError, ChainResult};
use crate::nodes::{Blockchain, NodePool, Transport};

/// Total dispatch attempts per logical query (first attempt + 2 retries).
pub const MAX_ATTEMPTS: u32 = 3;

/// Terminal outcome of one logical Electrum query.
#[derive(Debug)]
pub enum ElectrumEvent {
    /// The exchange produced an answer; the request carries it along with
    /// the endpoint that served it.
    Success(ElectrumRequest),
    /// The query failed after classification (retries spent or hard fault).
    Fail { method: String, reason: String },
}

type Listener = Arc<RwLock<Option<UnboundedSender<ElectrumEvent>>>>;

/// Dispatches Electrum queries against the node pool with bounded retry.
#[derive(Debug, Clone)]
pub struct ElectrumDispatcher {
    pool: Arc<NodePool>,
    listener: Listener,
    last_endpoint: Arc<RwLock<Option<(String, u16)>>>,
}

impl ElectrumDispatcher {
    pub fn new(pool: Arc<NodePool>) -> Self {
        Self {
            pool,
            listener: Arc::new(RwLock::new(None)),
            last_endpoint: Arc::new(RwLock::new(None)),
        }
    }

    /// Bind the listener for terminal outcomes. Rebinding replaces the
    /// previous listener; there is no fan-out.
    pub fn bind_listener(&self, sender: UnboundedSender<ElectrumEvent>) {
        *self.listener.write().expect("listener lock poisoned") = Some(sender);
    }

    /// Human-readable description of the most recently selected node,
    /// e.g. `"Electrum, electrum.example.net:50001"`.
    pub fn validation_node_description(&self) -> Option<String> {
        self.last_endpoint
            .read()
            .expect("endpoint lock poisoned")
            .as_ref()
            .map(|(host, port)| format!("Electrum, {}:{}", host, port))
    }

    /// Submit one logical query. Runs up to [`MAX_ATTEMPTS`] sequential
    /// dispatch attempts, each against a freshly picked node, and delivers
    /// the terminal outcome through the bound listener.
    ///
    /// Fails synchronously only when the pool has no candidate for the
    /// network at all.
    pub async fn submit(&self, network: Blockchain, request: ElectrumRequest) -> ChainResult<()> {
        // Surface an empty pool immediately; no attempt is worth making.
        self.pool.pick(network, Transport::Electrum)?;

        let method = request.method.clone();
        let mut request = request;

        for attempt in 1..=MAX_ATTEMPTS {
            let (host, port) = match self.pool.pick(network, Transport::Electrum)? {
                crate::nodes::NodeEndpoint::Electrum { host, port, .. } => {
                    (host.clone(), *port)
                }
                other => {
                    // pick() filtered on transport; anything else is a bug
                    return Err(ChainError::Transport(format!(
                        "pool returned non-electrum endpoint {}",
                        other.description()
                    )));
                }
            };
            *self.last_endpoint.write().expect("endpoint lock poisoned") =
                Some((host.clone(), port));

            let outcome = tokio::task::spawn_blocking(move || {
                let result = client::execute(&host, port, &mut request);
                (request, result)
            })
            .await;

            let (returned, result) = match outcome {
                Ok(pair) => pair,
                Err(e) => {
                    self.deliver(ElectrumEvent::Fail {
                        method,
                        reason: format!("worker failed: {}", e),
                    });
                    return Ok(());
                }
            };
            request = returned;

            match result {
                Ok(()) if request.answer.is_some() => {
                    tracing::debug!(method = %request.method, attempt, "Electrum query succeeded");
                    self.deliver(ElectrumEvent::Success(request));
                    return Ok(());
                }
                Ok(()) => {
                    tracing::warn!(
                        method = %request.method,
                        attempt,
                        error = request.error.as_deref().unwrap_or("none"),
                        "Electrum attempt returned no answer"
                    );
                    // retryable: fall through to the next attempt
                }
                Err(e) => {
                    tracing::warn!(method = %request.method, attempt, error = %e, "Electrum attempt hit transport fault");
                    self.deliver(ElectrumEvent::Fail {
                        method,
                        reason: e.to_string(),
                    });
                    return Ok(());
                }
            }
        }

        // Retries spent without a usable answer. Absence of data is
        // authoritative at this point even if a stale error line exists.
        self.deliver(ElectrumEvent::Fail {
            method,
            reason: ChainError::NoAnswer.to_string(),
        });
        Ok(())
    }

    fn deliver(&self, event: ElectrumEvent) {
        let listener = self.listener.read().expect("listener lock poisoned");
        match listener.as_ref() {
            Some(sender) => {
                if sender.send(event).is_err() {
                    tracing::warn!("Electrum listener dropped, discarding event");
                }
            }
            None => tracing::warn!("No Electrum listener bound, discarding event"),
        }
    }
}
