//! Asynchronous REST gateway client.
//!
//! # Responsibilities
//! - One method per query category (balance, unspent, send-tx, tx-info,
//!   gas-price)
//! - Map networks to gateway codes before any call is issued
//! - Account every call on the caller's session, success or failure
//!
//! # Design Decisions
//! - Success is strictly HTTP 200 with a decodable body; any other status
//!   is reported as a failure carrying the status code as the message
//! - One listener per category; rebinding replaces, no fan-out
//! - Categories are independent; the session counter is the only shared
//!   state between completions

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc::UnboundedSender;

use crate::error::{ChainError, ChainResult};
use crate::nodes::{Blockchain, NodePool, Transport};
use crate::rest::model::{
    AddressBalance, Envelope, EthRpcRequest, EthRpcResponse, GetTx, SendTx, SendTxRequest,
    TxUnspent,
};
use crate::session::Session;

/// Outcome of an address-info query (balance or unspent outputs).
#[derive(Debug)]
pub enum AddressEvent {
    Balance(AddressBalance),
    Unspent(TxUnspent),
    Failed(String),
}

/// Outcome of a transaction broadcast.
#[derive(Debug)]
pub enum SendTxEvent {
    Sent(SendTx),
    Failed(String),
}

/// Outcome of a transaction status query.
#[derive(Debug)]
pub enum TxInfoEvent {
    Info(GetTx),
    Failed(String),
}

/// Outcome of a gas price query. The price is the raw hex quantity
/// (`0x`-prefixed) as returned by the gateway; see [`crate::fees`] for
/// interpretation.
#[derive(Debug)]
pub enum GasPriceEvent {
    Price(String),
    Failed(String),
}

type Listener<T> = Arc<RwLock<Option<UnboundedSender<T>>>>;

/// Map a network to its address-indexing gateway code. The mapping is
/// closed; unmapped networks fail before any call is issued.
pub fn network_code(network: Blockchain) -> ChainResult<&'static str> {
    match network {
        Blockchain::Bitcoin => Ok("BTC"),
        Blockchain::BitcoinTestNet => Ok("BTCTEST"),
        Blockchain::Litecoin => Ok("LTC"),
        other => Err(ChainError::UnsupportedNetwork(other)),
    }
}

/// Client for the JSON-over-HTTP gateways.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    pool: Arc<NodePool>,
    address_listener: Listener<AddressEvent>,
    send_tx_listener: Listener<SendTxEvent>,
    tx_info_listener: Listener<TxInfoEvent>,
    gas_price_listener: Listener<GasPriceEvent>,
}

impl RestClient {
    pub fn new(pool: Arc<NodePool>) -> Self {
        Self {
            http: reqwest::Client::new(),
            pool,
            address_listener: Arc::new(RwLock::new(None)),
            send_tx_listener: Arc::new(RwLock::new(None)),
            tx_info_listener: Arc::new(RwLock::new(None)),
            gas_price_listener: Arc::new(RwLock::new(None)),
        }
    }

    /// Bind the address-info listener (balance and unspent outputs).
    pub fn bind_address_listener(&self, sender: UnboundedSender<AddressEvent>) {
        *self.address_listener.write().expect("listener lock poisoned") = Some(sender);
    }

    /// Bind the send-transaction listener.
    pub fn bind_send_tx_listener(&self, sender: UnboundedSender<SendTxEvent>) {
        *self.send_tx_listener.write().expect("listener lock poisoned") = Some(sender);
    }

    /// Bind the transaction-info listener.
    pub fn bind_tx_info_listener(&self, sender: UnboundedSender<TxInfoEvent>) {
        *self.tx_info_listener.write().expect("listener lock poisoned") = Some(sender);
    }

    /// Bind the gas-price listener.
    pub fn bind_gas_price_listener(&self, sender: UnboundedSender<GasPriceEvent>) {
        *self.gas_price_listener.write().expect("listener lock poisoned") = Some(sender);
    }

    /// Query the confirmed/unconfirmed balance of an address.
    pub fn request_address_balance(
        &self,
        session: &Session,
        network: Blockchain,
        wallet: &str,
    ) -> ChainResult<()> {
        let code = network_code(network)?;
        let base = self.base_url(network)?;
        let url = format!("{}/api/v2/get_address_balance/{}/{}", base, code, wallet);

        let guard = session.track();
        let http = self.http.clone();
        let listener = Arc::clone(&self.address_listener);
        tokio::spawn(async move {
            let event = match fetch_envelope::<AddressBalance>(&http, &url).await {
                Ok(data) => AddressEvent::Balance(data),
                Err(message) => AddressEvent::Failed(message),
            };
            // terminal outcome: settle the session before notifying
            drop(guard);
            deliver(&listener, event, "address-info");
        });
        Ok(())
    }

    /// Query the unspent outputs of an address.
    pub fn request_unspent_tx(
        &self,
        session: &Session,
        network: Blockchain,
        wallet: &str,
    ) -> ChainResult<()> {
        let code = network_code(network)?;
        let base = self.base_url(network)?;
        let url = format!("{}/api/v2/get_tx_unspent/{}/{}", base, code, wallet);

        let guard = session.track();
        let http = self.http.clone();
        let listener = Arc::clone(&self.address_listener);
        tokio::spawn(async move {
            let event = match fetch_envelope::<TxUnspent>(&http, &url).await {
                Ok(data) => AddressEvent::Unspent(data),
                Err(message) => AddressEvent::Failed(message),
            };
            drop(guard);
            deliver(&listener, event, "address-info");
        });
        Ok(())
    }

    /// Broadcast a signed raw transaction.
    pub fn request_send_transaction(
        &self,
        session: &Session,
        network: Blockchain,
        tx_hex: &str,
    ) -> ChainResult<()> {
        let code = network_code(network)?;
        let base = self.base_url(network)?;
        let url = format!("{}/api/v2/send_tx/{}", base, code);
        let body = SendTxRequest {
            tx_hex: tx_hex.to_string(),
        };

        let guard = session.track();
        let http = self.http.clone();
        let listener = Arc::clone(&self.send_tx_listener);
        tokio::spawn(async move {
            let event = match http.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if status == 200 {
                        match response.json::<Envelope<SendTx>>().await {
                            Ok(envelope) => SendTxEvent::Sent(envelope.data),
                            Err(e) => SendTxEvent::Failed(e.to_string()),
                        }
                    } else {
                        SendTxEvent::Failed(status.to_string())
                    }
                }
                Err(e) => SendTxEvent::Failed(e.to_string()),
            };
            drop(guard);
            deliver(&listener, event, "send-tx");
        });
        Ok(())
    }

    /// Query the status of a transaction by id.
    pub fn request_transaction_info(
        &self,
        session: &Session,
        network: Blockchain,
        tx_id: &str,
    ) -> ChainResult<()> {
        let code = network_code(network)?;
        let base = self.base_url(network)?;
        let url = format!("{}/api/v2/get_tx/{}/{}", base, code, tx_id);

        let guard = session.track();
        let http = self.http.clone();
        let listener = Arc::clone(&self.tx_info_listener);
        tokio::spawn(async move {
            let event = match fetch_envelope::<GetTx>(&http, &url).await {
                Ok(data) => TxInfoEvent::Info(data),
                Err(message) => TxInfoEvent::Failed(message),
            };
            drop(guard);
            deliver(&listener, event, "tx-info");
        });
        Ok(())
    }

    /// Query the current gas price from the Ethereum gateway. `Token`
    /// queries ride the Ethereum nodes.
    pub fn request_gas_price(&self, session: &Session, network: Blockchain) -> ChainResult<()> {
        let gateway_network = match network {
            Blockchain::Ethereum | Blockchain::Token => Blockchain::Ethereum,
            other => return Err(ChainError::UnsupportedNetwork(other)),
        };
        let base = self.base_url(gateway_network)?;

        let guard = session.track();
        let http = self.http.clone();
        let listener = Arc::clone(&self.gas_price_listener);
        tokio::spawn(async move {
            let event = match http
                .post(&base)
                .json(&EthRpcRequest::gas_price())
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if status == 200 {
                        match response.json::<EthRpcResponse>().await {
                            Ok(EthRpcResponse {
                                result: Some(price),
                            }) => GasPriceEvent::Price(price),
                            Ok(EthRpcResponse { result: None }) => {
                                GasPriceEvent::Failed(ChainError::NoAnswer.to_string())
                            }
                            Err(e) => GasPriceEvent::Failed(e.to_string()),
                        }
                    } else {
                        GasPriceEvent::Failed(status.to_string())
                    }
                }
                Err(e) => GasPriceEvent::Failed(e.to_string()),
            };
            drop(guard);
            deliver(&listener, event, "gas-price");
        });
        Ok(())
    }

    /// Pick a gateway base URL for the network.
    fn base_url(&self, network: Blockchain) -> ChainResult<String> {
        match self.pool.pick(network, Transport::Rest)? {
            crate::nodes::NodeEndpoint::Rest { base_url, .. } => Ok(base_url.clone()),
            other => Err(ChainError::Transport(format!(
                "pool returned non-rest endpoint {}",
                other.description()
            ))),
        }
    }
}

/// GET a SoChain-style envelope; success is strictly status 200 with a
/// decodable body. Errors come back as the failure message for the event.
async fn fetch_envelope<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, String> {
    match http.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if status == 200 {
                match response.json::<Envelope<T>>().await {
                    Ok(envelope) => Ok(envelope.data),
                    Err(e) => Err(e.to_string()),
                }
            } else {
                tracing::warn!(url, status, "REST call returned non-200");
                Err(status.to_string())
            }
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "REST call failed");
            Err(e.to_string())
        }
    }
}

fn deliver<T: std::fmt::Debug>(listener: &Listener<T>, event: T, category: &str) {
    let listener = listener.read().expect("listener lock poisoned");
    match listener.as_ref() {
        Some(sender) => {
            if sender.send(event).is_err() {
                tracing::warn!(category, "Listener dropped, discarding event");
            }
        }
        None => tracing::warn!(category, "No listener bound, discarding event"),
    }
}
