//! JSON-RPC request/response model for Electrum nodes.
//!
//! # Responsibilities
//! - Carry method, params and correlation id for one logical query
//! - Hold the raw answer / error slots populated by the socket client
//! - Serialize to the line-delimited wire form
//! - Extract the typed result once an answer arrives

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ChainError, ChainResult};

/// Correlation ids only need uniqueness, not synchronization.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// One JSON-RPC request and its (eventual) raw answer.
///
/// Exactly one of `answer` / `error` is set after a dispatch attempt
/// completes; both absent means the attempt is still pending. A request is
/// owned by a single attempt at a time and must never be dispatched to two
/// nodes concurrently.
#[derive(Debug, Clone, Serialize)]
pub struct ElectrumRequest {
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,

    /// Raw response line, set on a successful exchange.
    #[serde(skip)]
    pub answer: Option<String>,

    /// Fault description, set when the exchange yielded no usable payload.
    #[serde(skip)]
    pub error: Option<String>,

    /// Host that actually served the request, for diagnostic display.
    #[serde(skip)]
    pub resolved_host: Option<String>,

    /// Port that actually served the request.
    #[serde(skip)]
    pub resolved_port: Option<u16>,
}

impl ElectrumRequest {
    /// Build a request for an arbitrary method.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            method: method.into(),
            params,
            answer: None,
            error: None,
            resolved_host: None,
            resolved_port: None,
        }
    }

    /// Query the confirmed/unconfirmed balance of an address.
    pub fn check_balance(address: &str) -> Self {
        Self::new("blockchain.address.get_balance", vec![address.into()])
    }

    /// List unspent outputs of an address.
    pub fn list_unspent(address: &str) -> Self {
        Self::new("blockchain.address.listunspent", vec![address.into()])
    }

    /// Fetch a raw transaction by hash.
    pub fn get_transaction(tx_hash: &str) -> Self {
        Self::new("blockchain.transaction.get", vec![tx_hash.into()])
    }

    /// Broadcast a signed raw transaction.
    pub fn broadcast(raw_tx_hex: &str) -> Self {
        Self::new("blockchain.transaction.broadcast", vec![raw_tx_hex.into()])
    }

    /// Ask the server for its version banner.
    pub fn server_version() -> Self {
        Self::new("server.version", Vec::new())
    }

    /// Serialize to the single-line wire form (without the trailing newline).
    pub fn as_wire_line(&self) -> ChainResult<String> {
        serde_json::to_string(self).map_err(|e| ChainError::Transport(e.to_string()))
    }

    /// Parse the raw answer and extract its `result` field.
    pub fn result_value(&self) -> ChainResult<Value> {
        let answer = self.answer.as_deref().ok_or(ChainError::NoAnswer)?;
        let parsed: Value = serde_json::from_str(answer)
            .map_err(|e| ChainError::NumericFormat(format!("malformed answer: {}", e)))?;
        match parsed.get("result") {
            Some(Value::Null) | None => Err(ChainError::NoAnswer),
            Some(result) => Ok(result.clone()),
        }
    }

    /// Extract the `result` field as a string.
    pub fn result_string(&self) -> ChainResult<String> {
        match self.result_value()? {
            Value::String(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ElectrumRequest::server_version();
        let b = ElectrumRequest::server_version();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_line_shape() {
        let mut request = ElectrumRequest::check_balance("1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
        request.id = 1;
        let line = request.as_wire_line().unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["method"], "blockchain.address.get_balance");
        assert_eq!(parsed["params"][0], "1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
        // answer/error slots never leak onto the wire
        assert!(parsed.get("answer").is_none());
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_result_extraction() {
        let mut request = ElectrumRequest::server_version();
        request.answer = Some(r#"{"id":1,"result":"0x3b9aca00"}"#.to_string());
        assert_eq!(request.result_string().unwrap(), "0x3b9aca00");
    }

    #[test]
    fn test_result_missing_answer() {
        let request = ElectrumRequest::server_version();
        assert!(matches!(
            request.result_value().unwrap_err(),
            ChainError::NoAnswer
        ));
    }

    #[test]
    fn test_result_null_is_no_answer() {
        let mut request = ElectrumRequest::server_version();
        request.answer = Some(r#"{"id":1,"result":null}"#.to_string());
        assert!(matches!(
            request.result_value().unwrap_err(),
            ChainError::NoAnswer
        ));
    }

    #[test]
    fn test_result_garbage_is_format_error() {
        let mut request = ElectrumRequest::server_version();
        request.answer = Some("not json at all".to_string());
        assert!(matches!(
            request.result_value().unwrap_err(),
            ChainError::NumericFormat(_)
        ));
    }
}
