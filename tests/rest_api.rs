//! REST client behavior: status handling and session accounting.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chainscout::config::{PoolConfig, RestGatewayConfig};
use chainscout::rest::{AddressEvent, GasPriceEvent, SendTxEvent};
use chainscout::{Blockchain, ChainError, NodePool, RestClient, Session};
use common::start_mock_rest;

const BALANCE_BODY: &str = r#"{
    "status": "success",
    "data": {
        "network": "BTC",
        "address": "1BoatSLRHtKNngkdXEeobR76b53LETtpyT",
        "confirmed_balance": "0.00050000",
        "unconfirmed_balance": "0.00000000"
    }
}"#;

fn client_for(base_url: String, network: Blockchain) -> RestClient {
    let config = PoolConfig {
        electrum_nodes: Vec::new(),
        rest_gateways: vec![RestGatewayConfig { base_url, network }],
    };
    RestClient::new(Arc::new(NodePool::from_config(&config)))
}

#[tokio::test]
async fn successful_balance_query_settles_session() {
    let (base_url, _requests) = start_mock_rest(200, BALANCE_BODY).await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_address_listener(tx);

    client
        .request_address_balance(&session, Blockchain::Bitcoin, "1BoatSLRHtKNngkdXEeobR76b53LETtpyT")
        .unwrap();

    match rx.recv().await.unwrap() {
        AddressEvent::Balance(balance) => {
            assert_eq!(balance.confirmed_balance, "0.00050000");
            assert_eq!(balance.network, "BTC");
        }
        other => panic!("expected balance, got {:?}", other),
    }
    assert!(session.is_settled());
}

#[tokio::test]
async fn http_404_fails_once_without_retry() {
    let (base_url, requests) = start_mock_rest(404, "{}").await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_address_listener(tx);

    client
        .request_address_balance(&session, Blockchain::Bitcoin, "someaddress")
        .unwrap();

    match rx.recv().await.unwrap() {
        AddressEvent::Failed(message) => assert_eq!(message, "404"),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(session.is_settled(), "counter decremented exactly once");

    // No retry: give any stray attempt time to show up, then check.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(requests.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(rx.try_recv().is_err(), "exactly one event delivered");
}

#[tokio::test]
async fn broadcast_acknowledgement_carries_txid() {
    let body: &str = r#"{
        "status": "success",
        "data": {
            "network": "BTC",
            "txid": "3e3e2b0ba1b2a52b6b2c9c2f2bc18d5a8f3e1c3b9a0d1e2f3a4b5c6d7e8f9a0b"
        }
    }"#;
    let (base_url, requests) = start_mock_rest(200, body).await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_send_tx_listener(tx);

    client
        .request_send_transaction(&session, Blockchain::Bitcoin, "0100000001abcdef")
        .unwrap();

    match rx.recv().await.unwrap() {
        SendTxEvent::Sent(ack) => {
            assert_eq!(
                ack.txid,
                "3e3e2b0ba1b2a52b6b2c9c2f2bc18d5a8f3e1c3b9a0d1e2f3a4b5c6d7e8f9a0b"
            );
            assert_eq!(ack.network, "BTC");
        }
        other => panic!("expected acknowledgement, got {:?}", other),
    }
    assert!(session.is_settled());
    assert_eq!(requests.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn broadcast_rejection_reports_status_once() {
    let (base_url, requests) = start_mock_rest(500, "{}").await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_send_tx_listener(tx);

    client
        .request_send_transaction(&session, Blockchain::Bitcoin, "0100000001abcdef")
        .unwrap();

    match rx.recv().await.unwrap() {
        SendTxEvent::Failed(message) => assert_eq!(message, "500"),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(session.is_settled(), "counter decremented exactly once");

    // No retry: give any stray attempt time to show up, then check.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(requests.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(rx.try_recv().is_err(), "exactly one event delivered");
}

#[tokio::test]
async fn unsupported_network_fails_synchronously() {
    let (base_url, requests) = start_mock_rest(200, BALANCE_BODY).await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();

    let err = client
        .request_address_balance(&session, Blockchain::Token, "0xabc")
        .unwrap_err();

    assert!(matches!(err, ChainError::UnsupportedNetwork(Blockchain::Token)));
    assert_eq!(session.in_flight(), 0, "no counter mutation before dispatch");
    assert_eq!(requests.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_reports_fault_description() {
    // Bind then drop to get a dead port.
    let dead_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client_for(format!("http://127.0.0.1:{}", dead_port), Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_address_listener(tx);

    client
        .request_address_balance(&session, Blockchain::Bitcoin, "someaddress")
        .unwrap();

    match rx.recv().await.unwrap() {
        AddressEvent::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(session.is_settled());
}

#[tokio::test]
async fn session_counts_match_submits_minus_terminals() {
    let (base_url, _requests) = start_mock_rest(200, BALANCE_BODY).await;
    let client = client_for(base_url, Blockchain::Bitcoin);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_address_listener(tx);

    let submits = 5;
    for _ in 0..submits {
        client
            .request_address_balance(&session, Blockchain::Bitcoin, "someaddress")
            .unwrap();
    }

    let mut terminals = 0;
    while terminals < submits {
        rx.recv().await.unwrap();
        terminals += 1;
    }
    assert!(session.is_settled());
}

#[tokio::test]
async fn gas_price_comes_back_as_raw_hex() {
    let (base_url, _requests) =
        start_mock_rest(200, r#"{"jsonrpc":"2.0","id":1,"result":"0x3b9aca00"}"#).await;
    let client = client_for(base_url, Blockchain::Ethereum);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_gas_price_listener(tx);

    client
        .request_gas_price(&session, Blockchain::Ethereum)
        .unwrap();

    match rx.recv().await.unwrap() {
        GasPriceEvent::Price(hex) => assert_eq!(hex, "0x3b9aca00"),
        other => panic!("expected price, got {:?}", other),
    }
    assert!(session.is_settled());
}

#[tokio::test]
async fn token_gas_price_rides_ethereum_nodes() {
    let (base_url, _requests) =
        start_mock_rest(200, r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).await;
    let client = client_for(base_url, Blockchain::Ethereum);
    let session = Session::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    client.bind_gas_price_listener(tx);

    client
        .request_gas_price(&session, Blockchain::Token)
        .unwrap();

    match rx.recv().await.unwrap() {
        GasPriceEvent::Price(hex) => assert_eq!(hex, "0x1"),
        other => panic!("expected price, got {:?}", other),
    }
}
