//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// How a mock Electrum node answers each connection.
#[derive(Debug, Clone, Copy)]
pub enum ElectrumBehavior {
    /// Read the request line, then reply with this line.
    Reply(&'static str),
    /// Read the request line, then close without sending anything.
    CloseWithoutReply,
}

/// Counters observed by a mock Electrum node.
#[derive(Debug, Clone, Default)]
pub struct ElectrumStats {
    /// Connections accepted.
    pub accepted: Arc<AtomicUsize>,
    /// Connections on which the client's close (EOF) was observed.
    pub closed: Arc<AtomicUsize>,
}

impl ElectrumStats {
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Start a mock Electrum node on an ephemeral port. Returns the port and
/// its connection counters.
pub async fn start_mock_electrum(behavior: ElectrumBehavior) -> (u16, ElectrumStats) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let stats = ElectrumStats::default();
    let stats_clone = stats.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    stats_clone.accepted.fetch_add(1, Ordering::SeqCst);
                    let closed = Arc::clone(&stats_clone.closed);
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);
                        let mut line = String::new();
                        let _ = reader.read_line(&mut line).await;

                        match behavior {
                            ElectrumBehavior::Reply(body) => {
                                let _ = write_half.write_all(body.as_bytes()).await;
                                let _ = write_half.write_all(b"\n").await;
                            }
                            ElectrumBehavior::CloseWithoutReply => {
                                let _ = write_half.shutdown().await;
                            }
                        }

                        // Drain until EOF so we can observe the client
                        // releasing its socket.
                        let mut sink = [0u8; 64];
                        loop {
                            match reader.read(&mut sink).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) => {}
                            }
                        }
                        closed.fetch_add(1, Ordering::SeqCst);
                    });
                }
                Err(_) => break,
            }
        }
    });

    (port, stats)
}

/// Start a mock REST backend that answers every request with a fixed
/// status and body (raw HTTP over TCP). Returns the base URL and a counter
/// of requests served.
pub async fn start_mock_rest(status: u16, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));
    let requests_clone = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    requests_clone.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);

                        // Consume headers up to the blank line.
                        loop {
                            let mut line = String::new();
                            match reader.read_line(&mut line).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) if line == "\r\n" || line == "\n" => break,
                                Ok(_) => {}
                            }
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = write_half.write_all(response.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{}", addr), requests)
}
