//! Blocking socket exchange with an Electrum node.
//!
//! # Responsibilities
//! - One TCP connection per request, closed on every exit path
//! - Write one JSON line, read one line of response within the timeout
//! - Populate the request's answer/error slots
//!
//! # Design Decisions
//! - Blocking by contract; callers run this on the blocking pool
//! - A fault before a connection exists is a hard failure (there is no
//!   meaningful retry target info); faults after connect are recorded on
//!   the request and classified by the orchestrator

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::electrum::request::ElectrumRequest;
use crate::error::{ChainError, ChainResult};

/// Read timeout for the single response line.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Error text recorded when the remote closed without sending a line.
pub const NO_ANSWER: &str = "No answer from server";

/// Perform one blocking write/read exchange against `host:port`, mutating
/// `request` in place.
///
/// Returns `Err` only when no connection could be established. Once
/// connected, the attempt always "completes": the outcome lands in the
/// request's `answer` or `error` slot and `Ok(())` is returned. The socket
/// is dropped (closed) on every path.
pub fn execute(host: &str, port: u16, request: &mut ElectrumRequest) -> ChainResult<()> {
    let mut stream = connect(host, port)?;

    // One outstanding request per connection; the id is pinned to 1.
    request.id = 1;
    let line = request.as_wire_line()?;

    tracing::debug!(host, port, method = %request.method, "Electrum exchange starting");

    if let Err(e) = write_line(&mut stream, &line) {
        request.error = Some(e.to_string());
        request.answer = None;
        return Ok(());
    }

    let mut reader = BufReader::new(stream);
    let mut response = String::new();
    match reader.read_line(&mut response) {
        Ok(_) => {
            let trimmed = response.trim_end_matches(|c| c == '\r' || c == '\n');
            if trimmed.is_empty() {
                request.error = Some(NO_ANSWER.to_string());
                request.answer = None;
            } else {
                request.answer = Some(trimmed.to_string());
                request.error = None;
            }
            request.resolved_host = Some(host.to_string());
            request.resolved_port = Some(port);
        }
        Err(e) => {
            tracing::warn!(host, port, method = %request.method, error = %e, "Electrum read failed");
            request.error = Some(e.to_string());
            request.answer = None;
        }
    }

    Ok(())
}

/// Resolve the host and connect, trying each resolved address until one
/// succeeds. The local port is ephemeral (OS-assigned).
fn connect(host: &str, port: u16) -> ChainResult<TcpStream> {
    let addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| ChainError::Transport(format!("resolving {}:{}: {}", host, port, e)))?;

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, READ_TIMEOUT) {
            Ok(stream) => {
                stream
                    .set_read_timeout(Some(READ_TIMEOUT))
                    .map_err(|e| ChainError::Transport(format!("setting read timeout: {}", e)))?;
                return Ok(stream);
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(ChainError::Transport(format!(
        "connecting to {}:{}: {}",
        host,
        port,
        last_err.map_or_else(|| "no addresses resolved".to_string(), |e| e.to_string())
    )))
}

fn write_line(stream: &mut TcpStream, line: &str) -> std::io::Result<()> {
    stream.write_all(line.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()
}
