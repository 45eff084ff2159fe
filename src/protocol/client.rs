//! Server-list-ping client over TCP.
//!
//! # Responsibilities
//! - Resolve the endpoint host (A/AAAA/CNAME via the system resolver)
//! - Try each resolved address until one accepts
//! - Run handshake + status request, parse the JSON payload
//! - Bound the whole exchange with a single timeout

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use crate::protocol::codec;
use crate::protocol::types::{Endpoint, QueryClient, QueryError, StatusResponse};

/// Server-list-ping query client.
#[derive(Debug, Clone)]
pub struct SlpClient {
    timeout: Duration,
}

impl SlpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn exchange(endpoint: &Endpoint) -> Result<StatusResponse, QueryError> {
        let addrs: Vec<SocketAddr> = lookup_host((endpoint.host.as_str(), endpoint.port))
            .await
            .map_err(|source| QueryError::Resolve {
                host: endpoint.host.clone(),
                source,
            })?
            .collect();

        let mut stream = connect_any(&addrs, &endpoint.host).await?;
        stream.set_nodelay(true)?;

        stream
            .write_all(&codec::handshake(&endpoint.host, endpoint.port))
            .await?;

        let started = Instant::now();
        stream.write_all(&codec::status_request()).await?;
        stream.flush().await?;

        let (packet_id, payload) = codec::read_packet(&mut stream).await?;
        let latency = started.elapsed();

        if packet_id != codec::STATUS_RESPONSE_ID {
            return Err(QueryError::Malformed(format!(
                "expected status response, got packet 0x{:02x}",
                packet_id
            )));
        }

        let json = codec::decode_status_payload(&payload)?;
        let mut response = StatusResponse::from_json(&json)?;
        response.latency = latency;
        Ok(response)
    }
}

impl QueryClient for SlpClient {
    async fn query(&self, endpoint: &Endpoint) -> Result<StatusResponse, QueryError> {
        match timeout(self.timeout, Self::exchange(endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(QueryError::Timeout(self.timeout)),
        }
    }
}

async fn connect_any(addrs: &[SocketAddr], host: &str) -> Result<TcpStream, QueryError> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(addr = %addr, error = %e, "Connect attempt failed");
                last_err = Some(e);
            }
        }
    }
    match last_err {
        Some(e) => Err(QueryError::Io(e)),
        None => Err(QueryError::NoAddress(host.to_string())),
    }
}
