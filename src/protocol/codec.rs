//! Server-list-ping packet framing.
//!
//! Every packet is `VarInt(length) ++ VarInt(packet_id) ++ payload`. VarInts
//! are little-endian base-128 with a continuation bit, at most five bytes.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::protocol::types::QueryError;

const MAX_VARINT_BYTES: usize = 5;

/// Largest status packet accepted. Favicons make these a few tens of KiB.
pub const MAX_PACKET_LEN: usize = 2 * 1024 * 1024;

/// Protocol version sent in the handshake. Servers answer status requests
/// regardless of the value.
pub const HANDSHAKE_PROTOCOL_VERSION: i32 = 47;

/// Next-state value requesting the status flow.
const NEXT_STATE_STATUS: i32 = 1;

pub const HANDSHAKE_ID: i32 = 0x00;
pub const STATUS_REQUEST_ID: i32 = 0x00;
pub const STATUS_RESPONSE_ID: i32 = 0x00;

pub fn write_varint(buf: &mut Vec<u8>, value: i32) {
    let mut value = value as u32;
    loop {
        if value & !0x7F == 0 {
            buf.push(value as u8);
            return;
        }
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
}

pub fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_varint(buf, value.len() as i32);
    buf.extend_from_slice(value.as_bytes());
}

/// Decode a VarInt from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn read_varint_slice(bytes: &[u8]) -> Result<(i32, usize), QueryError> {
    let mut result: u32 = 0;
    for (i, byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        result |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((result as i32, i + 1));
        }
    }
    if bytes.len() < MAX_VARINT_BYTES {
        Err(QueryError::Malformed("truncated VarInt".to_string()))
    } else {
        Err(QueryError::Malformed("VarInt too long".to_string()))
    }
}

pub async fn read_varint<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i32, QueryError> {
    let mut result: u32 = 0;
    for i in 0..MAX_VARINT_BYTES {
        let byte = reader.read_u8().await?;
        result |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }
    Err(QueryError::Malformed("VarInt too long".to_string()))
}

/// Wrap a packet id and payload into a length-prefixed frame.
pub fn frame(packet_id: i32, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(payload.len() + MAX_VARINT_BYTES);
    write_varint(&mut body, packet_id);
    body.extend_from_slice(payload);

    let mut out = Vec::with_capacity(body.len() + MAX_VARINT_BYTES);
    write_varint(&mut out, body.len() as i32);
    out.extend_from_slice(&body);
    out
}

pub fn handshake(host: &str, port: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    write_varint(&mut payload, HANDSHAKE_PROTOCOL_VERSION);
    write_string(&mut payload, host);
    payload.extend_from_slice(&port.to_be_bytes());
    write_varint(&mut payload, NEXT_STATE_STATUS);
    frame(HANDSHAKE_ID, &payload)
}

pub fn status_request() -> Vec<u8> {
    frame(STATUS_REQUEST_ID, &[])
}

/// Read one frame, returning its packet id and payload.
pub async fn read_packet<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<(i32, Vec<u8>), QueryError> {
    let len = read_varint(reader).await?;
    if len <= 0 || len as usize > MAX_PACKET_LEN {
        return Err(QueryError::Malformed(format!("invalid packet length {}", len)));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;

    let (packet_id, consumed) = read_varint_slice(&body)?;
    body.drain(..consumed);
    Ok((packet_id, body))
}

/// Decode the JSON string carried by a status response payload.
pub fn decode_status_payload(payload: &[u8]) -> Result<String, QueryError> {
    let (len, consumed) = read_varint_slice(payload)?;
    let rest = &payload[consumed..];
    if len < 0 || len as usize > rest.len() {
        return Err(QueryError::Malformed(format!(
            "status string length {} exceeds payload of {} bytes",
            len,
            rest.len()
        )));
    }
    String::from_utf8(rest[..len as usize].to_vec())
        .map_err(|e| QueryError::Malformed(format!("status string is not UTF-8: {}", e)))
}
