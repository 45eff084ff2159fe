//! Server-list-ping query subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint (host, port)
//!     → client.rs (resolve, connect, bounded by timeout)
//!     → codec.rs (VarInt-framed handshake + status request)
//!     → JSON status payload
//!     → types.rs (StatusResponse)
//!     → motd.rs (chat component → section codes → plain / ANSI)
//! ```
//!
//! # Design Decisions
//! - The query seam is the `QueryClient` trait so the classifier can be
//!   driven by scripted responses in tests
//! - Every failure is a `QueryError`; the classifier decides what it means
//! - One connection per query, no pooling

pub mod client;
pub mod codec;
pub mod motd;
pub mod types;

pub use client::SlpClient;
pub use motd::Motd;
pub use types::{Endpoint, Players, QueryClient, QueryError, StatusResponse, Version};
