//! Network Module
//!
//! Connection abstraction and the TCP implementation.
//!
//! ## Architecture
//! - One short-lived connection per client operation
//! - AUTH handshake on open, QUIT farewell on close
//! - Trait-based so tests can inject an in-memory double

mod connection;

pub use connection::{Connection, Connector, TcpConnection, TcpConnector};
