//! Client operations
//!
//! The five key-value operations, each wrapping one fresh
//! acquire/call/release cycle.

use bytes::Bytes;

use crate::config::Config;
use crate::error::{RespError, Result};
use crate::network::{Connection, Connector, TcpConnector};
use crate::protocol::{Arg, Reply};

/// A key-value store client
///
/// Every operation opens a brand-new connection (TCP connect plus AUTH
/// round-trip), issues exactly one command, and releases the
/// connection. No connection is ever shared across two calls, so
/// concurrent threads need no coordination.
///
/// No socket timeout is configured anywhere: an operation may block
/// indefinitely on an unresponsive peer. This is an accepted
/// limitation of the blocking model, not something the client papers
/// over.
pub struct Client {
    connector: Box<dyn Connector>,
}

impl Client {
    /// Create a client that connects over TCP with the given config
    pub fn new(config: Config) -> Self {
        Self {
            connector: Box::new(TcpConnector::new(config)),
        }
    }

    /// Create a client with an injected connector (used by tests to
    /// substitute an in-memory store for the network)
    pub fn with_connector(connector: Box<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Store `value` under `key`; the reply is discarded
    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.with_connection(|conn| {
            conn.call(&[Arg::from("SET"), Arg::from(key), Arg::from(value)])?;
            Ok(())
        })
    }

    /// Fetch the value under `key`, or `None` if the key is absent
    pub fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.with_connection(|conn| {
            match conn.call(&[Arg::from("GET"), Arg::from(key)])? {
                Reply::Bytes(value) | Reply::Text(value) => Ok(Some(value)),
                Reply::Nil => Ok(None),
                other => Err(RespError::MalformedFrame(format!(
                    "unexpected reply to GET: {:?}",
                    other
                ))),
            }
        })
    }

    /// Set a time-to-live of `seconds` on `key`; the reply is discarded
    pub fn expire(&self, key: &str, seconds: i64) -> Result<()> {
        self.with_connection(|conn| {
            conn.call(&[Arg::from("EXPIRE"), Arg::from(key), Arg::from(seconds)])?;
            Ok(())
        })
    }

    /// Delete `key`; the reply is discarded
    pub fn del(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.call(&[Arg::from("DEL"), Arg::from(key)])?;
            Ok(())
        })
    }

    /// Liveness check: true iff the server answers PING with the exact
    /// text "PONG"
    pub fn ready(&self) -> Result<bool> {
        self.with_connection(|conn| {
            let reply = conn.call(&[Arg::from("PING")])?;
            Ok(reply.as_text() == Some(b"PONG".as_slice()))
        })
    }

    // Scoped acquire/use/release: the connection is released on every
    // exit path, and the operation's own result wins over anything the
    // release reports.
    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut dyn Connection) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.connector.connect()?;
        let result = op(conn.as_mut());
        if let Err(e) = conn.close() {
            tracing::debug!("Connection release failed: {}", e);
        }
        result
    }
}
