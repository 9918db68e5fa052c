//! Connection Handler
//!
//! Owns one TCP stream paired with one encoder and one parser, and
//! drives the per-call handshake/round-trip/farewell lifecycle.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Arg, Encoder, Parser, Reply};

/// One authenticated conversation with the server
///
/// Production code uses [`TcpConnection`]; tests substitute an
/// in-memory implementation. Selection happens by dependency injection
/// through a [`Connector`], not by subclassing.
pub trait Connection {
    /// Perform exactly one encode+flush+parse round-trip
    fn call(&mut self, args: &[Arg]) -> Result<Reply>;

    /// Issue the farewell command and release the transport
    fn close(&mut self) -> Result<()>;
}

/// Factory producing fresh connections, one per client operation
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A connection over a real TCP stream
pub struct TcpConnection {
    /// Buffered encoder over the write half of the stream
    encoder: Encoder<BufWriter<TcpStream>>,

    /// Buffered parser over the read half of the stream
    parser: Parser<BufReader<TcpStream>>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpConnection {
    /// Open a stream to the configured address and authenticate
    ///
    /// A server error reply to AUTH fails the whole acquisition; at
    /// this layer an authentication failure is indistinguishable from
    /// any other server fault.
    pub fn open(config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(config.addr())?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let mut conn = Self {
            encoder: Encoder::new(BufWriter::new(write_stream)),
            parser: Parser::new(BufReader::new(read_stream)),
            peer_addr,
        };

        tracing::debug!("Connection established to {}", conn.peer_addr);

        conn.round_trip(&[
            Arg::from("AUTH"),
            Arg::from(config.username.as_str()),
            Arg::from(config.password.as_str()),
        ])?;
        tracing::debug!("Authenticated with {}", conn.peer_addr);

        Ok(conn)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn round_trip(&mut self, args: &[Arg]) -> Result<Reply> {
        self.encoder.write(args)?;
        self.encoder.flush()?;
        self.parser.parse()
    }
}

impl Connection for TcpConnection {
    fn call(&mut self, args: &[Arg]) -> Result<Reply> {
        tracing::trace!("Round-trip with {}: {:?}", self.peer_addr, args);
        self.round_trip(args)
    }

    /// Send QUIT and shut the socket down
    ///
    /// A farewell failure is logged and suppressed so it can never mask
    /// an error from the call that preceded it; the socket is released
    /// regardless (shutdown here, descriptor close on drop).
    fn close(&mut self) -> Result<()> {
        if let Err(e) = self.round_trip(&[Arg::from("QUIT")]) {
            tracing::debug!("Farewell to {} failed: {}", self.peer_addr, e);
        }
        if let Err(e) = self.encoder.get_ref().get_ref().shutdown(Shutdown::Both) {
            tracing::debug!("Shutdown of {} failed: {}", self.peer_addr, e);
        }
        tracing::debug!("Connection to {} closed", self.peer_addr);
        Ok(())
    }
}

/// Produces one fresh [`TcpConnection`] per operation
pub struct TcpConnector {
    config: Config,
}

impl TcpConnector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Connector for TcpConnector {
    fn connect(&self) -> Result<Box<dyn Connection>> {
        let conn = TcpConnection::open(&self.config)?;
        Ok(Box::new(conn))
    }
}
