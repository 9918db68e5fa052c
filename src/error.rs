//! Error types for respkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RespError
pub type Result<T> = std::result::Result<T, RespError>;

/// Unified error type for respkv operations
#[derive(Debug, Error)]
pub enum RespError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Transport-level failure: connect refused, stream closed mid-frame,
    /// payload truncated before the declared length was read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Unexpected leading tag byte or a missing CRLF terminator where
    /// one is required. Always fatal to the in-flight call.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The peer returned an error reply (`-...`); carries the peer's
    /// message text. Fatal to the in-flight call, never retried.
    #[error("server error: {0}")]
    ServerFault(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    /// A value outside the recognized argument variant set was handed to
    /// the encoder. The closed [`Arg`](crate::protocol::Arg) enum makes
    /// this unreachable from library code; the kind exists for frontends
    /// that map dynamically-typed values onto commands.
    #[error("unsupported argument: {0}")]
    UnsupportedArgument(String),
}
