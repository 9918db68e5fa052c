//! Protocol value definitions
//!
//! Command arguments accepted by the encoder and replies produced by
//! the parser.

use bytes::Bytes;

/// One decoded reply frame
///
/// Server error frames (`-...`) are never represented here; the parser
/// surfaces them as [`RespError::ServerFault`](crate::RespError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Absence of a value (null bulk string, null array, or clean
    /// end-of-stream before any frame byte)
    Nil,

    /// A simple status string, e.g. "OK" or "PONG"
    Text(Bytes),

    /// A signed 64-bit count or flag
    Integer(i64),

    /// A bulk payload of declared length (binary-safe, may contain
    /// CR/LF bytes)
    Bytes(Bytes),

    /// An ordered sequence of replies of declared count
    Array(Vec<Reply>),
}

impl Reply {
    /// The textual payload of a `Text` or `Bytes` reply, if any
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Reply::Text(b) | Reply::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// One command argument accepted by the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Raw bytes, encoded as a bulk string
    Bytes(Bytes),

    /// UTF-8 text, encoded identically to `Bytes`
    Text(String),

    /// A signed 64-bit integer
    Integer(i64),

    /// A nested argument list (unused by the client wrappers, kept for
    /// protocol completeness)
    Array(Vec<Arg>),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg::Bytes(b)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Integer(n)
    }
}
