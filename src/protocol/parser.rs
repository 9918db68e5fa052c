//! Frame parser
//!
//! Consumes bytes from an input stream and reconstructs one reply
//! value, recursively for aggregate types.

use std::io::Read;

use bytes::{Bytes, BytesMut};

use crate::error::{RespError, Result};
use super::Reply;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

fn eof() -> RespError {
    RespError::Io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "stream closed mid-frame",
    ))
}

/// Decodes reply frames from a byte source
///
/// The source is typically a `BufReader<TcpStream>`. Each call to
/// [`parse`](Parser::parse) reads exactly one complete frame.
pub struct Parser<R: Read> {
    reader: R,
}

impl<R: Read> Parser<R> {
    /// Create a parser over the given source
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one framed reply, dispatching on the leading tag byte
    ///
    /// A clean end-of-stream before any frame byte yields `Reply::Nil`;
    /// end-of-stream anywhere inside a frame is an I/O error.
    pub fn parse(&mut self) -> Result<Reply> {
        match self.read_byte()? {
            Some(tag) => self.parse_frame(tag),
            None => Ok(Reply::Nil),
        }
    }

    /// Access the underlying source
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    fn parse_frame(&mut self, tag: u8) -> Result<Reply> {
        match tag {
            b'+' => Ok(Reply::Text(self.scan_line()?)),
            b':' => Ok(Reply::Integer(self.parse_integer()?)),
            b'$' => self.parse_bulk(),
            b'*' => self.parse_array(),
            b'-' => {
                let message = self.scan_line()?;
                Err(RespError::ServerFault(
                    String::from_utf8_lossy(&message).into_owned(),
                ))
            }
            other => Err(RespError::MalformedFrame(format!(
                "unexpected tag byte: 0x{:02x}",
                other
            ))),
        }
    }

    // Array elements sit inside an open frame, so end-of-stream here is
    // never the clean sentinel.
    fn parse_element(&mut self) -> Result<Reply> {
        match self.read_byte()? {
            Some(tag) => self.parse_frame(tag),
            None => Err(eof()),
        }
    }

    // Bulk string: `$<len>\r\n<len bytes>\r\n`; len -1 denotes nil
    // with no body and no further terminator.
    fn parse_bulk(&mut self) -> Result<Reply> {
        let declared = self.parse_integer()?;
        if declared == -1 {
            return Ok(Reply::Nil);
        }
        if declared < 0 {
            return Err(RespError::MalformedFrame(format!(
                "invalid bulk length: {}",
                declared
            )));
        }

        // read_exact loops until the declared length is satisfied, so a
        // short read from the stream is never mistaken for completion
        let mut payload = vec![0u8; declared as usize];
        self.reader.read_exact(&mut payload)?;
        self.expect_crlf()?;

        Ok(Reply::Bytes(Bytes::from(payload)))
    }

    // Array: `*<count>\r\n` followed by count fully-framed elements.
    // Nil elements keep their position so the sequence length always
    // equals the declared count; a negative count is the protocol's
    // null array.
    fn parse_array(&mut self) -> Result<Reply> {
        let count = self.parse_integer()?;
        if count == -1 {
            return Ok(Reply::Nil);
        }
        if count < 0 {
            return Err(RespError::MalformedFrame(format!(
                "invalid array count: {}",
                count
            )));
        }

        let mut elements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            elements.push(self.parse_element()?);
        }
        Ok(Reply::Array(elements))
    }

    // The two terminator bytes that must follow a bulk payload.
    fn expect_crlf(&mut self) -> Result<()> {
        for expected in [CR, LF] {
            match self.read_byte()? {
                Some(b) if b == expected => {}
                Some(b) => {
                    return Err(RespError::MalformedFrame(format!(
                        "expected terminator byte 0x{:02x}, got 0x{:02x}",
                        expected, b
                    )))
                }
                None => return Err(eof()),
            }
        }
        Ok(())
    }

    // Scalar fields (integers, lengths, counts) are ASCII decimal
    // digit strings terminated by CRLF.
    fn parse_integer(&mut self) -> Result<i64> {
        let line = self.scan_line()?;
        let text = std::str::from_utf8(&line)
            .map_err(|_| RespError::MalformedFrame("non-ASCII integer field".to_string()))?;
        text.parse::<i64>().map_err(|_| {
            RespError::MalformedFrame(format!("invalid integer field: {:?}", text))
        })
    }

    /// Accumulate bytes until CR, require the following LF, and return
    /// the accumulated bytes excluding the terminator
    ///
    /// The buffer grows geometrically, so there is no fixed maximum
    /// line length.
    fn scan_line(&mut self) -> Result<Bytes> {
        let mut buffer = BytesMut::with_capacity(64);
        loop {
            match self.read_byte()? {
                Some(CR) => break,
                Some(b) => buffer.extend_from_slice(&[b]),
                None => return Err(eof()),
            }
        }
        match self.read_byte()? {
            Some(LF) => Ok(buffer.freeze()),
            Some(b) => Err(RespError::MalformedFrame(format!(
                "expected LF after CR, got 0x{:02x}",
                b
            ))),
            None => Err(eof()),
        }
    }

    // One byte from the source; None on end-of-stream.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
