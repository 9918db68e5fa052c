//! Frame encoder
//!
//! Serializes a command (ordered list of arguments) into the wire byte
//! format.

use std::io::Write;

use crate::error::Result;
use super::Arg;

const CRLF: &[u8] = b"\r\n";

/// Serializes commands onto a byte sink
///
/// The sink is typically a `BufWriter<TcpStream>`; nothing is sent
/// until [`flush`](Encoder::flush) is called, and callers must flush
/// after every [`write`](Encoder::write) before awaiting a reply.
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder over the given sink
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encode one command: an array header followed by each argument
    pub fn write(&mut self, args: &[Arg]) -> Result<()> {
        self.writer.write_all(b"*")?;
        write!(self.writer, "{}", args.len())?;
        self.writer.write_all(CRLF)?;

        for arg in args {
            match arg {
                Arg::Bytes(b) => self.write_bulk(b)?,
                Arg::Text(s) => self.write_bulk(s.as_bytes())?,
                Arg::Integer(n) => self.write_integer(*n)?,
                Arg::Array(inner) => self.write(inner)?,
            }
        }

        Ok(())
    }

    /// Force buffered bytes out to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Access the underlying sink
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    // Bulk string framing: `$<len>\r\n<raw bytes>\r\n`
    fn write_bulk(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(b"$")?;
        write!(self.writer, "{}", value.len())?;
        self.writer.write_all(CRLF)?;
        self.writer.write_all(value)?;
        self.writer.write_all(CRLF)?;
        Ok(())
    }

    // Integer framing: `:<decimal>\r\n`, optionally signed
    fn write_integer(&mut self, value: i64) -> Result<()> {
        self.writer.write_all(b":")?;
        write!(self.writer, "{}", value)?;
        self.writer.write_all(CRLF)?;
        Ok(())
    }
}
