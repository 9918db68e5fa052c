//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (RESP subset)
//!
//! Every frame starts with a one-byte tag and every scalar field is
//! terminated by CRLF:
//!
//! ```text
//! *<count>\r\n ... count elements ...     array
//! $<len>\r\n<len bytes>\r\n               bulk string ($-1 => nil, no body)
//! :<decimal>\r\n                          integer
//! +<text>\r\n                             simple string
//! -<text>\r\n                             error
//! ```
//!
//! Counts and lengths are always ASCII decimal digit strings, never
//! fixed-width binary integers, so any standard-conforming peer can
//! parse them.

mod value;
mod encoder;
mod parser;

pub use value::{Arg, Reply};
pub use encoder::Encoder;
pub use parser::Parser;
