//! # respkv
//!
//! A minimal synchronous client for a RESP-style key-value store:
//! - Byte-exact wire codec (arrays, bulk strings, integers, simple
//!   strings, errors)
//! - One short-lived authenticated connection per operation
//! - Blocking std::io, no shared state, no locks
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Client                        │
//! │        set / get / expire / del / ready          │
//! └───────────────────────┬─────────────────────────┘
//!                         │ one fresh connection per op
//! ┌───────────────────────▼─────────────────────────┐
//! │                  Connection                      │
//! │        connect → AUTH → call → QUIT → close      │
//! └───────────┬─────────────────────────┬───────────┘
//!             │                         │
//!             ▼                         ▼
//!      ┌─────────────┐          ┌─────────────┐
//!      │   Encoder   │          │   Parser    │
//!      │  (commands) │          │  (replies)  │
//!      └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{Arg, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
