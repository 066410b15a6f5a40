//! Comm-interface contract and the per-module token tables.
//!
//! The physical transport (UART, USB CDC-ACM, a test double) lives below the
//! byte-stream framer and is supplied at session creation as a trait object.

use std::io;

use bytes::Bytes;
use tracing::error;

use crate::error::{Error, Result};
use crate::session::Session;

/// Serial-like transport the modem is reached through.
///
/// All four operations are required; a transport that cannot implement one of
/// them has no business being handed to [`crate::session::create_session`].
pub trait CommInterface: Send + Sync {
    /// Opens the transport.
    fn open(&self) -> io::Result<()>;

    /// Closes the transport.
    fn close(&self) -> io::Result<()>;

    /// Sends raw bytes to the modem, returning the number of bytes written.
    fn send(&self, data: &Bytes) -> io::Result<usize>;

    /// Receives raw bytes from the modem.
    fn recv(&self) -> io::Result<Bytes>;
}

/// Handler invoked by the receive path for a URC line matching its prefix.
pub type UrcHandler = fn(session: &Session, payload: &str);

/// Token tables describing a modem module's AT grammar.
///
/// Supplied wholesale at session creation and copied by value into the
/// session, so the tables cannot change underneath the receive path.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    /// URC prefix strings and their handlers.
    pub urc_handlers: Vec<(&'static str, UrcHandler)>,
    /// Tokens that terminate a response successfully (e.g. `OK`).
    pub success_tokens: Vec<&'static str>,
    /// Tokens that terminate a response with an error (e.g. `ERROR`, `+CME ERROR`).
    pub error_tokens: Vec<&'static str>,
    /// URC tokens delivered without a `+PREFIX:` marker.
    pub urc_tokens_without_prefix: Vec<&'static str>,
}

impl TokenTable {
    /// Structural validation at session creation. A grammar without success
    /// or error markers cannot classify any response.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.success_tokens.is_empty() || self.error_tokens.is_empty() {
            error!("token table is missing success or error markers");
            return Err(Error::BadParameter);
        }
        Ok(())
    }
}
