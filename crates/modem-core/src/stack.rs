//! Contracts for the collaborators below this core.
//!
//! The AT parser, the packet-I/O layer (transport framer) and the packet
//! handler (request/response correlation engine) are separate components.
//! This module defines the seams they are consumed through; the core never
//! sees their internals.

use std::sync::{Arc, Weak};
use std::time::Duration;

use bytes::Bytes;

use crate::session::Session;
use crate::status::{AtStatus, PacketStatus};

/// Response classification for a submitted AT command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtCommandKind {
    /// No response expected beyond the result code.
    NoResult,
    /// Single-line response without a prefix.
    NoPrefix,
    /// Single-line response introduced by a prefix.
    WithPrefix,
    /// Multi-line response, every line prefixed.
    MultiWithPrefix,
    /// Multi-line response with or without prefixes.
    MultiNoPrefix,
    /// Multi-line data response with or without prefixes.
    MultiDataNoPrefix,
    /// Unprefixed response and no result code expected.
    NoPrefixNoResultCode,
    /// Prefixed response and no result code expected.
    WithPrefixNoResultCode,
}

/// An AT command plus the metadata the packet handler needs to classify its
/// response. Opaque to this core; it is carried to the packet handler as-is.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// Command text without line termination (e.g. `AT+CSQ`).
    pub command: String,
    /// Expected response shape.
    pub kind: AtCommandKind,
    /// Expected response prefix, when `kind` calls for one.
    pub response_prefix: Option<&'static str>,
}

impl CommandRequest {
    /// A command expecting only a result code.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            kind: AtCommandKind::NoResult,
            response_prefix: None,
        }
    }

    /// A command expecting a single prefixed response line.
    pub fn with_prefix(command: impl Into<String>, prefix: &'static str) -> Self {
        Self {
            command: command.into(),
            kind: AtCommandKind::WithPrefix,
            response_prefix: Some(prefix),
        }
    }
}

/// Receive-path sink handed to the packet-I/O layer at open. Each discrete
/// AT line or data frame the framer produces is pushed through this.
pub type PacketSink = Box<dyn Fn(Bytes) -> PacketStatus + Send + Sync>;

/// Clonable handle a lower layer uses to report an unrecoverable condition.
///
/// Signalling sets the session's shutdown-requested flag under the lifecycle
/// lock and nothing else; callers discover the condition through
/// [`Session::check_usable`]. Holding the notifier does not keep the session
/// alive.
#[derive(Clone)]
pub struct ShutdownNotifier {
    session: Weak<Session>,
}

impl ShutdownNotifier {
    pub(crate) fn new(session: Weak<Session>) -> Self {
        Self { session }
    }

    /// Marks the session as shut down by a lower layer.
    pub fn signal(&self) {
        if let Some(session) = self.session.upgrade() {
            session.on_shutdown_signalled();
        }
    }
}

/// AT-token scanner collaborator.
pub trait AtParser: Send + Sync {
    /// Initializes parser state for a session being opened.
    fn init(&self, session: &Session) -> AtStatus;
}

/// Byte-stream framer over the physical transport.
pub trait PacketIo: Send + Sync {
    /// Starts the receive path: frames incoming bytes into discrete AT lines
    /// and feeds them to `on_packet`. `on_shutdown` must be signalled on an
    /// unrecoverable transport error.
    fn init(
        &self,
        session: &Session,
        on_packet: PacketSink,
        on_shutdown: ShutdownNotifier,
    ) -> PacketStatus;

    /// Stops the receive path. May block until it has quiesced.
    fn shutdown(&self);
}

/// Request/response correlation engine.
///
/// At most one command is in flight at a time; the maximum wait for a
/// submission is the supplied timeout. There is no separate abort path.
pub trait PacketHandler: Send + Sync {
    /// Prepares the handler for a session being opened.
    fn init(&self, session: &Session) -> PacketStatus;

    /// Releases handler resources. May block until in-flight work settles.
    fn cleanup(&self);

    /// Receive-path entry: classifies one framed line (command response or
    /// URC) and completes the pending request when appropriate.
    fn handle_packet(&self, payload: Bytes) -> PacketStatus;

    /// Submits a command and blocks until completion or timeout.
    fn submit(&self, request: &CommandRequest, timeout: Duration) -> PacketStatus;
}

/// The collaborator set wired to a session at creation.
#[derive(Clone)]
pub struct SessionStack {
    /// AT-token scanner.
    pub at_parser: Arc<dyn AtParser>,
    /// Byte-stream framer.
    pub packet_io: Arc<dyn PacketIo>,
    /// Request/response correlation engine.
    pub packet_handler: Arc<dyn PacketHandler>,
}
