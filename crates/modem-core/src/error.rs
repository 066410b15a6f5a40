//! Unified error taxonomy for the modem driver.
//!
//! Lower-layer vocabularies ([`crate::status::AtStatus`] and
//! [`crate::status::PacketStatus`]) never cross the public boundary; they are
//! narrowed into this enum by the translators in [`crate::status`].

use thiserror::Error;

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Library-level error kinds reported to the application.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The supplied session handle is not a registered session.
    #[error("invalid session handle")]
    InvalidHandle,

    /// The modem is not ready yet.
    #[error("modem is not ready")]
    ModemNotReady,

    /// The session has not been opened.
    #[error("library is not open")]
    LibraryNotOpen,

    /// The session is already open.
    #[error("library is already open")]
    LibraryAlreadyOpen,

    /// One or more of the input parameters is not valid.
    #[error("bad parameter")]
    BadParameter,

    /// A fixed-capacity table is full or a backing allocation failed.
    #[error("out of memory")]
    NoMemory,

    /// The operation timed out.
    #[error("operation timed out")]
    Timeout,

    /// The supplied socket is already closed.
    #[error("socket is closed")]
    SocketClosed,

    /// The supplied socket is not connected.
    #[error("socket is not connected")]
    SocketNotConnected,

    /// Internal failure, including a lower layer signalling shutdown.
    #[error("internal failure")]
    InternalFailure,

    /// A collaborator failed to create a required resource.
    #[error("resource creation failed")]
    ResourceCreationFailure,

    /// The operation is not supported.
    #[error("operation not supported")]
    Unsupported,

    /// The operation is not allowed in the current state.
    #[error("operation not allowed")]
    NotAllowed,

    /// Any error not covered by the other kinds.
    #[error("unknown error")]
    Unknown,
}
