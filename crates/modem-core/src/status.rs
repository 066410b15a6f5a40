//! Lower-layer status vocabularies and the translators that narrow them.
//!
//! The driver stacks three error vocabularies: the AT parser reports
//! [`AtStatus`], the packet layers report [`PacketStatus`], and the public API
//! reports [`crate::error::Error`]. The two functions here are the only place
//! the narrowing happens, so a new lower-layer code needs exactly one arm and
//! defaults to a conservative failure classification instead of silently
//! succeeding.

use tracing::error;

use crate::error::{Error, Result};

/// Status codes reported by the packet-I/O and packet-handler layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PacketStatus {
    /// The operation was successful.
    Ok,
    /// The operation timed out.
    TimedOut,
    /// There was some internal failure.
    Failure,
    /// The request was not valid.
    BadRequest,
    /// The response received was not valid.
    BadResponse,
    /// There is a size mismatch between the params.
    SizeMismatch,
    /// One or more params is not valid.
    BadParam,
    /// The modem returned a send error.
    SendError,
    /// Invalid session reference.
    InvalidHandle,
    /// Resource creation failed.
    CreationFail,
    /// Invalid prefix in a modem response.
    PrefixMismatch,
    /// Invalid data in a modem response.
    InvalidData,
    /// Pending data from a modem response.
    PendingData,
    /// Pending buffer from a modem response.
    PendingBuffer,
}

/// Status codes reported by the AT-token parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AtStatus {
    /// The operation was successful.
    Success,
    /// An input parameter was not valid.
    BadParameter,
    /// Parser ran out of memory.
    NoMemory,
    /// The operation is not supported by the parser.
    Unsupported,
    /// The modem reported an error.
    ModemError,
    /// Generic parser error.
    Error,
    /// Any other parser error.
    Unknown,
}

impl PacketStatus {
    /// Narrows a packet-layer status into the library taxonomy.
    ///
    /// Anything other than success or timeout collapses to
    /// [`Error::InternalFailure`].
    pub fn into_result(self) -> Result<()> {
        match self {
            PacketStatus::Ok => Ok(()),
            PacketStatus::TimedOut => Err(Error::Timeout),
            other => {
                error!("packet status translated to internal failure: {:?}", other);
                Err(Error::InternalFailure)
            }
        }
    }
}

impl AtStatus {
    /// Narrows an AT-parser status into the packet-layer vocabulary.
    ///
    /// Anything other than success or bad-parameter collapses to
    /// [`PacketStatus::Failure`].
    pub fn into_packet_status(self) -> PacketStatus {
        match self {
            AtStatus::Success => PacketStatus::Ok,
            AtStatus::BadParameter => PacketStatus::BadParam,
            other => {
                error!("AT parser status translated to failure: {:?}", other);
                PacketStatus::Failure
            }
        }
    }
}
