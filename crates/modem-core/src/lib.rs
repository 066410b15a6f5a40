//! Core layer of a cellular modem driver driven over an AT-command transport.
//!
//! This crate owns the pieces of the driver where concurrency correctness,
//! resource-pool invariants and the multi-layer error model meet: the single
//! shared session object and its open/close state machine, the fixed-capacity
//! socket pool, the registration and fan-out of asynchronous event callbacks,
//! and the translation of lower-layer status codes into one error taxonomy.
//!
//! The AT-token grammar, the byte-stream framer, the physical transport and
//! the request/response correlation engine are collaborators, consumed only
//! through the traits in [`transport`] and [`stack`].

pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod signal;
pub mod socket;
pub mod stack;
pub mod status;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use session::{create_session, destroy_session, validate_pdn_context_id, Session};
pub use socket::{SocketHandle, SocketRecord};
pub use stack::{AtCommandKind, CommandRequest, SessionStack, ShutdownNotifier};
pub use status::{AtStatus, PacketStatus};
pub use transport::{CommInterface, TokenTable};

/// Re-export of common types for easier use.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::session::{create_session, destroy_session, validate_pdn_context_id, Session};
    pub use crate::signal::{compute_signal_bars, csq_ber_centipercent, csq_rssi_dbm};
    pub use crate::socket::SocketHandle;
    pub use crate::stack::{
        AtCommandKind, AtParser, CommandRequest, PacketHandler, PacketIo, SessionStack,
        ShutdownNotifier,
    };
    pub use crate::status::{AtStatus, PacketStatus};
    pub use crate::transport::{CommInterface, TokenTable};
    pub use crate::types::{
        ModemEvent, Rat, ServiceStatus, SignalInfo, SocketDomain, SocketProtocol, SocketState,
        SocketType, UrcEvent,
    };
}
