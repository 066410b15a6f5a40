//! Compile-time capacities and timeouts.
//!
//! These mirror the configuration defaults of constrained modem ports: all
//! tables are fixed-capacity so the driver allocates bounded memory.

use std::time::Duration;

/// Number of concurrently registered sessions. The registry is written as a
/// general fixed-capacity scan, so this stays a configuration constant rather
/// than a structural assumption.
pub const SESSION_MAX: usize = 1;

/// Number of logical socket slots per session.
pub const SOCKET_MAX: usize = 4;

/// Smallest valid PDN context id.
pub const PDN_CONTEXT_ID_MIN: u8 = 1;

/// Largest valid PDN context id.
pub const PDN_CONTEXT_ID_MAX: u8 = 16;

/// Timeout applied to command submission when the caller does not supply one.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(5000);
