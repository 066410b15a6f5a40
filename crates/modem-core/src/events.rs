//! Event-callback registration and fan-out.
//!
//! One optional handler per event class, invoked synchronously by the receive
//! path. Registration replaces the whole `Option` under the same lock
//! dispatch takes, so a dispatch on another thread observes the old handler
//! or the new one in full, never a mix. Dispatch with nothing registered is a
//! silent no-op; absence of a listener is normal.
//!
//! Handlers run with the registration lock held and must not re-register
//! callbacks from inside the handler body.

use parking_lot::Mutex;

use crate::status::PacketStatus;
use crate::types::{ModemEvent, ServiceStatus, SignalInfo, UrcEvent};

/// Handler for network CS/PS registration URCs.
pub type NetworkRegistrationHandler = Box<dyn Fn(UrcEvent, &ServiceStatus) + Send + Sync>;

/// Handler for PDN activation/deactivation URCs; receives the context id.
pub type PdnEventHandler = Box<dyn Fn(UrcEvent, u8) + Send + Sync>;

/// Handler for signal-strength-changed URCs.
pub type SignalStrengthHandler = Box<dyn Fn(UrcEvent, &SignalInfo) + Send + Sync>;

/// Handler for URC lines no other class claims; receives the raw line.
pub type GenericUrcHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Handler for modem lifecycle events (boot, power-down, PSM entry).
pub type ModemEventHandler = Box<dyn Fn(ModemEvent) + Send + Sync>;

/// Request-scoped handler for modem output the correlation engine cannot
/// attribute to the in-flight command.
pub type UndefinedResponseHandler = Box<dyn Fn(&str) -> PacketStatus + Send + Sync>;

/// Request-scoped handler for raw input-buffer data (binary socket payloads
/// interleaved with command responses). Returns the status and the number of
/// bytes consumed.
pub type InputBufferHandler = Box<dyn Fn(&[u8]) -> (PacketStatus, usize) + Send + Sync>;

#[derive(Default)]
struct EventCallbacks {
    network_registration: Option<NetworkRegistrationHandler>,
    pdn_event: Option<PdnEventHandler>,
    signal_strength: Option<SignalStrengthHandler>,
    generic_urc: Option<GenericUrcHandler>,
    modem_event: Option<ModemEventHandler>,
}

#[derive(Default)]
struct ResponseCallbacks {
    undefined_response: Option<UndefinedResponseHandler>,
    input_buffer: Option<InputBufferHandler>,
}

/// Per-session callback set.
///
/// The five event classes share one lock; the two request-scoped callbacks
/// live under a separate response lock, matching the lock the correlation
/// engine consults them under.
pub(crate) struct EventDispatcher {
    events: Mutex<EventCallbacks>,
    response: Mutex<ResponseCallbacks>,
}

impl EventDispatcher {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(EventCallbacks::default()),
            response: Mutex::new(ResponseCallbacks::default()),
        }
    }

    pub(crate) fn set_network_registration(&self, handler: Option<NetworkRegistrationHandler>) {
        self.events.lock().network_registration = handler;
    }

    pub(crate) fn set_pdn_event(&self, handler: Option<PdnEventHandler>) {
        self.events.lock().pdn_event = handler;
    }

    pub(crate) fn set_signal_strength(&self, handler: Option<SignalStrengthHandler>) {
        self.events.lock().signal_strength = handler;
    }

    pub(crate) fn set_generic_urc(&self, handler: Option<GenericUrcHandler>) {
        self.events.lock().generic_urc = handler;
    }

    pub(crate) fn set_modem_event(&self, handler: Option<ModemEventHandler>) {
        self.events.lock().modem_event = handler;
    }

    pub(crate) fn set_undefined_response(&self, handler: Option<UndefinedResponseHandler>) {
        self.response.lock().undefined_response = handler;
    }

    pub(crate) fn set_input_buffer(&self, handler: Option<InputBufferHandler>) {
        self.response.lock().input_buffer = handler;
    }

    pub(crate) fn network_registration(&self, event: UrcEvent, status: &ServiceStatus) {
        if let Some(callback) = self.events.lock().network_registration.as_ref() {
            callback(event, status);
        }
    }

    pub(crate) fn pdn_event(&self, event: UrcEvent, context_id: u8) {
        if let Some(callback) = self.events.lock().pdn_event.as_ref() {
            callback(event, context_id);
        }
    }

    pub(crate) fn signal_strength(&self, event: UrcEvent, info: &SignalInfo) {
        if let Some(callback) = self.events.lock().signal_strength.as_ref() {
            callback(event, info);
        }
    }

    pub(crate) fn generic_urc(&self, raw: &str) {
        if let Some(callback) = self.events.lock().generic_urc.as_ref() {
            callback(raw);
        }
    }

    pub(crate) fn modem_event(&self, event: ModemEvent) {
        if let Some(callback) = self.events.lock().modem_event.as_ref() {
            callback(event);
        }
    }

    pub(crate) fn undefined_response(&self, raw: &str) -> Option<PacketStatus> {
        self.response
            .lock()
            .undefined_response
            .as_ref()
            .map(|callback| callback(raw))
    }

    pub(crate) fn input_buffer(&self, data: &[u8]) -> Option<(PacketStatus, usize)> {
        self.response
            .lock()
            .input_buffer
            .as_ref()
            .map(|callback| callback(data))
    }
}
