//! The session object, its lifecycle state machine and the session registry.
//!
//! A session is the single long-lived object for one modem over one
//! transport. Two paths run through it concurrently: the issuing path
//! (application calls) and the receive path (driven by incoming modem data,
//! performing shutdown signalling and event dispatch). The lifecycle mutex
//! serializes the open/closing/shutdown flags; collaborator shutdown calls
//! are made with no session mutex held because they may block.

mod registry;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::config::{DEFAULT_COMMAND_TIMEOUT, PDN_CONTEXT_ID_MAX, PDN_CONTEXT_ID_MIN};
use crate::error::{Error, Result};
use crate::events::{
    EventDispatcher, GenericUrcHandler, InputBufferHandler, ModemEventHandler,
    NetworkRegistrationHandler, PdnEventHandler, SignalStrengthHandler, UndefinedResponseHandler,
};
use crate::socket::{SocketHandle, SocketPool};
use crate::stack::{CommandRequest, PacketSink, SessionStack, ShutdownNotifier};
use crate::status::PacketStatus;
use crate::transport::{CommInterface, TokenTable};
use crate::types::{
    ModemEvent, NetworkRegistrationStatus, Rat, ServiceStatus, SignalInfo, SocketDomain,
    SocketProtocol, SocketType, UrcEvent,
};

pub use registry::{create_session, destroy_session};

/// Open/close flags, guarded by the lifecycle mutex.
#[derive(Debug, Default)]
struct LibStatus {
    opened: bool,
    shutdown_requested: bool,
    closing: bool,
}

/// Shared protocol data maintained by the receive path, guarded by its own
/// mutex so status queries never contend with protocol-data reads.
#[derive(Debug, Default, Clone)]
struct AtData {
    rat: Rat,
    cs_registration_status: NetworkRegistrationStatus,
    ps_registration_status: NetworkRegistrationStatus,
}

/// The driver instance coordinating one modem over one transport.
///
/// Created through [`create_session`]; at most
/// [`crate::config::SESSION_MAX`] sessions exist process-wide.
pub struct Session {
    comm: Arc<dyn CommInterface>,
    token_table: TokenTable,
    stack: SessionStack,
    status: Mutex<LibStatus>,
    at_data: Mutex<AtData>,
    // Serializes command submission; at most one request is in flight.
    command: Mutex<()>,
    sockets: SocketPool,
    events: EventDispatcher,
    module_state: Mutex<Option<Arc<dyn Any + Send + Sync>>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status.lock();
        f.debug_struct("Session")
            .field("opened", &status.opened)
            .field("shutdown_requested", &status.shutdown_requested)
            .field("closing", &status.closing)
            .finish_non_exhaustive()
    }
}

impl Session {
    fn new(comm: Arc<dyn CommInterface>, token_table: TokenTable, stack: SessionStack) -> Self {
        Self {
            comm,
            token_table,
            stack,
            status: Mutex::new(LibStatus::default()),
            at_data: Mutex::new(AtData::default()),
            command: Mutex::new(()),
            sockets: SocketPool::new(),
            events: EventDispatcher::new(),
            module_state: Mutex::new(None),
        }
    }

    /// Opens the session: parser state, protocol data, shutdown wiring, then
    /// the packet handler and packet-I/O layers in that order. Runs under the
    /// lifecycle mutex so open is atomic with respect to status queries.
    fn open(session: &Arc<Session>) -> Result<()> {
        let mut status = session.status.lock();

        // Parser init failure is not fatal here; the first submitted command
        // surfaces a broken parser.
        let _ = session.stack.at_parser.init(session);

        *session.at_data.lock() = AtData::default();

        let notifier = ShutdownNotifier::new(Arc::downgrade(session));
        let handler = Arc::clone(&session.stack.packet_handler);
        let sink: PacketSink = Box::new(move |payload| handler.handle_packet(payload));

        let mut pkt_status = session.stack.packet_handler.init(session);

        if pkt_status == PacketStatus::Ok {
            pkt_status = session.stack.packet_io.init(session, sink, notifier);

            if pkt_status != PacketStatus::Ok {
                error!("packet i/o failed to initialize");
                session.stack.packet_io.shutdown();
                session.stack.packet_handler.cleanup();
            }
        }

        pkt_status.into_result()?;

        status.opened = true;
        status.shutdown_requested = false;
        Ok(())
    }

    /// Closes the session. Safe to call on a session that never opened or
    /// has already been closed.
    ///
    /// The collaborator shutdown calls may block, so they run with no
    /// session mutex held; `closing` stays set for their duration and
    /// [`Session::check_usable`] fails fast meanwhile.
    pub fn close(&self) {
        let opened = {
            let mut status = self.status.lock();
            let opened = status.opened;
            status.closing = true;
            opened
        };

        if opened {
            self.stack.packet_io.shutdown();
            self.stack.packet_handler.cleanup();
        }

        let mut status = self.status.lock();
        status.shutdown_requested = false;
        status.opened = false;
        status.closing = false;

        // Remove all created sockets.
        self.sockets.clear();
        drop(status);

        debug!("modem session closed");
    }

    /// Mandatory precondition check for every operation that talks to the
    /// modem: the session must be open and neither closing nor shut down by
    /// a lower layer.
    pub fn check_usable(&self) -> Result<()> {
        {
            let status = self.status.lock();

            if !status.opened {
                return Err(Error::LibraryNotOpen);
            }
        }

        {
            let status = self.status.lock();

            if status.shutdown_requested || status.closing {
                error!(
                    "session reported a failure, shutdown {} closing {}",
                    status.shutdown_requested, status.closing
                );
                return Err(Error::InternalFailure);
            }
        }

        Ok(())
    }

    /// Invoked by lower layers through [`ShutdownNotifier`] on an
    /// unrecoverable condition. No side effects beyond the flag; callers
    /// discover it through [`Session::check_usable`].
    pub(crate) fn on_shutdown_signalled(&self) {
        self.status.lock().shutdown_requested = true;
    }

    /// The transport this session was created with.
    pub fn comm(&self) -> &Arc<dyn CommInterface> {
        &self.comm
    }

    /// The by-value token-table copy made at creation.
    pub fn token_table(&self) -> &TokenTable {
        &self.token_table
    }

    // ---------------------------------------------------------------------
    // Socket pool
    // ---------------------------------------------------------------------

    /// Claims the first free socket slot and returns an opaque handle to the
    /// new record, created in `Allocated` state.
    pub fn allocate_socket(
        &self,
        pdn_context_id: u8,
        domain: SocketDomain,
        socket_type: SocketType,
        protocol: SocketProtocol,
    ) -> Result<SocketHandle> {
        self.sockets
            .allocate(pdn_context_id, domain, socket_type, protocol)
    }

    /// Removes a socket record from the pool. Reports `BadParameter` when
    /// the handle is not (or no longer) pooled.
    pub fn free_socket(&self, handle: &SocketHandle) -> Result<()> {
        self.sockets.free(handle)
    }

    /// Bounds- and occupancy-checks a socket slot index.
    pub fn validate_socket(&self, index: usize) -> Result<()> {
        self.sockets.validate(index)
    }

    /// Looks up the socket record at a slot index.
    pub fn get_socket(&self, index: usize) -> Option<SocketHandle> {
        self.sockets.get(index)
    }

    // ---------------------------------------------------------------------
    // Protocol data
    // ---------------------------------------------------------------------

    /// Radio technology currently reported by the network.
    pub fn current_rat(&self) -> Result<Rat> {
        self.check_usable()?;
        Ok(self.at_data.lock().rat)
    }

    /// Records the radio technology. Called by the receive path when a
    /// registration URC carries a RAT change.
    pub fn set_current_rat(&self, rat: Rat) {
        self.at_data.lock().rat = rat;
    }

    /// Records CS/PS registration status from the receive path.
    pub fn set_registration_status(
        &self,
        cs: NetworkRegistrationStatus,
        ps: NetworkRegistrationStatus,
    ) {
        let mut at_data = self.at_data.lock();
        at_data.cs_registration_status = cs;
        at_data.ps_registration_status = ps;
    }

    /// CS and PS registration status as last reported by the network.
    pub fn registration_status(
        &self,
    ) -> Result<(NetworkRegistrationStatus, NetworkRegistrationStatus)> {
        self.check_usable()?;
        let at_data = self.at_data.lock();
        Ok((at_data.cs_registration_status, at_data.ps_registration_status))
    }

    // ---------------------------------------------------------------------
    // Module extension state
    // ---------------------------------------------------------------------

    /// Technology/module-specific extension state installed by the modem
    /// port. Callers downcast to their own type.
    pub fn module_state(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.module_state.lock().clone()
    }

    /// Installs module-specific extension state.
    pub fn set_module_state(&self, state: Arc<dyn Any + Send + Sync>) {
        *self.module_state.lock() = Some(state);
    }

    // ---------------------------------------------------------------------
    // Command submission
    // ---------------------------------------------------------------------

    /// Submits an AT command with the default timeout.
    pub fn submit_request(&self, request: &CommandRequest) -> PacketStatus {
        self.submit_request_with_timeout(request, DEFAULT_COMMAND_TIMEOUT)
    }

    /// Submits an AT command, blocking until completion or `timeout`.
    ///
    /// Cancellation is not provided; the maximum wait is the submitted
    /// timeout. The command mutex keeps a single request in flight.
    pub fn submit_request_with_timeout(
        &self,
        request: &CommandRequest,
        timeout: Duration,
    ) -> PacketStatus {
        let _in_flight = self.command.lock();
        self.stack.packet_handler.submit(request, timeout)
    }

    // ---------------------------------------------------------------------
    // Event callback registration (None unregisters)
    // ---------------------------------------------------------------------

    /// Registers the network-registration URC handler.
    pub fn register_network_registration_callback(
        &self,
        handler: Option<NetworkRegistrationHandler>,
    ) {
        self.events.set_network_registration(handler);
    }

    /// Registers the PDN event handler.
    pub fn register_pdn_event_callback(&self, handler: Option<PdnEventHandler>) {
        self.events.set_pdn_event(handler);
    }

    /// Registers the signal-strength-changed handler.
    pub fn register_signal_strength_callback(&self, handler: Option<SignalStrengthHandler>) {
        self.events.set_signal_strength(handler);
    }

    /// Registers the generic URC handler.
    pub fn register_generic_urc_callback(&self, handler: Option<GenericUrcHandler>) {
        self.events.set_generic_urc(handler);
    }

    /// Registers the modem event handler.
    pub fn register_modem_event_callback(&self, handler: Option<ModemEventHandler>) {
        self.events.set_modem_event(handler);
    }

    /// Registers the request-scoped undefined-response handler.
    pub fn register_undefined_response_callback(&self, handler: Option<UndefinedResponseHandler>) {
        self.events.set_undefined_response(handler);
    }

    /// Registers the request-scoped input-buffer handler.
    pub fn register_input_buffer_callback(&self, handler: Option<InputBufferHandler>) {
        self.events.set_input_buffer(handler);
    }

    // ---------------------------------------------------------------------
    // Event dispatch (receive path)
    // ---------------------------------------------------------------------

    /// Fans out a network registration URC.
    pub fn notify_network_registration(&self, event: UrcEvent, status: &ServiceStatus) {
        self.events.network_registration(event, status);
    }

    /// Fans out a PDN activation/deactivation URC.
    pub fn notify_pdn_event(&self, event: UrcEvent, context_id: u8) {
        self.events.pdn_event(event, context_id);
    }

    /// Fans out a signal-strength-changed URC.
    pub fn notify_signal_strength_changed(&self, event: UrcEvent, info: &SignalInfo) {
        self.events.signal_strength(event, info);
    }

    /// Fans out a URC line no other class claimed.
    pub fn notify_generic_urc(&self, raw: &str) {
        self.events.generic_urc(raw);
    }

    /// Fans out a modem lifecycle event.
    pub fn notify_modem_event(&self, event: ModemEvent) {
        self.events.modem_event(event);
    }

    /// Offers unattributable modem output to the undefined-response handler.
    /// `None` when no handler is registered.
    pub fn on_undefined_response(&self, raw: &str) -> Option<PacketStatus> {
        self.events.undefined_response(raw)
    }

    /// Offers raw input-buffer data to the input-buffer handler. `None` when
    /// no handler is registered.
    pub fn on_input_buffer(&self, data: &[u8]) -> Option<(PacketStatus, usize)> {
        self.events.input_buffer(data)
    }
}

/// Range check for a PDN context id. Pure and stateless.
pub fn validate_pdn_context_id(context_id: u8) -> Result<()> {
    if !(PDN_CONTEXT_ID_MIN..=PDN_CONTEXT_ID_MAX).contains(&context_id) {
        error!("PDN context id out of range: {}", context_id);
        return Err(Error::BadParameter);
    }
    Ok(())
}
