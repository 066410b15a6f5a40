//! Mock collaborators for the session lifecycle and event tests.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;

use rmodem_core::prelude::*;

/// Transport double; every operation succeeds and receives nothing.
pub struct MockComm;

impl CommInterface for MockComm {
    fn open(&self) -> io::Result<()> {
        Ok(())
    }

    fn close(&self) -> io::Result<()> {
        Ok(())
    }

    fn send(&self, data: &Bytes) -> io::Result<usize> {
        Ok(data.len())
    }

    fn recv(&self) -> io::Result<Bytes> {
        Ok(Bytes::new())
    }
}

pub struct MockAtParser;

impl AtParser for MockAtParser {
    fn init(&self, _session: &Session) -> AtStatus {
        AtStatus::Success
    }
}

pub struct MockPacketIo {
    pub fail_init: bool,
    pub log: Arc<Mutex<Vec<&'static str>>>,
    pub notifier: Mutex<Option<ShutdownNotifier>>,
}

impl PacketIo for MockPacketIo {
    fn init(
        &self,
        _session: &Session,
        _on_packet: rmodem_core::stack::PacketSink,
        on_shutdown: ShutdownNotifier,
    ) -> PacketStatus {
        self.log.lock().push("pktio_init");
        *self.notifier.lock() = Some(on_shutdown);

        if self.fail_init {
            PacketStatus::Failure
        } else {
            PacketStatus::Ok
        }
    }

    fn shutdown(&self) {
        self.log.lock().push("pktio_shutdown");
    }
}

pub struct MockPacketHandler {
    pub log: Arc<Mutex<Vec<&'static str>>>,
    pub submitted: Mutex<Vec<(String, Duration)>>,
}

impl PacketHandler for MockPacketHandler {
    fn init(&self, _session: &Session) -> PacketStatus {
        self.log.lock().push("pkthandler_init");
        PacketStatus::Ok
    }

    fn cleanup(&self) {
        self.log.lock().push("pkthandler_cleanup");
    }

    fn handle_packet(&self, _payload: Bytes) -> PacketStatus {
        PacketStatus::Ok
    }

    fn submit(&self, request: &CommandRequest, timeout: Duration) -> PacketStatus {
        self.submitted.lock().push((request.command.clone(), timeout));
        PacketStatus::Ok
    }
}

pub struct Harness {
    pub packet_io: Arc<MockPacketIo>,
    pub packet_handler: Arc<MockPacketHandler>,
    pub log: Arc<Mutex<Vec<&'static str>>>,
}

/// Builds a collaborator stack whose calls are recorded in order.
pub fn mock_stack(fail_packet_io_init: bool) -> (SessionStack, Harness) {
    let log = Arc::new(Mutex::new(Vec::new()));

    let packet_io = Arc::new(MockPacketIo {
        fail_init: fail_packet_io_init,
        log: Arc::clone(&log),
        notifier: Mutex::new(None),
    });
    let packet_handler = Arc::new(MockPacketHandler {
        log: Arc::clone(&log),
        submitted: Mutex::new(Vec::new()),
    });

    let stack = SessionStack {
        at_parser: Arc::new(MockAtParser),
        packet_io: Arc::clone(&packet_io) as Arc<dyn PacketIo>,
        packet_handler: Arc::clone(&packet_handler) as Arc<dyn PacketHandler>,
    };

    (
        stack,
        Harness {
            packet_io,
            packet_handler,
            log,
        },
    )
}

/// A minimal well-formed token table.
pub fn token_table() -> TokenTable {
    TokenTable {
        urc_handlers: Vec::new(),
        success_tokens: vec!["OK"],
        error_tokens: vec!["ERROR", "+CME ERROR"],
        urc_tokens_without_prefix: vec!["RDY"],
    }
}

/// Installs the test log subscriber; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a session over the mock stack.
pub fn create_mock_session() -> (std::sync::Arc<Session>, Harness) {
    init_tracing();
    let (stack, harness) = mock_stack(false);
    let session = create_session(Arc::new(MockComm), token_table(), stack)
        .expect("session creation over the mock stack");
    (session, harness)
}
