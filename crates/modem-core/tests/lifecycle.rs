//! Session lifecycle integration tests.
//!
//! The session registry is process-wide with capacity
//! [`rmodem_core::config::SESSION_MAX`], so every test here is serialized
//! and destroys what it creates.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serial_test::serial;

use common::{create_mock_session, mock_stack, token_table, MockComm};
use rmodem_core::config::{DEFAULT_COMMAND_TIMEOUT, SOCKET_MAX};
use rmodem_core::prelude::*;

#[test]
#[serial]
fn create_then_destroy_round_trip() {
    let (session, _harness) = create_mock_session();

    assert_eq!(session.check_usable(), Ok(()));
    assert_eq!(destroy_session(&session), Ok(()));
    assert_eq!(destroy_session(&session), Err(Error::InvalidHandle));
}

#[test]
#[serial]
fn create_rejects_a_token_table_without_markers() {
    let (stack, _harness) = mock_stack(false);
    let mut table = token_table();
    table.success_tokens.clear();

    let result = create_session(Arc::new(MockComm), table, stack);
    assert!(matches!(result, Err(Error::BadParameter)));

    // The registry slot stayed free: the same slot accepts a new session.
    let (session, _harness) = create_mock_session();
    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn registry_capacity_is_enforced() {
    let (session, _harness) = create_mock_session();

    let (stack, _second) = mock_stack(false);
    let result = create_session(Arc::new(MockComm), token_table(), stack);
    assert!(matches!(result, Err(Error::NoMemory)));

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn failed_packet_io_init_unwinds_in_order_and_frees_the_slot() {
    let (stack, harness) = mock_stack(true);

    let result = create_session(Arc::new(MockComm), token_table(), stack);
    assert!(matches!(result, Err(Error::InternalFailure)));
    assert_eq!(
        *harness.log.lock(),
        vec![
            "pkthandler_init",
            "pktio_init",
            "pktio_shutdown",
            "pkthandler_cleanup"
        ]
    );

    let (session, _harness) = create_mock_session();
    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn shutdown_signal_flips_check_usable_to_internal_failure() {
    let (session, harness) = create_mock_session();
    assert_eq!(session.check_usable(), Ok(()));

    let notifier = harness
        .packet_io
        .notifier
        .lock()
        .clone()
        .expect("packet i/o received the shutdown notifier at open");
    notifier.signal();

    // The session is still open; only the shutdown flag changed.
    assert_eq!(session.check_usable(), Err(Error::InternalFailure));

    session.close();
    assert_eq!(session.check_usable(), Err(Error::LibraryNotOpen));

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn close_shuts_down_collaborators_and_is_idempotent() {
    let (session, harness) = create_mock_session();
    harness.log.lock().clear();

    session.close();
    assert_eq!(*harness.log.lock(), vec!["pktio_shutdown", "pkthandler_cleanup"]);

    // A second close finds the session no longer opened and skips the
    // collaborator teardown.
    session.close();
    assert_eq!(*harness.log.lock(), vec!["pktio_shutdown", "pkthandler_cleanup"]);

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn close_drains_the_socket_pool() {
    let (session, _harness) = create_mock_session();

    for _ in 0..SOCKET_MAX {
        session
            .allocate_socket(1, SocketDomain::Ipv4, SocketType::Stream, SocketProtocol::Tcp)
            .unwrap();
    }

    session.close();

    // Every slot was released; allocation starts over at slot zero.
    let handle = session
        .allocate_socket(1, SocketDomain::Ipv4, SocketType::Stream, SocketProtocol::Tcp)
        .unwrap();
    assert_eq!(handle.socket_id(), 0);

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn socket_operations_go_through_the_session() {
    let (session, _harness) = create_mock_session();

    let handle = session
        .allocate_socket(2, SocketDomain::Ipv6, SocketType::Datagram, SocketProtocol::Udp)
        .unwrap();
    assert_eq!(handle.pdn_context_id(), 2);
    assert_eq!(session.validate_socket(0), Ok(()));
    assert!(Arc::ptr_eq(&session.get_socket(0).unwrap(), &handle));

    assert_eq!(session.free_socket(&handle), Ok(()));
    assert_eq!(session.free_socket(&handle), Err(Error::BadParameter));
    assert_eq!(session.validate_socket(0), Err(Error::BadParameter));

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn current_rat_is_gated_by_check_usable() {
    let (session, _harness) = create_mock_session();

    assert_eq!(session.current_rat(), Ok(Rat::Invalid));
    session.set_current_rat(Rat::CatM1);
    assert_eq!(session.current_rat(), Ok(Rat::CatM1));

    session.close();
    assert_eq!(session.current_rat(), Err(Error::LibraryNotOpen));

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn submit_forwards_default_and_explicit_timeouts() {
    let (session, harness) = create_mock_session();

    let request = CommandRequest::new("AT+CFUN=1");
    assert_eq!(session.submit_request(&request), PacketStatus::Ok);

    let request = CommandRequest::with_prefix("AT+CSQ", "+CSQ");
    assert_eq!(
        session.submit_request_with_timeout(&request, Duration::from_millis(1234)),
        PacketStatus::Ok
    );

    let submitted = harness.packet_handler.submitted.lock();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0], ("AT+CFUN=1".to_string(), DEFAULT_COMMAND_TIMEOUT));
    assert_eq!(
        submitted[1],
        ("AT+CSQ".to_string(), Duration::from_millis(1234))
    );
    drop(submitted);

    assert_eq!(destroy_session(&session), Ok(()));
}

#[test]
#[serial]
fn module_state_round_trips_through_the_session() {
    let (session, _harness) = create_mock_session();

    session.set_module_state(Arc::new(42u32));
    let state = session.module_state().unwrap();
    assert_eq!(state.downcast_ref::<u32>(), Some(&42));

    assert_eq!(destroy_session(&session), Ok(()));
}
