//! Fixed-capacity pool of logical modem sockets.
//!
//! The pool is a slot array owned by the session. Callers hold opaque
//! [`SocketHandle`]s compared by identity, never slot indices, so a handle
//! stays valid across unrelated pool mutation. The pool mutex is held only
//! for bounded slot scans; no collaborator is ever called while it is locked.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, warn};

use crate::config::SOCKET_MAX;
use crate::error::{Error, Result};
use crate::types::{SocketDomain, SocketProtocol, SocketState, SocketType};

/// One logical network socket bound to a PDN context.
#[derive(Debug)]
pub struct SocketRecord {
    socket_id: u8,
    pdn_context_id: u8,
    domain: SocketDomain,
    socket_type: SocketType,
    protocol: SocketProtocol,
    state: Mutex<SocketState>,
}

/// Opaque reference to a pooled socket record.
pub type SocketHandle = Arc<SocketRecord>;

impl SocketRecord {
    /// Slot index, stable for the record's lifetime.
    pub fn socket_id(&self) -> u8 {
        self.socket_id
    }

    /// Owning PDN context id.
    pub fn pdn_context_id(&self) -> u8 {
        self.pdn_context_id
    }

    /// Address family.
    pub fn domain(&self) -> SocketDomain {
        self.domain
    }

    /// Communication style.
    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    /// Transport protocol.
    pub fn protocol(&self) -> SocketProtocol {
        self.protocol
    }

    /// Current connection state.
    pub fn state(&self) -> SocketState {
        *self.state.lock()
    }

    /// Updates the connection state. Driven by the data path as connect and
    /// close operations progress.
    pub fn set_state(&self, state: SocketState) {
        *self.state.lock() = state;
    }
}

pub(crate) struct SocketPool {
    slots: Mutex<[Option<SocketHandle>; SOCKET_MAX]>,
}

impl SocketPool {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    /// Linear scan for the first free slot. A full pool reports `NoMemory`.
    pub(crate) fn allocate(
        &self,
        pdn_context_id: u8,
        domain: SocketDomain,
        socket_type: SocketType,
        protocol: SocketProtocol,
    ) -> Result<SocketHandle> {
        let mut slots = self.slots.lock();

        for (socket_id, slot) in slots.iter_mut().enumerate() {
            if slot.is_none() {
                let record = Arc::new(SocketRecord {
                    socket_id: socket_id as u8,
                    pdn_context_id,
                    domain,
                    socket_type,
                    protocol,
                    state: Mutex::new(SocketState::Allocated),
                });
                *slot = Some(Arc::clone(&record));
                return Ok(record);
            }
        }

        error!("socket allocation failed, no free socket slots");
        Err(Error::NoMemory)
    }

    /// Removes a record from the pool. Removal of a `Connecting` socket is
    /// permitted; the caller is responsible for quiescing the in-flight
    /// operation in the lower layers.
    pub(crate) fn free(&self, handle: &SocketHandle) -> Result<()> {
        if handle.state() == SocketState::Connecting {
            warn!(
                "freeing socket {} while it is in connecting state",
                handle.socket_id
            );
        }

        let mut slots = self.slots.lock();

        for slot in slots.iter_mut() {
            if slot.as_ref().is_some_and(|record| Arc::ptr_eq(record, handle)) {
                *slot = None;
                return Ok(());
            }
        }

        Err(Error::BadParameter)
    }

    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        let slots = self.slots.lock();

        match slots.get(index) {
            Some(Some(_)) => Ok(()),
            _ => {
                error!("invalid socket index {}", index);
                Err(Error::BadParameter)
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<SocketHandle> {
        let slots = self.slots.lock();

        match slots.get(index) {
            Some(Some(record)) => Some(Arc::clone(record)),
            _ => {
                error!("no socket record at index {}", index);
                None
            }
        }
    }

    /// Drains every slot. Used by session close.
    pub(crate) fn clear(&self) {
        for slot in self.slots.lock().iter_mut() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocate(pool: &SocketPool) -> Result<SocketHandle> {
        pool.allocate(
            1,
            SocketDomain::Ipv4,
            SocketType::Stream,
            SocketProtocol::Tcp,
        )
    }

    #[test]
    fn pool_hands_out_distinct_slots_then_fails_with_no_memory() {
        let pool = SocketPool::new();
        let mut handles = Vec::new();

        for expected_id in 0..SOCKET_MAX {
            let handle = allocate(&pool).unwrap();
            assert_eq!(handle.socket_id() as usize, expected_id);
            assert_eq!(handle.state(), SocketState::Allocated);
            handles.push(handle);
        }

        assert_eq!(allocate(&pool).map(|_| ()), Err(Error::NoMemory));
    }

    #[test]
    fn freed_slot_is_reused_by_the_next_allocation() {
        let pool = SocketPool::new();
        let first = allocate(&pool).unwrap();
        let _second = allocate(&pool).unwrap();

        pool.free(&first).unwrap();
        let reused = allocate(&pool).unwrap();
        assert_eq!(reused.socket_id(), 0);
    }

    #[test]
    fn double_free_reports_bad_parameter_and_leaves_the_pool_unchanged() {
        let pool = SocketPool::new();
        let handle = allocate(&pool).unwrap();
        let other = allocate(&pool).unwrap();

        assert_eq!(pool.free(&handle), Ok(()));
        assert_eq!(pool.free(&handle), Err(Error::BadParameter));
        assert_eq!(pool.validate(other.socket_id() as usize), Ok(()));
    }

    #[test]
    fn freeing_a_connecting_socket_is_permitted() {
        let pool = SocketPool::new();
        let handle = allocate(&pool).unwrap();
        handle.set_state(SocketState::Connecting);

        assert_eq!(pool.free(&handle), Ok(()));
    }

    #[test]
    fn validate_and_get_bounds_check() {
        let pool = SocketPool::new();
        let handle = allocate(&pool).unwrap();

        assert_eq!(pool.validate(0), Ok(()));
        assert_eq!(pool.validate(1), Err(Error::BadParameter));
        assert_eq!(pool.validate(SOCKET_MAX), Err(Error::BadParameter));

        assert!(Arc::ptr_eq(&pool.get(0).unwrap(), &handle));
        assert!(pool.get(SOCKET_MAX + 7).is_none());
    }

    #[test]
    fn clear_drains_every_slot() {
        let pool = SocketPool::new();
        for _ in 0..SOCKET_MAX {
            allocate(&pool).unwrap();
        }

        pool.clear();
        let fresh = allocate(&pool).unwrap();
        assert_eq!(fresh.socket_id(), 0);
    }
}
