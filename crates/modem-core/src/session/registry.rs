//! Process-wide fixed-capacity session registry.
//!
//! A slot is `Reserved` while its session is being constructed and opened,
//! so a concurrent caller never observes a partially initialized session:
//! the `Arc` is published only after every sub-resource succeeded, and any
//! failure releases the slot and drops the local value, which cascades
//! cleanup through ownership.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::error;

use crate::config::SESSION_MAX;
use crate::error::{Error, Result};
use crate::stack::SessionStack;
use crate::transport::{CommInterface, TokenTable};

use super::Session;

enum Slot {
    Free,
    Reserved,
    Active(Arc<Session>),
}

static REGISTRY: Mutex<[Slot; SESSION_MAX]> = Mutex::new([const { Slot::Free }; SESSION_MAX]);

fn reserve_slot() -> Result<usize> {
    let mut registry = REGISTRY.lock();

    for (index, slot) in registry.iter_mut().enumerate() {
        if matches!(slot, Slot::Free) {
            *slot = Slot::Reserved;
            return Ok(index);
        }
    }

    error!("session allocation failed, no free registry slots");
    Err(Error::NoMemory)
}

fn release_slot(index: usize) {
    REGISTRY.lock()[index] = Slot::Free;
}

/// Creates and opens the session.
///
/// Validates the token tables, claims a registry slot, builds the session
/// and runs its open sequence. On any failure nothing stays registered; on
/// success the returned handle is also reachable through the registry until
/// [`destroy_session`].
pub fn create_session(
    comm: Arc<dyn CommInterface>,
    token_table: TokenTable,
    stack: SessionStack,
) -> Result<Arc<Session>> {
    token_table.validate()?;

    let index = reserve_slot()?;
    let session = Arc::new(Session::new(comm, token_table, stack));

    match Session::open(&session) {
        Ok(()) => {
            REGISTRY.lock()[index] = Slot::Active(Arc::clone(&session));
            Ok(session)
        }
        Err(err) => {
            release_slot(index);
            Err(err)
        }
    }
}

/// Closes the session and frees its registry slot.
///
/// Reports `InvalidHandle` when the handle is not the registered session
/// (already destroyed, or never created through [`create_session`]).
pub fn destroy_session(session: &Arc<Session>) -> Result<()> {
    let index = {
        let registry = REGISTRY.lock();
        registry
            .iter()
            .position(|slot| matches!(slot, Slot::Active(active) if Arc::ptr_eq(active, session)))
    };

    let Some(index) = index else {
        return Err(Error::InvalidHandle);
    };

    session.close();

    let mut registry = REGISTRY.lock();
    if matches!(&registry[index], Slot::Active(active) if Arc::ptr_eq(active, session)) {
        registry[index] = Slot::Free;
    }

    Ok(())
}
