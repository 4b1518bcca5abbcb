//! Connection handles.
//!
//! A connection is the strong half of a slot subscription. The signal only
//! keeps a weak reference to the slot, so whoever holds the connection
//! decides how long the slot stays connected.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback type stored behind a connection.
///
/// Returns whether the arguments reached a receiver.
pub(crate) type Slot<A> = dyn Fn(&A) -> bool + Send + Sync;

/// Unique identifier for a connection.
///
/// Ids come from a process-wide counter, so two connections never compare
/// equal unless they are clones of the same handle, even across signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Shared state behind a connection: the id and the slot it guards.
pub(crate) struct SlotCell<A> {
    pub(crate) id: ConnectionId,
    slot: Box<Slot<A>>,
}

impl<A> SlotCell<A> {
    pub(crate) fn new(slot: Box<Slot<A>>) -> Self {
        Self {
            id: ConnectionId::next(),
            slot,
        }
    }

    pub(crate) fn invoke(&self, args: &A) -> bool {
        (self.slot)(args)
    }
}

/// Strong handle to a connected slot.
///
/// Cloning the handle shares ownership of the slot. Once every clone is
/// dropped the signal can no longer reach the slot and forgets it on its
/// next emission.
#[must_use = "dropping a Connection disconnects its slot"]
pub struct Connection<A> {
    pub(crate) cell: Arc<SlotCell<A>>,
}

impl<A> Connection<A> {
    /// Get the connection's unique ID.
    pub fn id(&self) -> ConnectionId {
        self.cell.id
    }

    /// Number of strong handles currently keeping this slot alive.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.cell)
    }
}

impl<A> Clone for Connection<A> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<A> PartialEq for Connection<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cell.id == other.cell.id
    }
}

impl<A> Eq for Connection<A> {}

impl<A> fmt::Debug for Connection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.cell.id)
            .field("holders", &self.holders())
            .finish()
    }
}
