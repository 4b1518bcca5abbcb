//! Signal Implementation
//!
//! A Signal broadcasts a value to every connected slot. It is the lowest
//! layer of the crate: it knows nothing about observers, only about slots
//! and the connections that keep them alive.
//!
//! # How Signals Work
//!
//! 1. `connect` wraps a slot in a [`Connection`] and keeps only a weak
//!    reference to it.
//!
//! 2. `emit` resolves every weak reference. Live slots are invoked with the
//!    arguments; dead ones are pruned.
//!
//! 3. `disconnect` removes a slot eagerly, matching on the connection id.
//!
//! # Thread Safety
//!
//! The slot list is protected by a single mutex. Emission takes a snapshot
//! of the live slots under the lock and invokes them after releasing it, so
//! a slot may connect, disconnect or emit on the same signal. Changes made
//! while an emission is in flight apply to the next emission: a slot
//! connected during an emission is not invoked by it, and a slot
//! disconnected during an emission may still receive it.
//!
//! # Ordering
//!
//! Slots are invoked in the order of the internal slot list. That order
//! shifts when slots are disconnected and is not part of the contract.

use std::fmt::Debug;
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::trace;

use super::connection::{Connection, ConnectionId, SlotCell};

/// Snapshot of the slots taken by a single emission.
type Snapshot<A> = SmallVec<[Arc<SlotCell<A>>; 8]>;

/// A broadcast primitive over arguments of type `A`.
///
/// Use a tuple for `A` to broadcast several values at once.
///
/// # Example
///
/// ```rust
/// use beacon_core::signal::Signal;
///
/// let signal = Signal::<(u32, &'static str)>::new();
/// let conn = signal.connect(|(code, msg)| println!("{code}: {msg}"));
///
/// assert_eq!(signal.emit((200, "ok")), 1);
///
/// drop(conn);
/// assert_eq!(signal.emit((500, "unheard")), 0);
/// ```
pub struct Signal<A> {
    /// Weak references to connected slots, keyed by connection id.
    slots: Mutex<IndexMap<ConnectionId, Weak<SlotCell<A>>>>,
}

impl<A> Signal<A> {
    /// Create a signal with no slots.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a signal with room for `capacity` slots before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    /// Connect a slot.
    ///
    /// The returned connection is the only strong reference to the slot.
    /// Dropping it (and every clone of it) disconnects the slot.
    pub fn connect<F>(&self, slot: F) -> Connection<A>
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.connect_reporting(move |args| {
            slot(args);
            true
        })
    }

    /// Connect a slot that reports whether it delivered the arguments.
    ///
    /// Emission counts only the invocations that return `true`.
    pub(crate) fn connect_reporting<F>(&self, slot: F) -> Connection<A>
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        let cell = Arc::new(SlotCell::new(Box::new(slot)));
        self.slots.lock().insert(cell.id, Arc::downgrade(&cell));
        trace!(connection = cell.id.raw(), "slot connected");

        Connection { cell }
    }

    /// Disconnect a slot.
    ///
    /// Does nothing if the slot was already removed or was never connected
    /// to this signal.
    pub fn disconnect(&self, connection: &Connection<A>) {
        let removed = self.slots.lock().swap_remove(&connection.id()).is_some();
        trace!(connection = connection.id().raw(), removed, "slot disconnect");
    }

    /// Emit `args` to every live slot.
    ///
    /// Returns the number of slots that delivered the arguments. Slots whose
    /// connection has been dropped are pruned.
    pub fn emit(&self, args: A) -> usize {
        let live = self.snapshot();
        live.iter().filter(|cell| cell.invoke(&args)).count()
    }

    /// Number of slots that are still reachable.
    pub fn slot_count(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Whether no reachable slot is connected.
    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }

    /// Resolve every slot, dropping the dead ones from the list.
    fn snapshot(&self) -> Snapshot<A> {
        let mut slots = self.slots.lock();
        let before = slots.len();
        let mut live = Snapshot::new();

        slots.retain(|_, weak| match weak.upgrade() {
            Some(cell) => {
                live.push(cell);
                true
            }
            None => false,
        });

        let pruned = before - slots.len();
        if pruned > 0 {
            trace!(pruned, remaining = slots.len(), "pruned expired slots");
        }

        live
    }
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Debug for Signal<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slot_count", &self.slot_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
