//! Subscriber capability and identities.
//!
//! A subscriber is anything that wants to hear from an [`Observable`]. The
//! observable never owns it; it only keeps a weak reference inside the slot
//! it connects on the subscriber's behalf.
//!
//! [`Observable`]: super::Observable

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a subscriber.
///
/// Each [`Observer`](super::Observer) gets one when created. Observables key
/// their registry by it, which is what makes registration idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for an observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservableId(u64);

impl ObservableId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Receives notifications from observables.
///
/// `on_notify` runs synchronously on the notifying thread. When several
/// subscribers are registered with one observable, the order in which they
/// are called for a given notification is unspecified.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use beacon_core::observer::Subscriber;
///
/// struct Tally(AtomicU32);
///
/// impl Subscriber<u32> for Tally {
///     fn on_notify(&self, value: &u32) {
///         self.0.fetch_add(*value, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait Subscriber<A>: Send + Sync {
    /// Called once per notification the subscriber is registered for.
    fn on_notify(&self, args: &A);
}
