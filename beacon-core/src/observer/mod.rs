//! Observers and Observables
//!
//! This module layers identity and lifetime management on top of
//! [`Signal`](crate::signal::Signal).
//!
//! # Concepts
//!
//! ## Observables
//!
//! An [`Observable`] owns a signal and a registry mapping each subscriber to
//! its connection. It holds the only strong handle to each connection, so
//! removing a registry entry is enough to cut the subscriber off.
//!
//! ## Observers
//!
//! An [`Observer`] wraps a value implementing [`Subscriber`] and records
//! which observables it has registered with. When the observer is dropped
//! it unregisters from every observable that is still alive.
//!
//! ## Publishers
//!
//! [`Publisher`] is implemented by anything that exposes an observable.
//! Observers register with publishers, which lets wrapper types be observed
//! without exposing their inner observable.
//!
//! # Back-references
//!
//! Neither side keeps the other alive. Slots hold a weak reference to the
//! subscriber and observers hold weak references to observables, so either
//! side may be dropped first.

mod subscriber;
mod observable;
#[allow(clippy::module_inception)]
mod observer;

pub use subscriber::{ObservableId, Subscriber, SubscriberId};
pub use observable::{Observable, Publisher};
pub use observer::Observer;
