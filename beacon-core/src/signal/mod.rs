//! Signals and Connections
//!
//! This module implements the broadcast layer that the observer types are
//! built on.
//!
//! # Concepts
//!
//! ## Slots
//!
//! A slot is a callback that receives a reference to the emitted arguments.
//! Slots must be `Send + Sync` because emission may happen on any thread.
//!
//! ## Connections
//!
//! Connecting a slot returns a [`Connection`], a reference-counted handle.
//! The signal never owns slots: it holds weak references and forgets a slot
//! once the last handle to it is dropped.
//!
//! ## Emission
//!
//! `emit` is synchronous and runs on the caller's thread. Every slot that is
//! reachable when the emission starts is invoked exactly once.

mod connection;
#[allow(clippy::module_inception)]
mod signal;

pub use connection::{Connection, ConnectionId};
pub use signal::Signal;
