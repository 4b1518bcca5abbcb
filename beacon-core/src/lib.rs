//! Beacon Core
//!
//! This crate provides thread-safe publish/subscribe primitives:
//!
//! - Signals that broadcast to weakly-held callback slots
//! - Observables and observers with identity-based registration
//! - Automatic unsubscription when an observer is dropped
//! - Observable values and a calendar date type to put in them
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `signal`: slots, connections and synchronous emission
//! - `observer`: observables, observers and the subscriber capability
//! - `value`: a lock-protected value that notifies on every `set`
//! - `date`: a validated calendar date with clamping arithmetic
//!
//! # Example
//!
//! ```rust
//! use beacon_core::date::{Date, Years};
//! use beacon_core::observer::{Observer, Subscriber};
//! use beacon_core::value::ObservableValue;
//!
//! struct Printer;
//!
//! impl Subscriber<Date> for Printer {
//!     fn on_notify(&self, date: &Date) {
//!         println!("Date updated to: {date}");
//!     }
//! }
//!
//! let date = ObservableValue::new(Date::new(2023, 1, 1)?);
//! let printer = Observer::new(Printer);
//! printer.register_with(&date);
//!
//! // Prints: "Date updated to: 2024-01-01"
//! date.set(date.get() + Years(1));
//! # Ok::<(), beacon_core::date::DateError>(())
//! ```

pub mod signal;
pub mod observer;
pub mod value;
pub mod date;

pub use date::{Date, DateError};
pub use observer::{Observable, Observer, Publisher, Subscriber};
pub use signal::{Connection, Signal};
pub use value::ObservableValue;
