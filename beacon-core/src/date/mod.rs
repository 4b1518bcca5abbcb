//! Calendar Dates
//!
//! A small date value type used as the payload of observable values.
//!
//! - [`Date`] validates on construction and never holds an impossible day.
//! - [`Years`], [`Months`] and [`Days`] shift dates. Year and month shifts
//!   clamp the day of month, so January 31 plus one month is the last day
//!   of February.
//! - Ordering and equality go through the serial number (days since
//!   1970-01-01).

#[allow(clippy::module_inception)]
mod date;
mod duration;
mod error;

pub use date::Date;
pub use duration::{CalendarDuration, Days, Months, Years};
pub use error::{DateError, Result};
