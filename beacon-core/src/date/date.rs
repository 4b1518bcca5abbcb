//! The Date value type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::duration::{CalendarDuration, Days, Months, Years};
use super::error::{DateError, Result};

/// Days from 0001-01-01 (day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const DEFAULT_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// A calendar date in the proleptic Gregorian calendar.
///
/// Dates are ordered by their serial number, the count of days since
/// 1970-01-01, which agrees with calendar order.
///
/// # Example
///
/// ```rust
/// use beacon_core::date::{Date, Months};
///
/// let end_of_january = Date::new(2024, 1, 31)?;
/// let next = end_of_january + Months(1);
///
/// // Clamped to the last day of February in a leap year
/// assert_eq!(next, Date::new(2024, 2, 29)?);
/// # Ok::<(), beacon_core::date::DateError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date from its components.
    ///
    /// Fails with [`DateError::Invalid`] if the day does not exist, such as
    /// February 29 in a common year.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::Invalid { year, month, day })
    }

    /// Build a date from its serial number.
    pub fn from_serial_number(serial: i64) -> Result<Self> {
        let days = serial
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(|days| i32::try_from(days).ok())
            .ok_or(DateError::OutOfRange)?;

        NaiveDate::from_num_days_from_ce_opt(days)
            .map(Self)
            .ok_or(DateError::OutOfRange)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, starting at 1.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, starting at 1.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Days since 1970-01-01. Negative for earlier dates.
    pub fn serial_number(&self) -> i64 {
        i64::from(self.0.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }

    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// The last day of this date's month.
    pub fn last_day_of_month(&self) -> u32 {
        u32::from(self.0.num_days_in_month())
    }

    /// Shift forward by `span`, clamping the day for year and month spans.
    pub fn checked_add<D: CalendarDuration>(self, span: D) -> Result<Self> {
        span.shift(self.0).map(Self).ok_or(DateError::OutOfRange)
    }

    /// Shift backward by `span`, clamping the day for year and month spans.
    pub fn checked_sub<D: CalendarDuration>(self, span: D) -> Result<Self> {
        self.checked_add(-span)
    }
}

impl Default for Date {
    /// 1900-01-01.
    fn default() -> Self {
        Self(DEFAULT_DATE)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serial_number().cmp(&other.serial_number())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.0)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<NaiveDate>()
            .map(Self)
            .map_err(|_| DateError::Parse { input: s.to_string() })
    }
}

// Operators panic when the result leaves the representable range, like
// integer overflow. Use `checked_add`/`checked_sub` to handle that case.
macro_rules! impl_date_arithmetic {
    ($($ty:ident),*) => {
        $(
            impl Add<$ty> for Date {
                type Output = Date;

                fn add(self, span: $ty) -> Date {
                    match self.checked_add(span) {
                        Ok(date) => date,
                        Err(err) => panic!("{err}: {self} + {span:?}"),
                    }
                }
            }

            impl Sub<$ty> for Date {
                type Output = Date;

                fn sub(self, span: $ty) -> Date {
                    match self.checked_sub(span) {
                        Ok(date) => date,
                        Err(err) => panic!("{err}: {self} - {span:?}"),
                    }
                }
            }

            impl AddAssign<$ty> for Date {
                fn add_assign(&mut self, span: $ty) {
                    *self = *self + span;
                }
            }

            impl SubAssign<$ty> for Date {
                fn sub_assign(&mut self, span: $ty) {
                    *self = *self - span;
                }
            }
        )*
    };
}

impl_date_arithmetic!(Years, Months, Days);
