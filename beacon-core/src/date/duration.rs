//! Calendar durations.
//!
//! Durations are plain signed counts. Years and months are calendar units:
//! their length depends on the date they are applied to.

use std::ops::Neg;

use chrono::NaiveDate;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Years {}
    impl Sealed for super::Months {}
    impl Sealed for super::Days {}
}

/// A span that can be added to or subtracted from a [`Date`](super::Date).
///
/// Implemented for [`Years`], [`Months`] and [`Days`] only.
pub trait CalendarDuration: Copy + Neg<Output = Self> + sealed::Sealed {
    /// Shift `date` forward by this span (backward if negative).
    ///
    /// Year and month shifts clamp the day to the last day of the target
    /// month. Returns `None` when the result is out of range.
    #[doc(hidden)]
    fn shift(self, date: NaiveDate) -> Option<NaiveDate>;
}

/// A number of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Years(pub i32);

/// A number of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Months(pub i32);

/// A number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Days(pub i64);

impl Years {
    /// The same span expressed in months.
    pub fn as_months(self) -> Months {
        Months(self.0.saturating_mul(12))
    }
}

impl From<Years> for Months {
    fn from(years: Years) -> Self {
        years.as_months()
    }
}

macro_rules! impl_neg {
    ($($ty:ident),*) => {
        $(
            impl Neg for $ty {
                type Output = Self;

                fn neg(self) -> Self {
                    Self(self.0.saturating_neg())
                }
            }
        )*
    };
}

impl_neg!(Years, Months, Days);

impl CalendarDuration for Years {
    fn shift(self, date: NaiveDate) -> Option<NaiveDate> {
        self.as_months().shift(date)
    }
}

impl CalendarDuration for Months {
    fn shift(self, date: NaiveDate) -> Option<NaiveDate> {
        let span = chrono::Months::new(self.0.unsigned_abs());
        if self.0 >= 0 {
            date.checked_add_months(span)
        } else {
            date.checked_sub_months(span)
        }
    }
}

impl CalendarDuration for Days {
    fn shift(self, date: NaiveDate) -> Option<NaiveDate> {
        let span = chrono::Days::new(self.0.unsigned_abs());
        if self.0 >= 0 {
            date.checked_add_days(span)
        } else {
            date.checked_sub_days(span)
        }
    }
}
