//! Property-based invariant tests for `Date`.
//!
//! 1. Ordering by serial number agrees with (year, month, day) ordering
//! 2. Serial numbers round-trip through `from_serial_number`
//! 3. Adding then subtracting days is the identity
//! 4. Month shifts land in the expected month on a valid, clamped day
//! 5. Display output parses back to the same date

use beacon_core::date::{Date, Days, Months, Years};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = Date> {
    (1600i32..2400, 1u32..=12, 1u32..=31).prop_map(|(year, month, day)| {
        // Clamp instead of filtering so every case produces a date
        let first = Date::new(year, month, 1).unwrap();
        Date::new(year, month, day.min(first.last_day_of_month())).unwrap()
    })
}

proptest! {
    #[test]
    fn ordering_matches_components(a in any_date(), b in any_date()) {
        let by_components = (a.year(), a.month(), a.day()).cmp(&(b.year(), b.month(), b.day()));
        prop_assert_eq!(a.cmp(&b), by_components);
        prop_assert_eq!(a == b, a.serial_number() == b.serial_number());
    }

    #[test]
    fn serial_number_round_trips(date in any_date()) {
        prop_assert_eq!(Date::from_serial_number(date.serial_number()), Ok(date));
    }

    #[test]
    fn day_shift_is_invertible(date in any_date(), days in -100_000i64..100_000) {
        let shifted = date + Days(days);
        prop_assert_eq!(shifted.serial_number() - date.serial_number(), days);
        prop_assert_eq!(shifted - Days(days), date);
    }

    #[test]
    fn month_shift_clamps_into_target_month(date in any_date(), months in -1200i32..1200) {
        let shifted = date + Months(months);

        let index = i64::from(date.year()) * 12 + i64::from(date.month()) - 1 + i64::from(months);
        prop_assert_eq!(i64::from(shifted.year()), index.div_euclid(12));
        prop_assert_eq!(i64::from(shifted.month()), index.rem_euclid(12) + 1);
        prop_assert_eq!(shifted.day(), date.day().min(shifted.last_day_of_month()));
    }

    #[test]
    fn year_shift_equals_twelve_month_shift(date in any_date(), years in -100i32..100) {
        prop_assert_eq!(date + Years(years), date + Months(years * 12));
    }

    #[test]
    fn display_parses_back(date in any_date()) {
        prop_assert_eq!(date.to_string().parse::<Date>(), Ok(date));
    }
}
