//! Calendar helpers for ages, birthdays, and the Christmas window.

use chrono::{Datelike, NaiveDate};

/// Age in whole years, adjusted down if the birthday has not yet occurred
/// this year.
pub fn age_from_dob(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Days until the next December 25, counting from `today` (0 on the day).
pub fn days_until_christmas(today: NaiveDate) -> i64 {
    let christmas = NaiveDate::from_ymd_opt(today.year(), 12, 25).unwrap_or(today);
    if christmas >= today {
        (christmas - today).num_days()
    } else {
        let next = NaiveDate::from_ymd_opt(today.year() + 1, 12, 25).unwrap_or(today);
        (next - today).num_days()
    }
}

/// The next occurrence of the giftee's birthday on or after `today`.
/// A February 29 birthday falls on February 28 in non-leap years.
pub fn next_birthday(dob: NaiveDate, today: NaiveDate) -> NaiveDate {
    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, dob.month(), dob.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or(today)
    };

    let this_year = in_year(today.year());
    if this_year >= today {
        this_year
    } else {
        in_year(today.year() + 1)
    }
}

/// Whether the giftee's birthday falls within the next `days` days
/// (inclusive of today).
pub fn birthday_within(dob: NaiveDate, today: NaiveDate, days: i64) -> bool {
    (next_birthday(dob, today) - today).num_days() <= days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = d(1990, 6, 15);
        assert_eq!(age_from_dob(dob, d(2025, 6, 14)), 34);
        assert_eq!(age_from_dob(dob, d(2025, 6, 15)), 35);
        assert_eq!(age_from_dob(dob, d(2025, 6, 16)), 35);
    }

    #[test]
    fn test_days_until_christmas_wraps() {
        assert_eq!(days_until_christmas(d(2025, 12, 25)), 0);
        assert_eq!(days_until_christmas(d(2025, 12, 24)), 1);
        // Dec 26 counts toward next year's Christmas
        assert_eq!(days_until_christmas(d(2025, 12, 26)), 364);
    }

    #[test]
    fn test_next_birthday_year_boundary() {
        let dob = d(1990, 1, 10);
        assert_eq!(next_birthday(dob, d(2025, 12, 20)), d(2026, 1, 10));
        assert_eq!(next_birthday(dob, d(2025, 1, 10)), d(2025, 1, 10));
    }

    #[test]
    fn test_birthday_within_window() {
        let dob = d(1990, 7, 1);
        assert!(birthday_within(dob, d(2025, 6, 20), 30));
        assert!(!birthday_within(dob, d(2025, 5, 1), 30));
        // window spanning new year
        let jan = d(1990, 1, 3);
        assert!(birthday_within(jan, d(2025, 12, 28), 14));
    }

    #[test]
    fn test_leap_day_birthday() {
        let dob = d(1992, 2, 29);
        assert_eq!(next_birthday(dob, d(2025, 2, 1)), d(2025, 2, 28));
        assert_eq!(next_birthday(dob, d(2024, 2, 1)), d(2024, 2, 29));
    }
}
