//! Calendar arithmetic shared by ages, contribution spans and the career simulator

use chrono::{Datelike, Local, Months, NaiveDate};

/// Whole years elapsed between two dates
///
/// A year only counts once the anniversary (month and day) has been reached,
/// so 2018-01-15 -> 2021-01-14 is 2 years and 2018-01-15 -> 2021-01-15 is 3.
/// Returns a negative count when `to` precedes `from`.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if to >= from {
        if (to.month(), to.day()) < (from.month(), from.day()) {
            years -= 1;
        }
    } else if (to.month(), to.day()) > (from.month(), from.day()) {
        years += 1;
    }
    years
}

/// Add calendar months, clamping the day to the end of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Add calendar years
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_years_anniversary() {
        assert_eq!(whole_years_between(ymd(2018, 1, 15), ymd(2021, 1, 14)), 2);
        assert_eq!(whole_years_between(ymd(2018, 1, 15), ymd(2021, 1, 15)), 3);
        assert_eq!(whole_years_between(ymd(2018, 1, 1), ymd(2018, 12, 31)), 0);
        assert_eq!(whole_years_between(ymd(1970, 1, 1), ymd(2024, 6, 30)), 54);
    }

    #[test]
    fn test_whole_years_reversed() {
        assert_eq!(whole_years_between(ymd(2021, 1, 15), ymd(2018, 1, 15)), -3);
        assert_eq!(whole_years_between(ymd(2021, 1, 15), ymd(2018, 6, 1)), -2);
    }

    #[test]
    fn test_add_years_and_months() {
        assert_eq!(add_years(ymd(1980, 2, 28), 18), Some(ymd(1998, 2, 28)));
        assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2024, 11, 10), 2), Some(ymd(2025, 1, 10)));
    }
}
