//! Calendar arithmetic used by the expander and the month grid.
//!
//! Weekdays are numbered Sunday = 0 .. Saturday = 6 wherever a number is
//! exposed (rule files, CLI flags, grid offsets).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekdays in Sunday-first order, indexed by their number.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Weekday for a Sunday-based index (0 = Sunday).
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEKDAYS.get(usize::from(index)).copied()
}

/// Sunday-based index of a weekday (0 = Sunday).
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    weekday.num_days_from_sunday() as u8
}

/// Parse a weekday from either its Sunday-based number ("1") or its name ("mon", "Monday").
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let s = s.trim();
    match s.parse::<u8>() {
        Ok(index) => weekday_from_index(index),
        Err(_) => Weekday::from_str(s).ok(),
    }
}

/// Number of days in the given month, or None if the month is out of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// First day of the month `months` months after the month containing `date`.
pub fn first_of_month_after(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(months))
}

/// January 1st of the year `years` years after the year containing `date`.
pub fn first_of_year_after(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = date.year().checked_add(i32::try_from(years).ok()?)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Date `years` calendar years after `date`, saturating at the largest
/// representable date.
pub fn years_after(date: NaiveDate, years: u32) -> NaiveDate {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .unwrap_or(NaiveDate::MAX)
}

/// Ordinal position of a weekday within a month ("second Tuesday", "last Friday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum WeekdayOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekdayOrdinal {
    /// Numbering used in rule files: 1..=4, or -1 for the last occurrence.
    pub fn from_index(index: i8) -> Option<Self> {
        match index {
            1 => Some(WeekdayOrdinal::First),
            2 => Some(WeekdayOrdinal::Second),
            3 => Some(WeekdayOrdinal::Third),
            4 => Some(WeekdayOrdinal::Fourth),
            -1 => Some(WeekdayOrdinal::Last),
            _ => None,
        }
    }

    pub fn index(self) -> i8 {
        match self {
            WeekdayOrdinal::First => 1,
            WeekdayOrdinal::Second => 2,
            WeekdayOrdinal::Third => 3,
            WeekdayOrdinal::Fourth => 4,
            WeekdayOrdinal::Last => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekdayOrdinal::First => "first",
            WeekdayOrdinal::Second => "second",
            WeekdayOrdinal::Third => "third",
            WeekdayOrdinal::Fourth => "fourth",
            WeekdayOrdinal::Last => "last",
        }
    }
}

impl TryFrom<i8> for WeekdayOrdinal {
    type Error = String;

    fn try_from(index: i8) -> Result<Self, Self::Error> {
        WeekdayOrdinal::from_index(index)
            .ok_or_else(|| format!("invalid weekday ordinal {index}, expected 1-4 or -1"))
    }
}

impl From<WeekdayOrdinal> for i8 {
    fn from(ordinal: WeekdayOrdinal) -> Self {
        ordinal.index()
    }
}

impl FromStr for WeekdayOrdinal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(index) = s.parse::<i8>() {
            return WeekdayOrdinal::try_from(index);
        }
        match s.as_str() {
            "first" | "1st" => Ok(WeekdayOrdinal::First),
            "second" | "2nd" => Ok(WeekdayOrdinal::Second),
            "third" | "3rd" => Ok(WeekdayOrdinal::Third),
            "fourth" | "4th" => Ok(WeekdayOrdinal::Fourth),
            "last" => Ok(WeekdayOrdinal::Last),
            _ => Err(format!(
                "invalid weekday ordinal '{s}', expected first, second, third, fourth or last"
            )),
        }
    }
}

impl fmt::Display for WeekdayOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `date` is the `ordinal`-th `weekday` of its month.
///
/// The n-th occurrence of a weekday always falls on days 7(n-1)+1 ..= 7n,
/// and the last one is the one with no same weekday a week later in the month.
pub fn is_nth_weekday(date: NaiveDate, weekday: Weekday, ordinal: WeekdayOrdinal) -> bool {
    if date.weekday() != weekday {
        return false;
    }

    match ordinal {
        WeekdayOrdinal::Last => date
            .checked_add_days(Days::new(7))
            .is_none_or(|next| next.month() != date.month()),
        other => {
            let position = (date.day() - 1) / 7 + 1;
            i8::try_from(position).is_ok_and(|p| p == other.index())
        }
    }
}

/// Short English name, e.g. "Mon".
pub fn weekday_short_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    NAMES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_numbering_starts_on_sunday() {
        assert_eq!(weekday_from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_index(7), None);
        assert_eq!(weekday_index(Weekday::Mon), 1);
    }

    #[test]
    fn parse_weekday_accepts_numbers_and_names() {
        assert_eq!(parse_weekday("3"), Some(Weekday::Wed));
        assert_eq!(parse_weekday("mon"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Friday"), Some(Weekday::Fri));
        assert_eq!(parse_weekday("9"), None);
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn month_advance_lands_on_first_day() {
        assert_eq!(first_of_month_after(date(2023, 1, 31), 1), Some(date(2023, 2, 1)));
        assert_eq!(first_of_month_after(date(2023, 11, 15), 3), Some(date(2024, 2, 1)));
        assert_eq!(first_of_year_after(date(2024, 2, 29), 1), Some(date(2025, 1, 1)));
    }

    #[test]
    fn years_after_saturates() {
        assert_eq!(years_after(date(2023, 5, 1), 100), date(2123, 5, 1));
        assert_eq!(years_after(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn nth_weekday_positions() {
        // January 2023: Mondays on 2, 9, 16, 23, 30
        assert!(is_nth_weekday(date(2023, 1, 2), Weekday::Mon, WeekdayOrdinal::First));
        assert!(is_nth_weekday(date(2023, 1, 9), Weekday::Mon, WeekdayOrdinal::Second));
        assert!(is_nth_weekday(date(2023, 1, 23), Weekday::Mon, WeekdayOrdinal::Fourth));
        assert!(is_nth_weekday(date(2023, 1, 30), Weekday::Mon, WeekdayOrdinal::Last));
        assert!(!is_nth_weekday(date(2023, 1, 23), Weekday::Mon, WeekdayOrdinal::Last));
        assert!(!is_nth_weekday(date(2023, 1, 9), Weekday::Mon, WeekdayOrdinal::First));
        assert!(!is_nth_weekday(date(2023, 1, 10), Weekday::Mon, WeekdayOrdinal::Second));
    }

    #[test]
    fn fourth_can_also_be_last() {
        // February 2023: Mondays on 6, 13, 20, 27
        assert!(is_nth_weekday(date(2023, 2, 27), Weekday::Mon, WeekdayOrdinal::Fourth));
        assert!(is_nth_weekday(date(2023, 2, 27), Weekday::Mon, WeekdayOrdinal::Last));
    }

    #[test]
    fn ordinal_parsing() {
        assert_eq!("last".parse::<WeekdayOrdinal>(), Ok(WeekdayOrdinal::Last));
        assert_eq!("-1".parse::<WeekdayOrdinal>(), Ok(WeekdayOrdinal::Last));
        assert_eq!("2".parse::<WeekdayOrdinal>(), Ok(WeekdayOrdinal::Second));
        assert_eq!("Third".parse::<WeekdayOrdinal>(), Ok(WeekdayOrdinal::Third));
        assert!("5".parse::<WeekdayOrdinal>().is_err());
        assert!("0".parse::<WeekdayOrdinal>().is_err());
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
