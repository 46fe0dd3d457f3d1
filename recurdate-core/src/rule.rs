//! Recurrence rules.
//!
//! A rule is an anchor date plus a cadence (`Repeat`) and an end condition.
//! Only the active cadence carries its own parameters, so a weekly rule has no
//! leftover monthly day and vice versa.

use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{
    self, WEEKDAYS, WeekdayOrdinal, month_name, weekday_index, weekday_short_name,
};
use crate::error::{RecurError, RecurResult};

fn default_interval() -> u32 {
    1
}

/// A recurrence rule: when it starts, how it repeats and when it stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Anchor date, inclusive
    pub start: NaiveDate,

    /// "Every N units"; always at least 1 for a valid rule
    #[serde(default = "default_interval")]
    pub interval: u32,

    #[serde(default)]
    pub end: EndCondition,

    #[serde(default)]
    pub repeat: Repeat,
}

/// When a rule stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    #[default]
    Never,
    /// Stop after this many occurrences
    After(u32),
    /// Stop after this date (inclusive)
    On(NaiveDate),
}

/// The cadence of a rule, with the parameters of that cadence only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Repeat {
    /// One-time, non-recurring
    #[default]
    None,
    Daily,
    Weekly {
        #[serde(default)]
        days: WeekdaySet,
    },
    Monthly {
        on: MonthlyPattern,
    },
    Yearly {
        /// 1-based month
        month: u32,
        day: u32,
    },
}

/// Which day of the month a monthly rule lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthlyPattern {
    /// e.g. "the last Monday"
    NthWeekday {
        nth: WeekdayOrdinal,
        #[serde(with = "weekday_repr")]
        weekday: Weekday,
    },
    /// e.g. "the 15th"
    DayOfMonth { day: u32 },
}

/// A set of weekdays, iterated Sunday first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        WeekdaySet(0)
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= 1 << weekday_index(weekday);
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday_index(weekday)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for weekday in iter {
            set.insert(weekday);
        }
        set
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_index))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<weekday_repr::WeekdayRepr>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|r| r.into_weekday().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Weekdays are written either as Sunday-based numbers or as names.
mod weekday_repr {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calendar::{parse_weekday, weekday_from_index, weekday_index};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum WeekdayRepr {
        Index(u8),
        Name(String),
    }

    impl WeekdayRepr {
        pub(super) fn into_weekday(self) -> Result<Weekday, String> {
            match self {
                WeekdayRepr::Index(i) => weekday_from_index(i)
                    .ok_or_else(|| format!("weekday {i} out of range, expected 0 (Sunday) to 6")),
                WeekdayRepr::Name(name) => {
                    parse_weekday(&name).ok_or_else(|| format!("unknown weekday '{name}'"))
                }
            }
        }
    }

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        WeekdayRepr::deserialize(deserializer)?
            .into_weekday()
            .map_err(serde::de::Error::custom)
    }
}

impl RecurrenceRule {
    /// A one-time, non-recurring selection.
    pub fn once(start: NaiveDate) -> Self {
        RecurrenceRule {
            start,
            interval: 1,
            end: EndCondition::Never,
            repeat: Repeat::None,
        }
    }

    pub fn new(start: NaiveDate, repeat: Repeat) -> Self {
        RecurrenceRule {
            repeat,
            ..RecurrenceRule::once(start)
        }
    }

    pub fn daily(start: NaiveDate) -> Self {
        RecurrenceRule::new(start, Repeat::Daily)
    }

    pub fn weekly(start: NaiveDate, days: impl IntoIterator<Item = Weekday>) -> Self {
        RecurrenceRule::new(
            start,
            Repeat::Weekly {
                days: days.into_iter().collect(),
            },
        )
    }

    pub fn monthly(start: NaiveDate, on: MonthlyPattern) -> Self {
        RecurrenceRule::new(start, Repeat::Monthly { on })
    }

    pub fn yearly(start: NaiveDate, month: u32, day: u32) -> Self {
        RecurrenceRule::new(start, Repeat::Yearly { month, day })
    }

    /// Repeat every `interval` units instead of every one.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn ending(mut self, end: EndCondition) -> Self {
        self.end = end;
        self
    }

    /// Caller-level validation. The expander never calls this and accepts
    /// anything, producing no matches for out-of-range values.
    pub fn validate(&self) -> RecurResult<()> {
        if self.interval == 0 {
            return Err(RecurError::InvalidRule("interval must be at least 1".into()));
        }

        match self.end {
            EndCondition::After(0) => {
                return Err(RecurError::InvalidRule(
                    "occurrence count must be at least 1".into(),
                ));
            }
            EndCondition::On(end) if self.start > end => {
                return Err(RecurError::InvalidRange {
                    start: self.start,
                    end,
                });
            }
            _ => {}
        }

        match &self.repeat {
            Repeat::Monthly {
                on: MonthlyPattern::DayOfMonth { day },
            } if !(1..=31).contains(day) => Err(RecurError::InvalidRule(format!(
                "day of month {day} out of range, expected 1-31"
            ))),
            Repeat::Yearly { month, .. } if !(1..=12).contains(month) => Err(
                RecurError::InvalidRule(format!("month {month} out of range, expected 1-12")),
            ),
            Repeat::Yearly { month, day } => {
                // Feb 29 is allowed; it simply recurs on leap years
                let max_day = calendar::days_in_month(2024, *month).unwrap_or(31);
                if (1..=max_day).contains(day) {
                    Ok(())
                } else {
                    Err(RecurError::InvalidRule(format!(
                        "day {day} does not exist in {}",
                        month_name(*month).unwrap_or("that month")
                    )))
                }
            }
            _ => Ok(()),
        }
    }

    /// Parse a rule from TOML.
    pub fn from_toml_str(contents: &str) -> RecurResult<Self> {
        toml::from_str(contents).map_err(|e| RecurError::RuleParse(e.to_string()))
    }

    /// Load a rule from a TOML file.
    pub fn load(path: &Path) -> RecurResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            RecurError::RuleParse(msg) => {
                RecurError::RuleParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn to_toml_string(&self) -> RecurResult<String> {
        toml::to_string(self).map_err(|e| RecurError::RuleParse(e.to_string()))
    }
}

/// Pluralized unit for "every N ..." descriptions.
fn unit(interval: u32, singular: &str) -> String {
    if interval == 1 {
        singular.to_string()
    } else {
        format!("{interval} {singular}s")
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// English summary, e.g. "Every 2 weeks on Mon, Wed from 2023-05-01, 5 times".
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repeat {
            Repeat::None => return write!(f, "Once on {}", self.start),
            Repeat::Daily => write!(f, "Every {}", unit(self.interval, "day"))?,
            Repeat::Weekly { days } => {
                write!(f, "Every {}", unit(self.interval, "week"))?;
                if days.is_empty() {
                    write!(f, " on no days")?;
                } else {
                    let names: Vec<_> = days.iter().map(weekday_short_name).collect();
                    write!(f, " on {}", names.join(", "))?;
                }
            }
            Repeat::Monthly { on } => {
                write!(f, "Every {}", unit(self.interval, "month"))?;
                match on {
                    MonthlyPattern::DayOfMonth { day } => {
                        write!(f, " on the {day}{}", ordinal_suffix(*day))?
                    }
                    MonthlyPattern::NthWeekday { nth, weekday } => {
                        write!(f, " on the {nth} {}", weekday_short_name(*weekday))?
                    }
                }
            }
            Repeat::Yearly { month, day } => {
                write!(f, "Every {}", unit(self.interval, "year"))?;
                write!(f, " on {} {day}", month_name(*month).unwrap_or("?"))?;
            }
        }

        write!(f, " from {}", self.start)?;

        match self.end {
            EndCondition::Never => Ok(()),
            EndCondition::After(1) => write!(f, ", once"),
            EndCondition::After(n) => write!(f, ", {n} times"),
            EndCondition::On(d) => write!(f, ", until {d}"),
        }
    }
}
