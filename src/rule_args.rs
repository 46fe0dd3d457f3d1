//! Command-line flags that assemble a recurrence rule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::{Args, ValueEnum};
use recurdate_core::calendar::parse_weekday;
use recurdate_core::{EndCondition, MonthlyPattern, RecurrenceRule, Repeat, WeekdayOrdinal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatKind {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Args)]
pub struct RuleArgs {
    /// Read the rule from a TOML file instead of flags
    #[arg(long, value_name = "FILE", conflicts_with_all = [
        "start", "repeat", "every", "on_days", "day", "nth", "weekday", "month", "count", "until",
    ])]
    pub rule: Option<PathBuf>,

    /// Anchor date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub start: Option<NaiveDate>,

    /// How the date repeats
    #[arg(short, long, value_enum, default_value_t = RepeatKind::None)]
    pub repeat: RepeatKind,

    /// Repeat every N days/weeks/months/years
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub every: u32,

    /// Weekly: days of the week (e.g. "mon,wed" or "1,3" with Sunday = 0)
    #[arg(long = "on-days", value_delimiter = ',', value_parser = weekday_arg)]
    pub on_days: Vec<Weekday>,

    /// Monthly/yearly: day of the month
    #[arg(long)]
    pub day: Option<u32>,

    /// Monthly: which occurrence of --weekday (first, second, third, fourth, last)
    #[arg(long, allow_hyphen_values = true)]
    pub nth: Option<WeekdayOrdinal>,

    /// Monthly: weekday used with --nth
    #[arg(long, value_parser = weekday_arg)]
    pub weekday: Option<Weekday>,

    /// Yearly: month (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// End after this many occurrences
    #[arg(long, conflicts_with = "until")]
    pub count: Option<u32>,

    /// End on this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,
}

fn weekday_arg(s: &str) -> Result<Weekday, String> {
    parse_weekday(s)
        .ok_or_else(|| format!("invalid weekday '{s}', use a name or 0-6 with Sunday = 0"))
}

impl RuleArgs {
    /// Build the rule, filling unset cadence fields from the anchor date.
    pub fn into_rule(self, today: NaiveDate) -> Result<RecurrenceRule> {
        if let Some(path) = &self.rule {
            return RecurrenceRule::load(path)
                .with_context(|| format!("Failed to load rule from {}", path.display()));
        }

        let start = self.start.unwrap_or(today);

        let repeat = match self.repeat {
            RepeatKind::None => Repeat::None,
            RepeatKind::Daily => Repeat::Daily,
            RepeatKind::Weekly => {
                let days = if self.on_days.is_empty() {
                    vec![start.weekday()]
                } else {
                    self.on_days
                };
                Repeat::Weekly {
                    days: days.into_iter().collect(),
                }
            }
            RepeatKind::Monthly => {
                let on = match (self.nth, self.day) {
                    (Some(_), Some(_)) => {
                        anyhow::bail!("--nth and --day are mutually exclusive for monthly rules")
                    }
                    (Some(nth), None) => MonthlyPattern::NthWeekday {
                        nth,
                        weekday: self.weekday.unwrap_or(start.weekday()),
                    },
                    (None, day) => MonthlyPattern::DayOfMonth {
                        day: day.unwrap_or(start.day()),
                    },
                };
                Repeat::Monthly { on }
            }
            RepeatKind::Yearly => Repeat::Yearly {
                month: self.month.unwrap_or(start.month()),
                day: self.day.unwrap_or(start.day()),
            },
        };

        let end = match (self.count, self.until) {
            (Some(n), _) => EndCondition::After(n),
            (None, Some(date)) => EndCondition::On(date),
            (None, None) => EndCondition::Never,
        };

        Ok(RecurrenceRule::new(start, repeat).every(self.every).ending(end))
    }
}
