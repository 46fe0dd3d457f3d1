//! Recurrence expansion.
//!
//! Walks a cursor forward from the rule's anchor date, testing each visited
//! date against the rule's cadence. The walk is bounded by the occurrence cap,
//! the rule's end condition and a horizon ceiling, so it terminates even for
//! rules that can never match.

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, trace};

use crate::calendar::{first_of_month_after, first_of_year_after, is_nth_weekday, years_after};
use crate::constants::{DEFAULT_HORIZON_YEARS, DEFAULT_MAX_OCCURRENCES};
use crate::rule::{EndCondition, MonthlyPattern, RecurrenceRule, Repeat};

/// Bounds applied to every expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Hard cap on the number of occurrences returned
    pub max_occurrences: usize,
    /// Stop scanning once the cursor is this many years past the anchor
    pub horizon_years: u32,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

/// Why an expansion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Collected `max_occurrences` dates and more would follow
    Cap,
    /// Emitted the rule's `After(n)` count
    Count,
    /// Passed the rule's `On(date)` end date
    EndDate,
    /// Passed the horizon ceiling (or ran out of representable dates)
    Horizon,
    /// One-time rule
    Single,
}

/// Result of one expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub dates: Vec<NaiveDate>,
    pub stop: StopReason,
}

/// Outcome of testing one cursor position.
struct Step {
    matched: bool,
    /// None once date arithmetic runs off the calendar
    next: Option<NaiveDate>,
}

/// Expands recurrence rules into occurrence lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    options: ExpandOptions,
}

impl Expander {
    pub fn new(options: ExpandOptions) -> Self {
        Expander { options }
    }

    pub fn options(&self) -> ExpandOptions {
        self.options
    }

    /// Occurrences of `rule`, in increasing order.
    pub fn expand(&self, rule: &RecurrenceRule) -> Vec<NaiveDate> {
        self.expand_detailed(rule).dates
    }

    /// Like [`Expander::expand`], also reporting why the walk stopped.
    pub fn expand_detailed(&self, rule: &RecurrenceRule) -> Expansion {
        let cap = self.options.max_occurrences;

        if cap == 0 {
            return Expansion {
                dates: Vec::new(),
                stop: StopReason::Cap,
            };
        }

        if rule.repeat == Repeat::None {
            return Expansion {
                dates: vec![rule.start],
                stop: StopReason::Single,
            };
        }

        let count = match rule.end {
            EndCondition::After(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
            _ => None,
        };
        let horizon = years_after(rule.start, self.options.horizon_years);
        let interval = rule.interval.max(1);

        let mut dates = Vec::new();
        let mut cursor = rule.start;

        let stop = loop {
            if count.is_some_and(|n| dates.len() >= n) {
                break StopReason::Count;
            }
            if matches!(rule.end, EndCondition::On(end) if cursor > end) {
                break StopReason::EndDate;
            }
            if cursor > horizon {
                break StopReason::Horizon;
            }

            let step = step(&rule.repeat, cursor, interval);
            if step.matched {
                // Cap only counts as the reason once a further match exists
                if dates.len() >= cap {
                    break StopReason::Cap;
                }
                trace!(date = %cursor, "occurrence");
                dates.push(cursor);
            }

            match step.next {
                Some(next) => cursor = next,
                None => break StopReason::Horizon,
            }
        };

        debug!(
            rule = %rule,
            occurrences = dates.len(),
            stop = ?stop,
            "expanded recurrence rule"
        );

        Expansion { dates, stop }
    }
}

/// Occurrences of `rule`, at most `hard_cap` of them.
pub fn expand(rule: &RecurrenceRule, hard_cap: usize) -> Vec<NaiveDate> {
    Expander::new(ExpandOptions {
        max_occurrences: hard_cap,
        ..ExpandOptions::default()
    })
    .expand(rule)
}

fn plus_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

/// Test the cursor against the cadence and pick the next cursor position.
fn step(repeat: &Repeat, cursor: NaiveDate, interval: u32) -> Step {
    let next_day = plus_days(cursor, 1);

    match repeat {
        // Handled before the walk starts
        Repeat::None => Step {
            matched: true,
            next: None,
        },

        Repeat::Daily => Step {
            matched: true,
            next: plus_days(cursor, u64::from(interval)),
        },

        // Every date in an active week is visited; the week after Saturday
        // jumps ahead by the interval. Weeks run Sunday to Saturday regardless
        // of which weekdays the rule selects.
        Repeat::Weekly { days } => Step {
            matched: days.contains(cursor.weekday()),
            next: if cursor.weekday() == chrono::Weekday::Sat {
                plus_days(cursor, 7 * (u64::from(interval) - 1) + 1)
            } else {
                next_day
            },
        },

        Repeat::Monthly { on } => {
            let matched = match *on {
                MonthlyPattern::DayOfMonth { day } => cursor.day() == day,
                MonthlyPattern::NthWeekday { nth, weekday } => {
                    is_nth_weekday(cursor, weekday, nth)
                }
            };
            Step {
                matched,
                next: if matched {
                    first_of_month_after(cursor, interval)
                } else {
                    next_day
                },
            }
        }

        Repeat::Yearly { month, day } => {
            let matched = cursor.month() == *month && cursor.day() == *day;
            Step {
                matched,
                next: if matched {
                    first_of_year_after(cursor, interval)
                } else {
                    next_day
                },
            }
        }
    }
}
