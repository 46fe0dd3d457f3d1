//! TUI rendering traits for recurdate types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to recurdate-core types using owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use recurdate_core::calendar::{WEEKDAYS, weekday_short_name};
use recurdate_core::{Cell, MonthGrid};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Cell {
    fn render(&self) -> String {
        let Some(day) = self.day else {
            return "   ".to_string();
        };

        let text = format!("{day:>3}");
        match (self.selected, self.preview) {
            (true, true) => text.reversed().bold().blue().to_string(),
            (true, false) => text.reversed().bold().to_string(),
            (false, true) => text.blue().bold().to_string(),
            (false, false) => text.dimmed().to_string(),
        }
    }
}

/// A month grid with the occurrences and selection to highlight.
pub struct GridView<'a> {
    pub grid: MonthGrid,
    pub previews: &'a [NaiveDate],
    pub selected: Option<NaiveDate>,
}

impl Render for GridView<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let title = self.grid.title();
        lines.push(format!("{:^28}", title).bold().to_string());

        let header: String = WEEKDAYS
            .iter()
            .map(|d| format!("{:>3}", &weekday_short_name(*d)[..2]))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(header.dimmed().to_string());

        for week in self.grid.weeks(self.previews, self.selected) {
            let row: Vec<String> = week.iter().map(Render::render).collect();
            lines.push(row.join(" ").trim_end().to_string());
        }

        lines.join("\n")
    }
}

/// Format a date like "Mon May 1 2023"
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%a %b %-d %Y").to_string()
}

/// Render the preview list, one occurrence per line
pub fn render_occurrences(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "   No occurrences".dimmed().to_string();
    }

    dates
        .iter()
        .map(|d| format!("   {} {}", "•".blue(), format_date(d)))
        .collect::<Vec<_>>()
        .join("\n")
}
