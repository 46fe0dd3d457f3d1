use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use recurdate_core::{Expander, MonthCursor, RecurrenceRule};

use crate::render::{GridView, Render, render_occurrences};

/// Month to display: "YYYY-MM", "next"/"prev" relative to the anchor, or the anchor's month.
pub fn resolve_view(view: Option<&str>, anchor: NaiveDate) -> Result<MonthCursor> {
    let mut cursor = MonthCursor::new(anchor);

    match view {
        None => {}
        Some("next") => cursor.next_month(),
        Some("prev") => cursor.prev_month(),
        Some(s) => {
            let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", s))?;
            cursor = cursor.showing(first.year(), first.month())?;
        }
    }

    Ok(cursor)
}

pub fn run(rule: &RecurrenceRule, expander: &Expander, view: Option<&str>) -> Result<()> {
    rule.validate()?;

    let cursor = resolve_view(view, rule.start)?;
    let dates = expander.expand(rule);

    let grid = GridView {
        grid: cursor.grid(),
        previews: &dates,
        selected: Some(cursor.selected()),
    };

    println!("{}", grid.render());
    println!();
    println!("{}", render_occurrences(&dates));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recurdate_core::MonthGrid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn view_defaults_to_anchor_month() {
        let cursor = resolve_view(None, date(2023, 5, 17)).unwrap();
        assert_eq!(cursor.grid(), MonthGrid::new(2023, 5).unwrap());
        assert_eq!(cursor.selected(), date(2023, 5, 17));
    }

    #[test]
    fn view_relative_and_explicit() {
        let next = resolve_view(Some("next"), date(2023, 12, 5)).unwrap();
        assert_eq!(next.grid(), MonthGrid::new(2024, 1).unwrap());

        let prev = resolve_view(Some("prev"), date(2023, 1, 5)).unwrap();
        assert_eq!(prev.grid(), MonthGrid::new(2022, 12).unwrap());

        let explicit = resolve_view(Some("2024-02"), date(2023, 1, 5)).unwrap();
        assert_eq!(explicit.grid(), MonthGrid::new(2024, 2).unwrap());
    }

    #[test]
    fn view_rejects_garbage() {
        assert!(resolve_view(Some("2024-13"), date(2023, 1, 5)).is_err());
        assert!(resolve_view(Some("soon"), date(2023, 1, 5)).is_err());
    }
}
