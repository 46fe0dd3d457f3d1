//! Month grid layout.
//!
//! A month is laid out in seven Sunday-first columns: blank cells for the days
//! before the 1st, then one cell per day.

use chrono::{Datelike, Months, NaiveDate};

use crate::calendar::{days_in_month, month_name, weekday_index};
use crate::error::{RecurError, RecurResult};

/// Layout of a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of the 1st (Sunday = 0), i.e. blank cells before it
    pub leading_blanks: u32,
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// None for padding cells
    pub day: Option<u32>,
    /// Day is one of the previewed occurrences
    pub preview: bool,
    /// Day is the selected anchor date
    pub selected: bool,
}

impl Cell {
    fn blank() -> Self {
        Cell {
            day: None,
            preview: false,
            selected: false,
        }
    }
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> RecurResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| RecurError::InvalidRule(format!("no such month {year}-{month:02}")))?;
        let days_in_month = days_in_month(year, month)
            .ok_or_else(|| RecurError::InvalidRule(format!("no such month {year}-{month:02}")))?;

        Ok(MonthGrid {
            year,
            month,
            days_in_month,
            leading_blanks: u32::from(weekday_index(first.weekday())),
        })
    }

    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // A date always belongs to a valid month
        let days_in_month = days_in_month(date.year(), date.month()).unwrap_or(31);
        let first_weekday = date
            .with_day(1)
            .map_or(0, |first| u32::from(weekday_index(first.weekday())));

        MonthGrid {
            year: date.year(),
            month: date.month(),
            days_in_month,
            leading_blanks: first_weekday,
        }
    }

    /// e.g. "May 2023"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month).unwrap_or("?"), self.year)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Cells in display order, flagging previewed and selected days.
    pub fn cells(&self, previews: &[NaiveDate], selected: Option<NaiveDate>) -> Vec<Cell> {
        let selected_day = selected.filter(|d| self.contains(*d)).map(|d| d.day());

        let blanks = (0..self.leading_blanks).map(|_| Cell::blank());
        let days = (1..=self.days_in_month).map(|day| Cell {
            day: Some(day),
            preview: previews
                .iter()
                .any(|d| self.contains(*d) && d.day() == day),
            selected: selected_day == Some(day),
        });

        blanks.chain(days).collect()
    }

    /// Cells grouped into weeks of seven; the last week is padded with blanks.
    pub fn weeks(&self, previews: &[NaiveDate], selected: Option<NaiveDate>) -> Vec<[Cell; 7]> {
        let cells = self.cells(previews, selected);
        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [Cell::blank(); 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

/// The displayed month and the selected day, navigated like a date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    /// First day of the displayed month
    shown: NaiveDate,
    selected: NaiveDate,
}

impl MonthCursor {
    pub fn new(selected: NaiveDate) -> Self {
        MonthCursor {
            shown: selected.with_day(1).unwrap_or(selected),
            selected,
        }
    }

    /// Show a different month while keeping the selection.
    pub fn showing(mut self, year: i32, month: u32) -> RecurResult<Self> {
        self.shown = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| RecurError::InvalidRule(format!("no such month {year}-{month:02}")))?;
        Ok(self)
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::containing(self.shown)
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.shown.checked_add_months(Months::new(1)) {
            self.shown = next;
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(prev) = self.shown.checked_sub_months(Months::new(1)) {
            self.shown = prev;
        }
    }

    /// Select a day of the displayed month, clamped to the month length.
    /// Returns the new selection, which callers use as the rule's anchor date.
    pub fn select_day(&mut self, day: u32) -> NaiveDate {
        let grid = self.grid();
        let day = day.clamp(1, grid.days_in_month);
        if let Some(date) = self.shown.with_day(day) {
            self.selected = date;
        }
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn layout_offsets() {
        let may = MonthGrid::new(2023, 5).unwrap();
        assert_eq!(may.days_in_month, 31);
        assert_eq!(may.leading_blanks, 1);

        let feb_leap = MonthGrid::new(2024, 2).unwrap();
        assert_eq!(feb_leap.days_in_month, 29);
        assert_eq!(feb_leap.leading_blanks, 4);

        let jan = MonthGrid::new(2023, 1).unwrap();
        assert_eq!(jan.leading_blanks, 0);

        assert!(MonthGrid::new(2023, 0).is_err());
        assert_eq!(MonthGrid::containing(date(2023, 5, 17)), may);
    }

    #[test]
    fn cells_flag_previews_and_selection() {
        let grid = MonthGrid::new(2023, 5).unwrap();
        let previews = [date(2023, 5, 1), date(2023, 5, 3), date(2023, 6, 3)];
        let cells = grid.cells(&previews, Some(date(2023, 5, 3)));

        assert_eq!(cells.len(), 32);
        assert_eq!(cells[0].day, None);
        assert_eq!(cells[1].day, Some(1));
        assert!(cells[1].preview);
        assert!(!cells[2].preview);
        assert!(cells[3].preview && cells[3].selected);
        // June 3rd belongs to another month
        assert_eq!(cells.iter().filter(|c| c.preview).count(), 2);
    }

    #[test]
    fn selection_outside_month_is_ignored() {
        let grid = MonthGrid::new(2023, 5).unwrap();
        let cells = grid.cells(&[], Some(date(2023, 6, 3)));
        assert!(cells.iter().all(|c| !c.selected));
    }

    #[test]
    fn weeks_are_padded() {
        let grid = MonthGrid::new(2023, 5).unwrap();
        let weeks = grid.weeks(&[], None);
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0].day, None);
        assert_eq!(weeks[0][1].day, Some(1));
        assert_eq!(weeks[4][3].day, Some(31));
        assert_eq!(weeks[4][4].day, None);
    }

    #[test]
    fn cursor_navigation() {
        let mut cursor = MonthCursor::new(date(2023, 1, 31));
        cursor.next_month();
        assert_eq!(cursor.grid().title(), "February 2023");
        assert_eq!(cursor.selected(), date(2023, 1, 31));

        assert_eq!(cursor.select_day(31), date(2023, 2, 28));
        cursor.prev_month();
        cursor.prev_month();
        assert_eq!(cursor.grid().title(), "December 2022");
        assert_eq!(cursor.select_day(0), date(2022, 12, 1));
    }

    #[test]
    fn cursor_can_show_another_month() {
        let cursor = MonthCursor::new(date(2023, 5, 1)).showing(2024, 2).unwrap();
        assert_eq!(cursor.grid(), MonthGrid::new(2024, 2).unwrap());
        assert!(MonthCursor::new(date(2023, 5, 1)).showing(2024, 13).is_err());
    }
}
