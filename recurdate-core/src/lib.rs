//! Core types for recurdate.
//!
//! This crate provides everything the recurdate CLI (or any other front end)
//! needs to turn a recurrence rule into dates:
//! - `rule` for the recurrence rule model and rule files
//! - `expand` for the recurrence expander
//! - `grid` for month layout and date-picker navigation
//! - `calendar` for the underlying date arithmetic

pub mod calendar;
pub mod constants;
pub mod error;
pub mod expand;
pub mod grid;
pub mod rule;
pub mod settings;

pub use calendar::WeekdayOrdinal;
pub use error::{RecurError, RecurResult};
pub use expand::{ExpandOptions, Expander, Expansion, StopReason, expand};
pub use grid::{Cell, MonthCursor, MonthGrid};
pub use rule::{EndCondition, MonthlyPattern, RecurrenceRule, Repeat, WeekdaySet};
pub use settings::Settings;
