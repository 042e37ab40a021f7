//! Month and week date grids.
//!
//! Weeks always run Sunday to Saturday. The month grid is always six full
//! weeks so the layout never reflows between months.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::civil_date::{month_start, week_start};

/// Cells in a month grid (6 rows of 7).
pub const MONTH_GRID_DAYS: usize = 42;

/// Cells in a week grid.
pub const WEEK_DAYS: usize = 7;

/// Display metadata for one day of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    /// Same month and year as the anchor
    pub is_current_month: bool,
    pub is_today: bool,
    /// Strictly before today
    pub is_past: bool,
}

impl GridDay {
    fn new(date: NaiveDate, anchor: NaiveDate, today: NaiveDate) -> Self {
        GridDay {
            date,
            is_current_month: date.year() == anchor.year() && date.month() == anchor.month(),
            is_today: date == today,
            is_past: date < today,
        }
    }
}

// Stops early at NaiveDate::MAX rather than repeating a date.
fn days_from(start: NaiveDate, count: usize, anchor: NaiveDate, today: NaiveDate) -> Vec<GridDay> {
    start
        .iter_days()
        .take(count)
        .map(|date| GridDay::new(date, anchor, today))
        .collect()
}

/// The 42 days shown for the month containing `anchor`, starting on the
/// Sunday on or before the 1st.
pub fn month_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<GridDay> {
    let start = week_start(month_start(anchor));
    days_from(start, MONTH_GRID_DAYS, anchor, today)
}

/// The 7 days (Sunday to Saturday) of the week containing `anchor`.
pub fn week_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<GridDay> {
    days_from(week_start(anchor), WEEK_DAYS, anchor, today)
}
