//! The three calendar projections: month grid, week columns, and list.
//!
//! All of them read from one [`EventIndex`], so for a given snapshot and
//! filter they always agree on which events are visible.

use chrono::NaiveDate;
use serde::Serialize;

use crate::civil_date::{month_end, month_start};
use crate::event::CalendarEvent;
use crate::grid::{GridDay, month_grid, week_grid};
use crate::index::EventIndex;

/// Events shown per month cell before collapsing into "+N more".
pub const DEFAULT_MONTH_CELL_CAP: usize = 3;

/// One day of a month or week projection.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    #[serde(flatten)]
    pub day: GridDay,
    /// Events to draw, possibly capped
    pub events: Vec<CalendarEvent>,
    /// Full filtered count for the day, independent of the cap
    pub total: usize,
}

impl DayCell {
    fn build(index: &EventIndex, day: GridDay, cap: Option<usize>) -> Self {
        let all = index.events_on(day.date);
        let shown = cap.map_or(all.len(), |cap| cap.min(all.len()));

        DayCell {
            day,
            events: all[..shown].to_vec(),
            total: all.len(),
        }
    }

    /// Count behind the "+N more" marker.
    pub fn hidden(&self) -> usize {
        self.total - self.events.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    /// Anchor month, as its first day
    pub month: NaiveDate,
    /// Always 42 cells, row-major from Sunday
    pub cells: Vec<DayCell>,
    pub skipped: usize,
}

impl MonthView {
    /// The grid split into its six weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    /// Always 7 cells, Sunday first
    pub days: Vec<DayCell>,
    pub skipped: usize,
}

/// One date's worth of the list projection.
#[derive(Debug, Clone, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Ascending by date; never contains an empty bucket
    pub buckets: Vec<DateBucket>,
    pub skipped: usize,
}

impl ListView {
    pub fn event_count(&self) -> usize {
        self.buckets.iter().map(|b| b.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Month grid for the month containing `anchor`, showing at most `cap`
/// events per cell.
pub fn project_month(index: &EventIndex, anchor: NaiveDate, today: NaiveDate, cap: usize) -> MonthView {
    let cells = month_grid(anchor, today)
        .into_iter()
        .map(|day| DayCell::build(index, day, Some(cap)))
        .collect();

    MonthView {
        month: month_start(anchor),
        cells,
        skipped: index.skipped().len(),
    }
}

/// Week columns for the week containing `anchor`. `None` shows every event.
pub fn project_week(
    index: &EventIndex,
    anchor: NaiveDate,
    today: NaiveDate,
    cap: Option<usize>,
) -> WeekView {
    let days = week_grid(anchor, today)
        .into_iter()
        .map(|day| DayCell::build(index, day, cap))
        .collect();

    WeekView {
        days,
        skipped: index.skipped().len(),
    }
}

/// Chronological buckets for every visible event dated `from..=to`.
pub fn project_list(index: &EventIndex, from: NaiveDate, to: NaiveDate) -> ListView {
    let buckets = index
        .events_between(from, to)
        .into_iter()
        .map(|(date, events)| DateBucket {
            date,
            events: events.to_vec(),
        })
        .collect();

    ListView {
        from,
        to,
        buckets,
        skipped: index.skipped().len(),
    }
}

/// List projection over the whole month containing `anchor`.
pub fn project_month_list(index: &EventIndex, anchor: NaiveDate) -> ListView {
    project_list(index, month_start(anchor), month_end(anchor))
}
