//! Date-keyed index of the currently visible events.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::category::CategorySet;
use crate::civil_date::parse_civil_date;
use crate::event::CalendarEvent;
use crate::feed::{EventFeed, SkippedEvent, date_problem};

/// Events that pass the active category filter, grouped by civil date.
///
/// Built once per (snapshot, active categories) pair in a single pass; day
/// lookups are a hash-map hit. Within a day, events keep snapshot order.
#[derive(Debug, Clone)]
pub struct EventIndex {
    by_date: HashMap<NaiveDate, Vec<CalendarEvent>>,
    /// Keys of `by_date`, ascending, for range queries
    days: Vec<NaiveDate>,
    active: CategorySet,
    visible: usize,
    hidden_uncategorised: usize,
    skipped: Vec<SkippedEvent>,
}

impl EventIndex {
    /// Index `events` under the `active` filter.
    ///
    /// Events whose date is missing or malformed are left out and reported
    /// through [`EventIndex::skipped`], with positions relative to `events`.
    pub fn new(events: &[CalendarEvent], active: CategorySet) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<CalendarEvent>> = HashMap::new();
        let mut skipped = Vec::new();
        let mut visible = 0;
        let mut hidden_uncategorised = 0;

        for (position, event) in events.iter().enumerate() {
            let Some(date) = parse_civil_date(&event.date) else {
                if let Some(reason) = date_problem(event) {
                    skipped.push(SkippedEvent {
                        position,
                        id: Some(event.id.clone()),
                        reason,
                    });
                }
                continue;
            };

            match event.category() {
                Some(category) if active.is_active(category) => {
                    by_date.entry(date).or_default().push(event.clone());
                    visible += 1;
                }
                Some(_) => {}
                None => hidden_uncategorised += 1,
            }
        }

        let mut days: Vec<NaiveDate> = by_date.keys().copied().collect();
        days.sort_unstable();

        debug!(
            total = events.len(),
            visible,
            days = days.len(),
            hidden_uncategorised,
            skipped = skipped.len(),
            "built event index"
        );

        EventIndex {
            by_date,
            days,
            active,
            visible,
            hidden_uncategorised,
            skipped,
        }
    }

    /// Index a feed snapshot, carrying over the feed's skipped-event
    /// diagnostics.
    pub fn from_feed(feed: &EventFeed, active: CategorySet) -> Self {
        let mut index = Self::new(feed.events(), active);
        index.skipped.extend(feed.skipped().iter().cloned());
        index.skipped.sort_by_key(|s| s.position);
        index
    }

    /// Visible events on `date`, in snapshot order. Empty when there are none.
    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Like [`EventIndex::events_on`] for a `YYYY-MM-DD` string. A malformed
    /// string matches nothing.
    pub fn events_on_str(&self, date: &str) -> &[CalendarEvent] {
        parse_civil_date(date)
            .map(|d| self.events_on(d))
            .unwrap_or(&[])
    }

    /// Days in `from..=to` that have visible events, ascending, each with its
    /// events in snapshot order.
    pub fn events_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<(NaiveDate, &[CalendarEvent])> {
        if from > to {
            return Vec::new();
        }
        let lo = self.days.partition_point(|d| *d < from);
        let hi = self.days.partition_point(|d| *d <= to);

        self.days[lo..hi]
            .iter()
            .map(|d| (*d, self.events_on(*d)))
            .collect()
    }

    pub fn active(&self) -> CategorySet {
        self.active
    }

    /// Number of visible events across all days.
    pub fn len(&self) -> usize {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// Date-valid events hidden only because their tag is not a known category.
    pub fn hidden_uncategorised(&self) -> usize {
        self.hidden_uncategorised
    }

    pub fn skipped(&self) -> &[SkippedEvent] {
        &self.skipped
    }
}
