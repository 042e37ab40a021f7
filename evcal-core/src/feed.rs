//! Entry boundary for event snapshots.
//!
//! The provider hands over a JSON array of event records. A top-level value
//! that is not an array is a caller bug and fails immediately. Problems inside
//! individual records never abort the load: those records are set aside as
//! [`SkippedEvent`] diagnostics and the rest of the calendar still renders.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::civil_date::parse_civil_date;
use crate::error::{CalendarError, CalendarResult};
use crate::event::CalendarEvent;

/// Why an event could not be placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingDate,
    MalformedDate(String),
    /// The element is not a usable event record at all
    InvalidRecord(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::MissingDate => write!(f, "missing date"),
            SkipReason::MalformedDate(d) => write!(f, "malformed date '{}'", d),
            SkipReason::InvalidRecord(e) => write!(f, "invalid record: {}", e),
        }
    }
}

/// An event left off every projection, with enough context to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    /// Position in the collection the event was read from
    pub position: usize,
    pub id: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "#{} ({}): {}", self.position, id, self.reason),
            None => write!(f, "#{}: {}", self.position, self.reason),
        }
    }
}

/// Check an event's date, returning the reason it is unschedulable if any.
pub(crate) fn date_problem(event: &CalendarEvent) -> Option<SkipReason> {
    if event.date.trim().is_empty() {
        Some(SkipReason::MissingDate)
    } else if parse_civil_date(&event.date).is_none() {
        Some(SkipReason::MalformedDate(event.date.clone()))
    } else {
        None
    }
}

/// A validated snapshot of schedulable events plus the ones that were not.
#[derive(Debug, Clone, Default)]
pub struct EventFeed {
    events: Vec<CalendarEvent>,
    skipped: Vec<SkippedEvent>,
}

impl EventFeed {
    /// Parse a provider response body.
    pub fn from_json_str(json: &str) -> CalendarResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CalendarError::InvalidInput(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Build a feed from an already-decoded JSON value, which must be an array.
    pub fn from_value(value: Value) -> CalendarResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(CalendarError::InvalidInput(format!(
                    "expected an array of events, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut events = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();

        for (position, item) in items.into_iter().enumerate() {
            let id = item.get("id").and_then(Value::as_str).map(str::to_string);

            match serde_json::from_value::<CalendarEvent>(item) {
                Ok(event) => match date_problem(&event) {
                    Some(reason) => skipped.push(SkippedEvent {
                        position,
                        id,
                        reason,
                    }),
                    None => events.push(event),
                },
                Err(e) => skipped.push(SkippedEvent {
                    position,
                    id,
                    reason: SkipReason::InvalidRecord(e.to_string()),
                }),
            }
        }

        Ok(Self::log_loaded(EventFeed { events, skipped }))
    }

    /// Build a feed from records that are already typed.
    pub fn from_events(all: Vec<CalendarEvent>) -> Self {
        let mut events = Vec::with_capacity(all.len());
        let mut skipped = Vec::new();

        for (position, event) in all.into_iter().enumerate() {
            match date_problem(&event) {
                Some(reason) => skipped.push(SkippedEvent {
                    position,
                    id: Some(event.id),
                    reason,
                }),
                None => events.push(event),
            }
        }

        Self::log_loaded(EventFeed { events, skipped })
    }

    fn log_loaded(feed: EventFeed) -> EventFeed {
        debug!(
            events = feed.events.len(),
            skipped = feed.skipped.len(),
            "loaded event feed"
        );
        for skip in &feed.skipped {
            warn!("skipping unschedulable event {}", skip);
        }
        feed
    }

    /// Events with a valid date, in provider order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn skipped(&self) -> &[SkippedEvent] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
