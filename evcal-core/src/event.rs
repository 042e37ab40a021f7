//! The event record consumed from the directory's data provider.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::civil_date::{parse_civil_date, parse_display_time};

/// A dated event in the directory.
///
/// Records arrive as JSON from the data provider and are treated as a
/// read-only snapshot. Only `id` is required to deserialize; a record with a
/// missing or malformed `date` still deserializes and is diverted to the
/// skipped-event diagnostics later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Civil date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// Free-text display time, e.g. "7:30 PM"
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub area: String,
    /// Raw category tag; unknown tags are kept but never pass a filter
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl CalendarEvent {
    pub fn civil_date(&self) -> Option<NaiveDate> {
        parse_civil_date(&self.date)
    }

    /// The known category, or `None` for an unrecognised tag.
    pub fn category(&self) -> Option<Category> {
        Category::from_id(&self.category)
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_display_time(&self.time)
    }

    /// `"{venue}, {area}"`, leaving out whichever part is blank.
    pub fn location(&self) -> String {
        [self.venue.trim(), self.area.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
