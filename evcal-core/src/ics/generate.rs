//! ICS document generation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};
use tracing::debug;

use super::file::IcsExport;
use crate::civil_date::add_days;
use crate::event::CalendarEvent;

pub const DEFAULT_PRODUCT_ID: &str = "-//evcal//Events Directory Calendar//EN";
pub const DEFAULT_UID_DOMAIN: &str = "evcal.local";

/// Serializes a day's events into an iCalendar document.
///
/// Output depends only on the inputs and the exporter's settings: the same
/// day and events always produce byte-identical text.
#[derive(Debug, Clone)]
pub struct IcsExporter {
    product_id: String,
    uid_domain: String,
    default_duration: Duration,
    public_base_url: Option<String>,
    filename_prefix: String,
}

impl Default for IcsExporter {
    fn default() -> Self {
        IcsExporter {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            default_duration: Duration::hours(2),
            public_base_url: None,
            filename_prefix: "events".to_string(),
        }
    }
}

impl IcsExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    pub fn with_uid_domain(mut self, domain: impl Into<String>) -> Self {
        self.uid_domain = domain.into();
        self
    }

    /// Length given to events that have a start time but no end.
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Site root used to link each event page (`{base}/events/{slug}`).
    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_filename_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = prefix.into();
        self
    }

    pub fn filename_prefix(&self) -> &str {
        &self.filename_prefix
    }

    /// One VCALENDAR holding one VEVENT per event, in the given order.
    /// No events still yields a valid, empty calendar.
    pub fn export_day(&self, date: NaiveDate, events: &[CalendarEvent]) -> String {
        let mut cal = Calendar::new();

        for event in events {
            cal.push(self.build_event(date, event));
        }

        let cal = cal.done();
        let output = self.strip_ics_bloat(&cal.to_string());

        debug!(
            date = %date,
            events = events.len(),
            bytes = output.len(),
            "exported day to ics"
        );

        output
    }

    /// [`IcsExporter::export_day`] packaged as a named `text/calendar` file.
    pub fn export_file(&self, date: NaiveDate, events: &[CalendarEvent]) -> IcsExport {
        IcsExport::new(&self.filename_prefix, date, self.export_day(date, events))
    }

    fn build_event(&self, date: NaiveDate, event: &CalendarEvent) -> icalendar::Event {
        let mut ics_event = icalendar::Event::new();

        // icalendar fills a missing UID with a random one and a missing
        // DTSTAMP with the wall clock; set both so output is reproducible.
        ics_event.uid(&format!("{}@{}", event.id, self.uid_domain));
        ics_event.add_property("DTSTAMP", date.format("%Y%m%dT000000Z").to_string());

        match event.start_time() {
            Some(time) => {
                let start = NaiveDateTime::new(date, time);
                let end = start + self.default_duration;
                ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%S").to_string());
                ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%S").to_string());
            }
            None => {
                add_date_property(&mut ics_event, "DTSTART", date);
                add_date_property(&mut ics_event, "DTEND", add_days(date, 1));
            }
        }

        ics_event.summary(&event.title);

        let location = event.location();
        if !location.is_empty() {
            ics_event.location(&location);
        }

        if let Some(category) = event.category() {
            ics_event.add_property("CATEGORIES", category.label());
            let description = match event.price.as_deref().map(str::trim) {
                Some(price) if !price.is_empty() => {
                    format!("{} - Price: {}", category.label(), price)
                }
                _ => category.label().to_string(),
            };
            ics_event.description(&description);
        }

        if let Some(base) = &self.public_base_url {
            if !event.slug.is_empty() {
                ics_event.add_property("URL", format!("{}/events/{}", base, event.slug));
            }
        }

        ics_event.done()
    }

    /// Clean up ICS output from the icalendar crate
    /// - Replace PRODID with ours
    /// - Remove CALSCALE:GREGORIAN (it's the default)
    fn strip_ics_bloat(&self, ics: &str) -> String {
        let mut result = String::with_capacity(ics.len());

        for line in ics.lines() {
            if line.starts_with("PRODID:") {
                result.push_str("PRODID:");
                result.push_str(&self.product_id);
                result.push_str("\r\n");
                continue;
            }

            if line == "CALSCALE:GREGORIAN" {
                continue;
            }

            result.push_str(line);
            result.push_str("\r\n");
        }

        result
    }
}

/// Add an all-day date property (`VALUE=DATE`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
