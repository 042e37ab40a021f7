//! iCalendar export.
//!
//! This module serializes a day's events into an RFC 5545 document and
//! packages it as a downloadable `.ics` file.

mod file;
mod generate;

pub use file::{ICS_MIME_TYPE, IcsExport, export_filename};
pub use generate::{DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN, IcsExporter};
