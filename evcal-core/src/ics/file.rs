//! Downloadable `.ics` payloads.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::civil_date::format_civil_date;
use crate::error::CalendarResult;

pub const ICS_MIME_TYPE: &str = "text/calendar";

/// `{prefix}-{YYYY-MM-DD}.ics`, with the prefix slugified.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    let prefix = slug::slugify(prefix);
    let prefix = if prefix.is_empty() { "events" } else { prefix.as_str() };
    format!("{}-{}.ics", prefix, format_civil_date(date))
}

/// A serialized calendar ready to hand to a browser or write to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl IcsExport {
    pub fn new(prefix: &str, date: NaiveDate, content: String) -> Self {
        IcsExport {
            filename: export_filename(prefix, date),
            mime_type: ICS_MIME_TYPE,
            content,
        }
    }

    /// Write the file into `dir`, creating it if needed. Returns the full path.
    pub fn write_to(&self, dir: &Path) -> CalendarResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    #[test]
    fn filename_follows_prefix_date_convention() {
        assert_eq!(export_filename("events", day()), "events-2026-03-05.ics");
        assert_eq!(export_filename("Whats On Guide", day()), "whats-on-guide-2026-03-05.ics");
        assert_eq!(export_filename("", day()), "events-2026-03-05.ics");
    }

    #[test]
    fn export_carries_mime_type() {
        let export = IcsExport::new("events", day(), "BEGIN:VCALENDAR\r\n".into());
        assert_eq!(export.mime_type, "text/calendar");
        assert_eq!(export.filename, "events-2026-03-05.ics");
    }

    #[test]
    fn write_to_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let export = IcsExport::new("events", day(), "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n".into());

        let path = export.write_to(&dir).unwrap();
        assert_eq!(path, dir.join("events-2026-03-05.ics"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.content);
    }
}
