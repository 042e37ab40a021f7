//! Civil date handling.
//!
//! All parsing, formatting and arithmetic on calendar dates goes through this
//! module. A civil date has no time-of-day and no timezone; the only place a
//! clock or a zone is consulted is [`TodayReference`].

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// Canonical wire format for civil dates.
pub const CIVIL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string. Anything else, including impossible dates
/// like `2026-02-30`, yields `None`.
pub fn parse_civil_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // chrono accepts unpadded fields; the wire format is strictly 10 chars.
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, CIVIL_DATE_FORMAT).ok()
}

pub fn format_civil_date(date: NaiveDate) -> String {
    date.format(CIVIL_DATE_FORMAT).to_string()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// `date` shifted by `days`, saturating at the ends of chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -i64::from(date.weekday().num_days_from_sunday()))
}

/// First day of the month `months` away from the month containing `date`.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let first = month_start(date);
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Best-effort reading of an event's free-text display time.
///
/// Understands `19:00`, `7:30 PM`, `7pm`, `9 am` and ranges such as
/// `8pm - 11pm`, of which only the start is used. Returns `None` for text it
/// cannot read (e.g. "All day", "Doors open late").
pub fn parse_display_time(text: &str) -> Option<NaiveTime> {
    let first = text
        .split(['-', '\u{2013}', '\u{2014}'])
        .next()?
        .trim()
        .to_ascii_lowercase();
    let first = first.replace('.', "");

    let (clock, meridiem) = if let Some(rest) = first.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else if let Some(rest) = first.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else {
        (first.as_str(), None)
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => {
            if m.len() != 2 {
                return None;
            }
            (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?)
        }
        // A bare number is only a time when it carries am/pm.
        None if meridiem.is_some() => (clock.parse::<u32>().ok()?, 0),
        None => return None,
    };

    let hour = match meridiem {
        Some(pm) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            match (hour, pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, true) => h + 12,
                (h, false) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Which zone decides what "today" is.
///
/// Defaults to the host's local zone. Server-side renders serving several
/// regions should configure an explicit zone instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TodayReference {
    #[default]
    Local,
    Zone(Tz),
}

impl TodayReference {
    /// The civil date of `now` in this reference zone.
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            TodayReference::Local => now.with_timezone(&Local).date_naive(),
            TodayReference::Zone(tz) => now.with_timezone(tz).date_naive(),
        }
    }

    /// Today's civil date from the host clock.
    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }
}
