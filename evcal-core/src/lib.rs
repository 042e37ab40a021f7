//! Calendar engine for the events directory.
//!
//! This crate turns a flat snapshot of dated events into the three calendar
//! projections the directory shows (month grid, week columns, chronological
//! list), filters them consistently by category, and exports a day's events
//! as an iCalendar file.
//!
//! Everything here is synchronous and pure: callers pass the event snapshot,
//! the active categories and "today" explicitly, and get fresh values back.

pub mod category;
pub mod civil_date;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod feed;
pub mod grid;
pub mod ics;
pub mod index;
pub mod projection;

pub use category::{Category, CategorySet, CategoryStyle};
pub use event::CalendarEvent;
pub use feed::{EventFeed, SkipReason, SkippedEvent};
pub use index::EventIndex;
