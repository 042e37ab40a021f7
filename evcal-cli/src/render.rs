//! TUI rendering for calendar projections.
//!
//! Colors come from the category palette in evcal-core so every view and the
//! legend agree.

use chrono::NaiveDate;
use evcal_core::{CalendarEvent, Category};
use evcal_core::controller::DayDetail;
use evcal_core::projection::{DayCell, ListView, MonthView, WeekView};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let (r, g, b) = Category::style(*self).rgb;
        format!("{} {}", "●".truecolor(r, g, b), self.label())
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let time = if self.time.trim().is_empty() {
            "all-day".to_string()
        } else {
            self.time.trim().to_string()
        };
        let location = self.location();
        let mut line = format!("{:>8} {} {}", time.dimmed(), marker(self), self.title);
        if !location.is_empty() {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }
        if self.is_featured {
            line.push_str(&format!(" {}", "★".yellow()));
        }
        line
    }
}

/// Colored dot for an event's category.
fn marker(event: &CalendarEvent) -> String {
    match event.category() {
        Some(category) => {
            let (r, g, b) = category.style().rgb;
            "●".truecolor(r, g, b).to_string()
        }
        None => "○".dimmed().to_string(),
    }
}

/// Width of a month cell, in terminal columns
const CELL_WIDTH: usize = 11;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn render_month_cell(cell: &DayCell) -> String {
    let day = cell.day.date.format("%e").to_string();
    let day = if cell.day.is_today {
        day.bold().reversed().to_string()
    } else if !cell.day.is_current_month {
        day.dimmed().to_string()
    } else if cell.day.is_past {
        day.dimmed().to_string()
    } else {
        day
    };

    let mut plain_width = 2;
    let mut out = day;

    if !cell.events.is_empty() {
        out.push(' ');
        plain_width += 1;
        for event in &cell.events {
            out.push_str(&marker(event));
            plain_width += 1;
        }
    }

    let hidden = cell.hidden();
    if hidden > 0 {
        let more = format!("+{}", hidden);
        plain_width += more.len();
        out.push_str(&more.dimmed().to_string());
    }

    let padding = CELL_WIDTH.saturating_sub(plain_width);
    out.push_str(&" ".repeat(padding));
    out
}

impl Render for MonthView {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(self.month.format("%B %Y").to_string().bold().to_string());

        let header: Vec<String> = WEEKDAYS
            .iter()
            .map(|d| format!("{:<width$}", d, width = CELL_WIDTH))
            .collect();
        lines.push(header.concat().dimmed().to_string());

        for week in self.weeks() {
            lines.push(week.iter().map(render_month_cell).collect::<String>());
        }

        lines.join("\n")
    }
}

fn render_day_heading(date: NaiveDate, is_today: bool) -> String {
    let label = date.format("%a %b %-d").to_string();
    if is_today {
        format!("{} {}", label.bold(), "(today)".dimmed())
    } else {
        label.bold().to_string()
    }
}

impl Render for WeekView {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        for cell in &self.days {
            lines.push(render_day_heading(cell.day.date, cell.day.is_today));
            if cell.events.is_empty() {
                lines.push(format!("  {}", "No events".dimmed()));
            }
            for event in &cell.events {
                lines.push(format!("  {}", event.render()));
            }
            let hidden = cell.hidden();
            if hidden > 0 {
                let label = format!("+{} more {}", hidden, pluralize("event", hidden));
                lines.push(format!("  {}", label.dimmed()));
            }
        }

        lines.join("\n")
    }
}

impl Render for ListView {
    fn render(&self) -> String {
        if self.is_empty() {
            return "No events found".dimmed().to_string();
        }

        let mut lines = Vec::new();
        for (i, bucket) in self.buckets.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(bucket.date.format("%a %b %-d").to_string().bold().to_string());
            for event in &bucket.events {
                lines.push(format!("  {}", event.render()));
            }
        }

        lines.join("\n")
    }
}

impl Render for DayDetail {
    fn render(&self) -> String {
        let mut lines = vec![self.date.format("%A, %B %-d %Y").to_string().bold().to_string()];

        if self.events.is_empty() {
            lines.push(format!("  {}", "No events".dimmed()));
        }
        for event in &self.events {
            lines.push(format!("  {}", event.render()));
            if let Some(price) = event.price.as_deref().filter(|p| !p.trim().is_empty()) {
                lines.push(format!("           {}", format!("Price: {}", price).dimmed()));
            }
        }

        lines.join("\n")
    }
}

/// Dimmed note about events that could not be placed on the calendar.
pub fn render_skipped(skipped: usize) -> Option<String> {
    if skipped == 0 {
        return None;
    }
    let label = format!(
        "{} {} skipped (missing or invalid date)",
        skipped,
        pluralize("event", skipped)
    );
    Some(label.dimmed().to_string())
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> &str {
    if count == 1 {
        word
    } else {
        match word {
            "event" => "events",
            _ => word,
        }
    }
}
