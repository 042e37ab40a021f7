//! End-to-end behaviour of the calendar engine over a JSON snapshot.

use chrono::{Datelike, NaiveDate, Weekday};
use evcal_core::civil_date::{add_days, month_end, month_start};
use evcal_core::grid::{month_grid, week_grid};
use evcal_core::ics::IcsExporter;
use evcal_core::projection::{project_month, project_month_list, project_week};
use evcal_core::{Category, CategorySet, EventFeed, EventIndex};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ids(events: &[evcal_core::CalendarEvent]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

/// A month of mixed events, including a few that cannot be scheduled.
fn sample_feed() -> EventFeed {
    EventFeed::from_json_str(
        r#"[
            {"id": "c1", "title": "Quartet", "date": "2026-03-02", "time": "8pm", "venue": "Hall", "area": "Centre", "category": "concerts"},
            {"id": "f1", "title": "Puppet Show", "date": "2026-03-02", "time": "10am", "venue": "Library", "area": "North", "category": "family"},
            {"id": "d1", "title": "Tapas Night", "date": "2026-03-14", "time": "7:30 PM", "venue": "Casa", "area": "Old Town", "category": "dining"},
            {"id": "s1", "title": "Derby", "date": "2026-03-14", "time": "15:00", "venue": "Stadium", "area": "East", "category": "sports"},
            {"id": "m1", "title": "Noir Double Bill", "date": "2026-03-31", "time": "9pm", "venue": "Rex", "area": "Centre", "category": "cinema"},
            {"id": "n1", "title": "Warehouse", "date": "2026-04-03", "time": "11pm", "venue": "Dock 4", "area": "Port", "category": "nightlife"},
            {"id": "u1", "title": "Poetry Slam", "date": "2026-03-14", "time": "8pm", "venue": "Cafe", "area": "West", "category": "spoken-word"},
            {"id": "x1", "title": "Mystery", "date": "TBA", "category": "cultural"},
            {"id": "x2", "title": "Undated", "category": "cultural"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn grids_are_fixed_size_consecutive_and_start_on_sunday() {
    let today = date(2026, 3, 10);
    let mut anchor = date(2024, 1, 1);

    while anchor < date(2027, 1, 1) {
        let month = month_grid(anchor, today);
        let week = week_grid(anchor, today);

        assert_eq!(month.len(), 42, "month grid for {anchor}");
        assert_eq!(week.len(), 7, "week grid for {anchor}");
        assert_eq!(month[0].date.weekday(), Weekday::Sun);
        assert_eq!(week[0].date.weekday(), Weekday::Sun);

        for pair in month.windows(2) {
            assert_eq!(pair[1].date, add_days(pair[0].date, 1));
        }
        for pair in week.windows(2) {
            assert_eq!(pair[1].date, add_days(pair[0].date, 1));
        }

        assert!(month.iter().any(|d| d.date == month_start(anchor)));
        assert!(month.iter().any(|d| d.date == month_end(anchor)));

        anchor = add_days(anchor, 9);
    }
}

#[test]
fn exactly_one_today_when_grid_spans_it() {
    let today = date(2026, 3, 10);
    let month = month_grid(date(2026, 3, 20), today);
    assert_eq!(month.iter().filter(|d| d.is_today).count(), 1);

    let week = week_grid(today, today);
    assert_eq!(week.iter().filter(|d| d.is_today).count(), 1);

    let far = month_grid(date(2026, 8, 1), today);
    assert_eq!(far.iter().filter(|d| d.is_today).count(), 0);
    assert!(far.iter().all(|d| !d.is_past));
}

#[test]
fn march_2026_grid_bounds() {
    let grid = month_grid(date(2026, 3, 1), date(2026, 3, 1));
    assert_eq!(grid[0].date, date(2026, 3, 1));
    assert_eq!(grid[41].date, date(2026, 4, 11));
}

#[test]
fn concrete_dining_scenario() {
    let feed = EventFeed::from_json_str(
        r#"[
            {"id": "first", "date": "2026-03-05", "category": "dining"},
            {"id": "second", "date": "2026-03-05", "category": "sports"},
            {"id": "third", "date": "2026-03-06", "category": "dining"}
        ]"#,
    )
    .unwrap();
    let active = CategorySet::none().with(Category::Dining);
    let index = EventIndex::from_feed(&feed, active);

    assert_eq!(ids(index.events_on_str("2026-03-05")), vec!["first"]);
    assert_eq!(ids(index.events_on_str("2026-03-06")), vec!["third"]);

    let list = project_month_list(&index, date(2026, 3, 1));
    assert_eq!(list.buckets.len(), 2);
    assert_eq!(list.buckets[0].date, date(2026, 3, 5));
    assert_eq!(list.buckets[0].events.len(), 1);
    assert_eq!(list.buckets[1].date, date(2026, 3, 6));
    assert_eq!(list.buckets[1].events.len(), 1);
}

#[test]
fn filtering_is_monotonic() {
    let feed = sample_feed();
    let days: Vec<NaiveDate> = (0..45).map(|i| add_days(date(2026, 3, 1), i)).collect();

    let mut active = CategorySet::none();
    let mut previous = EventIndex::from_feed(&feed, active);

    for category in Category::ALL {
        active = active.with(category);
        let current = EventIndex::from_feed(&feed, active);

        for day in &days {
            let before = ids(previous.events_on(*day));
            let after = ids(current.events_on(*day));
            assert!(
                before.iter().all(|id| after.contains(id)),
                "activating {category} removed events on {day}"
            );
        }
        assert!(current.len() >= previous.len());
        previous = current;
    }
}

#[test]
fn clear_all_and_select_all() {
    let feed = sample_feed();

    let cleared = EventIndex::from_feed(&feed, CategorySet::all().clear_all());
    for i in 0..45 {
        assert!(cleared.events_on(add_days(date(2026, 3, 1), i)).is_empty());
    }

    // Everything schedulable with a known category is visible again
    let restored = EventIndex::from_feed(&feed, CategorySet::none().select_all());
    let known = feed.events().iter().filter(|e| e.category().is_some()).count();
    assert_eq!(restored.len(), known);
    assert_eq!(restored.hidden_uncategorised(), 1);
}

#[test]
fn list_buckets_account_for_every_visible_event_in_range() {
    let feed = sample_feed();
    let active = CategorySet::all().toggle(Category::Family);
    let index = EventIndex::from_feed(&feed, active);
    let list = project_month_list(&index, date(2026, 3, 14));

    let expected = feed
        .events()
        .iter()
        .filter(|e| {
            let d = e.civil_date().unwrap();
            d >= date(2026, 3, 1) && d <= date(2026, 3, 31) && active.is_active_tag(&e.category)
        })
        .count();

    assert_eq!(list.event_count(), expected);
    assert_eq!(list.event_count(), 4);

    let dates: Vec<_> = list.buckets.iter().map(|b| b.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert!(list.buckets.iter().all(|b| !b.events.is_empty()));
}

#[test]
fn projections_agree_and_report_skipped() {
    let feed = sample_feed();
    assert_eq!(feed.skipped().len(), 2);

    let active = CategorySet::all().toggle(Category::Sports);
    let index = EventIndex::from_feed(&feed, active);
    let today = date(2026, 3, 14);

    let month = project_month(&index, today, today, 1);
    let week = project_week(&index, today, today, None);
    let list = project_month_list(&index, today);

    let month_cell = month.cells.iter().find(|c| c.day.date == today).unwrap();
    let week_cell = week.days.iter().find(|c| c.day.date == today).unwrap();
    let bucket = list.buckets.iter().find(|b| b.date == today).unwrap();

    assert_eq!(month_cell.total, 1);
    assert_eq!(week_cell.total, 1);
    assert_eq!(bucket.events.len(), 1);
    assert_eq!(ids(&week_cell.events), ids(&bucket.events));

    assert_eq!(month.skipped, 2);
    assert_eq!(week.skipped, 2);
    assert_eq!(list.skipped, 2);
}

#[test]
fn month_cell_hidden_count_uses_true_total() {
    let feed = sample_feed();
    let index = EventIndex::from_feed(&feed, CategorySet::all());
    let month = project_month(&index, date(2026, 3, 1), date(2026, 3, 1), 1);

    let cell = month.cells.iter().find(|c| c.day.date == date(2026, 3, 14)).unwrap();
    assert_eq!(cell.events.len(), 1);
    assert_eq!(cell.total, 2);
    assert_eq!(cell.hidden(), 1);
}

#[test]
fn ics_export_round_trip() {
    let feed = sample_feed();
    let index = EventIndex::from_feed(&feed, CategorySet::all());
    let exporter = IcsExporter::new();

    for (day, expected) in [(date(2026, 3, 14), 2), (date(2026, 3, 2), 2), (date(2026, 3, 20), 0)] {
        let events = index.events_on(day);
        let first = exporter.export_day(day, events);
        let second = exporter.export_day(day, events);

        assert_eq!(first, second);
        assert_eq!(first.matches("BEGIN:VEVENT").count(), expected);
        assert_eq!(first.matches("BEGIN:VCALENDAR").count(), 1);
        assert_eq!(first.matches("END:VCALENDAR").count(), 1);
    }
}
