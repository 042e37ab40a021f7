//! Calendar UI state and the day-detail flow.
//!
//! State is a plain value. Every transition takes the current state and
//! returns the next one, so nothing outlives a single call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategorySet};
use crate::civil_date::{add_days, shift_months};
use crate::config::EngineConfig;
use crate::event::CalendarEvent;
use crate::feed::EventFeed;
use crate::ics::{IcsExport, IcsExporter};
use crate::index::EventIndex;
use crate::projection::{ListView, MonthView, WeekView, project_month, project_month_list, project_week};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    List,
}

/// Everything the calendar screen needs to decide what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    /// Any date inside the month or week being shown
    pub anchor: NaiveDate,
    pub view: ViewMode,
    pub active: CategorySet,
    /// Day whose detail panel is open
    pub selected: Option<NaiveDate>,
}

impl CalendarState {
    /// Month view on `today` with every category active.
    pub fn new(today: NaiveDate) -> Self {
        CalendarState {
            anchor: today,
            view: ViewMode::Month,
            active: CategorySet::all(),
            selected: None,
        }
    }

    pub fn index(&self, feed: &EventFeed) -> EventIndex {
        EventIndex::from_feed(feed, self.active)
    }

    /// Project the feed through this state's view and filter.
    pub fn render(&self, feed: &EventFeed, today: NaiveDate, config: &EngineConfig) -> RenderedView {
        let index = self.index(feed);
        match self.view {
            ViewMode::Month => {
                RenderedView::Month(project_month(&index, self.anchor, today, config.month_cell_cap))
            }
            ViewMode::Week => {
                RenderedView::Week(project_week(&index, self.anchor, today, config.week_cell_cap))
            }
            ViewMode::List => RenderedView::List(project_month_list(&index, self.anchor)),
        }
    }
}

/// Output of [`CalendarState::render`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum RenderedView {
    Month(MonthView),
    Week(WeekView),
    List(ListView),
}

pub fn toggle_category(state: CalendarState, category: Category) -> CalendarState {
    CalendarState {
        active: state.active.toggle(category),
        ..state
    }
}

pub fn select_all_categories(state: CalendarState) -> CalendarState {
    CalendarState {
        active: state.active.select_all(),
        ..state
    }
}

pub fn clear_all_categories(state: CalendarState) -> CalendarState {
    CalendarState {
        active: state.active.clear_all(),
        ..state
    }
}

pub fn set_view(state: CalendarState, view: ViewMode) -> CalendarState {
    CalendarState { view, ..state }
}

/// Step forward one month (month and list views) or one week.
pub fn next_period(state: CalendarState) -> CalendarState {
    step(state, 1)
}

pub fn previous_period(state: CalendarState) -> CalendarState {
    step(state, -1)
}

fn step(state: CalendarState, direction: i32) -> CalendarState {
    let anchor = match state.view {
        ViewMode::Week => add_days(state.anchor, 7 * i64::from(direction)),
        ViewMode::Month | ViewMode::List => shift_months(state.anchor, direction),
    };
    CalendarState { anchor, ..state }
}

pub fn go_to_today(state: CalendarState, today: NaiveDate) -> CalendarState {
    CalendarState {
        anchor: today,
        ..state
    }
}

pub fn select_day(state: CalendarState, date: NaiveDate) -> CalendarState {
    CalendarState {
        selected: Some(date),
        ..state
    }
}

pub fn close_detail(state: CalendarState) -> CalendarState {
    CalendarState {
        selected: None,
        ..state
    }
}

/// The events behind a clicked day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

impl DayDetail {
    pub fn open(index: &EventIndex, date: NaiveDate) -> Self {
        DayDetail {
            date,
            events: index.events_on(date).to_vec(),
        }
    }

    /// Detail for the state's selected day, if a day is selected.
    pub fn for_state(state: &CalendarState, feed: &EventFeed) -> Option<Self> {
        let date = state.selected?;
        Some(Self::open(&state.index(feed), date))
    }

    pub fn export(&self, exporter: &IcsExporter) -> IcsExport {
        exporter.export_file(self.date, &self.events)
    }
}
