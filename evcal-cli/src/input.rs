//! Shared arguments: where the event snapshot comes from and how to view it.

use std::io::Read;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use evcal_core::civil_date::parse_civil_date;
use evcal_core::config::EngineConfig;
use evcal_core::controller::{CalendarState, ViewMode, set_view};
use evcal_core::{Category, CategorySet, EventFeed};

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// JSON array of events from the directory API ("-" reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub events: String,

    /// Only show these categories (repeatable; default shows all)
    #[arg(short, long = "category", value_name = "ID")]
    pub categories: Vec<Category>,

    /// Any date inside the month or week to show (defaults to today)
    #[arg(short, long, value_parser = parse_date)]
    pub anchor: Option<NaiveDate>,

    /// Treat this date as today instead of reading the clock
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

/// Everything a view command needs, loaded once.
pub struct Session {
    pub feed: EventFeed,
    pub state: CalendarState,
    pub today: NaiveDate,
}

impl Session {
    pub fn load(args: &FeedArgs, config: &EngineConfig, view: ViewMode) -> Result<Self> {
        let feed = load_feed(&args.events)?;
        let today = match args.today {
            Some(today) => today,
            None => config.today_reference()?.today(),
        };

        let mut state = set_view(CalendarState::new(today), view);
        if let Some(anchor) = args.anchor {
            state.anchor = anchor;
        }
        if !args.categories.is_empty() {
            state.active = args.categories.iter().copied().collect::<CategorySet>();
        }

        Ok(Session { feed, state, today })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_civil_date(s).ok_or_else(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

fn load_feed(source: &str) -> Result<EventFeed> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read events from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Could not read events file '{}'", source))?
    };

    let feed = EventFeed::from_json_str(&json)
        .with_context(|| format!("Could not load events from '{}'", source))?;
    Ok(feed)
}
