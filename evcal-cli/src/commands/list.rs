use anyhow::Result;
use evcal_core::config::EngineConfig;
use evcal_core::controller::{RenderedView, ViewMode};
use owo_colors::OwoColorize;

use crate::input::{FeedArgs, Session};
use crate::render::{Render, pluralize, render_skipped};

pub fn run(args: &FeedArgs, config: &EngineConfig) -> Result<()> {
    let session = Session::load(args, config, ViewMode::List)?;

    let RenderedView::List(view) = session.state.render(&session.feed, session.today, config) else {
        anyhow::bail!("Expected a list projection");
    };

    let heading = format!(
        "{} ({} {})",
        view.from.format("%B %Y"),
        view.event_count(),
        pluralize("event", view.event_count())
    );
    println!("{}\n", heading.bold());
    println!("{}", view.render());
    if let Some(note) = render_skipped(view.skipped) {
        println!("\n{}", note);
    }

    Ok(())
}
