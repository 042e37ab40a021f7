use anyhow::Result;
use evcal_core::config::EngineConfig;
use evcal_core::controller::{RenderedView, ViewMode};

use crate::input::{FeedArgs, Session};
use crate::render::{Render, render_skipped};

pub fn run(args: &FeedArgs, config: &EngineConfig) -> Result<()> {
    let session = Session::load(args, config, ViewMode::Week)?;

    let RenderedView::Week(view) = session.state.render(&session.feed, session.today, config) else {
        anyhow::bail!("Expected a week projection");
    };

    println!("{}", view.render());
    if let Some(note) = render_skipped(view.skipped) {
        println!("\n{}", note);
    }

    Ok(())
}
