use anyhow::{Context, Result};
use chrono::NaiveDate;
use evcal_core::config::EngineConfig;
use evcal_core::controller::{DayDetail, ViewMode, select_day};
use owo_colors::OwoColorize;

use crate::input::{FeedArgs, Session};
use crate::render::{Render, render_skipped};

pub fn run(
    date: NaiveDate,
    args: &FeedArgs,
    config: &EngineConfig,
    export: bool,
    stdout: bool,
) -> Result<()> {
    let session = Session::load(args, config, ViewMode::Month)?;
    let state = select_day(session.state, date);

    let Some(detail) = DayDetail::for_state(&state, &session.feed) else {
        anyhow::bail!("No day selected");
    };

    let exporter = config.ics_exporter()?;

    if stdout {
        print!("{}", detail.export(&exporter).content);
        return Ok(());
    }

    println!("{}", summary(&detail, session.feed.skipped().len()));

    if export {
        let file = detail.export(&exporter);
        let dir = config.export_path();
        let path = file
            .write_to(&dir)
            .with_context(|| format!("Could not write {} to {}", file.filename, dir.display()))?;

        println!();
        println!("{}", format!("  Saved: {}", path.display()).green());
    }

    Ok(())
}

/// Day listing followed by the skipped-event note, if any.
fn summary(detail: &DayDetail, skipped: usize) -> String {
    let mut out = detail.render();
    if let Some(note) = render_skipped(skipped) {
        out.push_str("\n\n");
        out.push_str(&note);
    }
    out
}
