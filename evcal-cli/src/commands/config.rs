use anyhow::Result;
use evcal_core::civil_date::{TodayReference, format_civil_date};
use evcal_core::config::EngineConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EngineConfig) -> Result<()> {
    let config_path = EngineConfig::config_path()?;
    let today_ref = config.today_reference()?;

    let zone = match today_ref {
        TodayReference::Zone(tz) => tz.name().to_string(),
        TodayReference::Local => {
            let host = iana_time_zone::get_timezone().unwrap_or_else(|_| "unknown".to_string());
            format!("{} (host)", host)
        }
    };

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Exports:  {}", config.export_path().display());
    println!();
    println!("{}", "Today".bold());
    println!("  Zone:     {}", zone);
    println!("  Date:     {}", format_civil_date(today_ref.today()));
    println!();
    println!("{}", "Settings".bold());
    println!("{}", serde_json::to_string_pretty(config)?);

    Ok(())
}
