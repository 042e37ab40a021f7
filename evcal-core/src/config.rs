//! Engine configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::civil_date::TodayReference;
use crate::error::{CalendarError, CalendarResult};
use crate::ics::{DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN, IcsExporter};
use crate::projection::DEFAULT_MONTH_CELL_CAP;

static DEFAULT_EXPORT_DIR: &str = ".";

fn default_month_cell_cap() -> usize {
    DEFAULT_MONTH_CELL_CAP
}

fn default_filename_prefix() -> String {
    "events".to_string()
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_event_duration() -> String {
    "2h".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Settings at ~/.config/evcal/config.toml, overridable with `EVCAL_*`
/// environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// IANA zone that decides "today"; unset means the host's local zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_timezone: Option<String>,

    #[serde(default = "default_month_cell_cap")]
    pub month_cell_cap: usize,

    /// Unset shows every event in week columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_cell_cap: Option<usize>,

    #[serde(default = "default_filename_prefix")]
    pub ics_filename_prefix: String,

    #[serde(default = "default_product_id")]
    pub ics_product_id: String,

    #[serde(default = "default_uid_domain")]
    pub ics_uid_domain: String,

    /// humantime duration given to exported events with a start time
    #[serde(default = "default_event_duration")]
    pub default_event_duration: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            today_timezone: None,
            month_cell_cap: default_month_cell_cap(),
            week_cell_cap: None,
            ics_filename_prefix: default_filename_prefix(),
            ics_product_id: default_product_id(),
            ics_uid_domain: default_uid_domain(),
            default_event_duration: default_event_duration(),
            public_base_url: None,
            export_dir: default_export_dir(),
        }
    }
}

impl EngineConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("evcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there
    /// first if nothing exists yet.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        let config: EngineConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("EVCAL").try_parsing(true))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# evcal configuration

# Zone that decides which day is \"today\" (defaults to this machine's zone):
# today_timezone = \"Europe/Lisbon\"

# Events shown per month cell before \"+N more\":
# month_cell_cap = {}

# Events shown per week column (unset shows all):
# week_cell_cap = 10

# Exported files are named <prefix>-YYYY-MM-DD.ics:
# ics_filename_prefix = \"events\"

# Length given to exported events that have a start time:
# default_event_duration = \"2h\"

# Link exported events to their pages:
# public_base_url = \"https://example.com\"

# Where exported .ics files are written:
# export_dir = \"{}\"
",
            DEFAULT_MONTH_CELL_CAP, DEFAULT_EXPORT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    fn validate(&self) -> CalendarResult<()> {
        self.today_reference()?;
        self.event_duration()?;
        Ok(())
    }

    pub fn today_reference(&self) -> CalendarResult<TodayReference> {
        match self.today_timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(TodayReference::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(TodayReference::Zone)
                .map_err(|_| CalendarError::Config(format!("Unknown timezone '{}'", name))),
        }
    }

    pub fn event_duration(&self) -> CalendarResult<Duration> {
        let std_dur = humantime::parse_duration(&self.default_event_duration).map_err(|e| {
            CalendarError::Config(format!(
                "Invalid default_event_duration '{}': {}",
                self.default_event_duration, e
            ))
        })?;
        Duration::from_std(std_dur)
            .map_err(|_| CalendarError::Config("default_event_duration is too large".into()))
    }

    /// `export_dir` with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn ics_exporter(&self) -> CalendarResult<IcsExporter> {
        let exporter = IcsExporter::new()
            .with_product_id(&self.ics_product_id)
            .with_uid_domain(&self.ics_uid_domain)
            .with_default_duration(self.event_duration()?)
            .with_filename_prefix(&self.ics_filename_prefix);

        Ok(match &self.public_base_url {
            Some(base) => exporter.with_public_base_url(base),
            None => exporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from(&tmp.path().join("missing.toml")).unwrap();

        assert_eq!(config.month_cell_cap, 3);
        assert_eq!(config.week_cell_cap, None);
        assert_eq!(config.ics_filename_prefix, "events");
        assert_eq!(config.today_reference().unwrap(), TodayReference::Local);
        assert_eq!(config.event_duration().unwrap(), Duration::hours(2));
    }

    #[test]
    fn default_template_loads_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("evcal").join("config.toml");
        EngineConfig::create_default_config(&path).unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.month_cell_cap, EngineConfig::default().month_cell_cap);
        assert_eq!(config.ics_product_id, EngineConfig::default().ics_product_id);
    }

    #[test]
    fn reads_values_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
today_timezone = "America/New_York"
month_cell_cap = 2
week_cell_cap = 8
ics_filename_prefix = "whats-on"
default_event_duration = "90m"
public_base_url = "https://guide.example"
"#,
        )
        .unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.month_cell_cap, 2);
        assert_eq!(config.week_cell_cap, Some(8));
        assert_eq!(
            config.today_reference().unwrap(),
            TodayReference::Zone(chrono_tz::America::New_York)
        );
        assert_eq!(config.event_duration().unwrap(), Duration::minutes(90));

        let exporter = config.ics_exporter().unwrap();
        assert_eq!(exporter.filename_prefix(), "whats-on");
    }

    #[test]
    fn rejects_unknown_timezone() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "today_timezone = \"Mars/Olympus\"\n").unwrap();

        let err = EngineConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn rejects_bad_duration() {
        let config = EngineConfig {
            default_event_duration: "a while".into(),
            ..EngineConfig::default()
        };
        assert!(config.event_duration().is_err());
        assert!(config.ics_exporter().is_err());
    }
}
