use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use life_timeline::{TimelineConfig, TimelineSpan, UndatedPolicy};
use tracing::debug;

/// First year of the span when neither a config file nor `--from` gives one.
pub const DEFAULT_START_YEAR: i32 = 1990;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub reject_undated: bool,
}

/// Load the timeline config from `path` (TOML) if given, then apply overrides.
///
/// Without a file the span runs from [`DEFAULT_START_YEAR`] through the
/// current year and undated events go to the bucket.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<TimelineConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: TimelineConfig = toml::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            debug!(path = %path.display(), ?config, "loaded config file");
            config
        }
        None => {
            let current_year = Utc::now().year();
            let span = TimelineSpan::new(DEFAULT_START_YEAR, current_year.max(DEFAULT_START_YEAR))?;
            TimelineConfig::new(span)
        }
    };

    if overrides.from.is_some() || overrides.to.is_some() {
        let start = overrides.from.unwrap_or(config.span.start_year());
        let end = overrides.to.unwrap_or(config.span.end_year());
        config.span = TimelineSpan::new(start, end)
            .with_context(|| format!("Invalid span {}..={}", start, end))?;
    }
    if overrides.reject_undated {
        config.undated = UndatedPolicy::Reject;
    }

    debug!(
        start = config.span.start_year(),
        end = config.span.end_year(),
        undated = ?config.undated,
        "resolved timeline config"
    );
    Ok(config)
}
