use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Deserialize;

use crate::calendar::density::FullDayThreshold;
use crate::error::{Error, Result};
use crate::theme::ThemeConfig;

pub const APP_NAME: &str = "busy-calendar";

/// Recognized picker options. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub week_start: Weekday,
    pub full_day_threshold: FullDayThreshold,
    /// Only a date is picked; the time row is hidden.
    pub date_only: bool,
    /// Show the selected day's events beside the month grid.
    pub expanded: bool,
    pub minute_step: u32,
    pub simulated_now: Option<NaiveDateTime>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            full_day_threshold: FullDayThreshold::default(),
            date_only: false,
            expanded: true,
            minute_step: 5,
            simulated_now: None,
        }
    }
}

impl SelectorConfig {
    pub fn builder() -> SelectorConfigBuilder {
        SelectorConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectorConfigBuilder {
    week_start: Option<Weekday>,
    full_day_threshold: Option<u32>,
    date_only: Option<bool>,
    expanded: Option<bool>,
    minute_step: Option<u32>,
    simulated_now: Option<NaiveDateTime>,
}

impl SelectorConfigBuilder {
    pub fn week_start(mut self, day: Weekday) -> Self {
        self.week_start = Some(day);
        self
    }

    pub fn full_day_threshold(mut self, events: u32) -> Self {
        self.full_day_threshold = Some(events);
        self
    }

    pub fn date_only(mut self, date_only: bool) -> Self {
        self.date_only = Some(date_only);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn minute_step(mut self, minutes: u32) -> Self {
        self.minute_step = Some(minutes);
        self
    }

    pub fn simulated_now(mut self, now: NaiveDateTime) -> Self {
        self.simulated_now = Some(now);
        self
    }

    /// Layers `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: SelectorConfigBuilder) -> Self {
        Self {
            week_start: other.week_start.or(self.week_start),
            full_day_threshold: other.full_day_threshold.or(self.full_day_threshold),
            date_only: other.date_only.or(self.date_only),
            expanded: other.expanded.or(self.expanded),
            minute_step: other.minute_step.or(self.minute_step),
            simulated_now: other.simulated_now.or(self.simulated_now),
        }
    }

    pub fn build(self) -> Result<SelectorConfig> {
        let defaults = SelectorConfig::default();

        let full_day_threshold = match self.full_day_threshold {
            Some(n) => FullDayThreshold::new(n)?,
            None => defaults.full_day_threshold,
        };

        let minute_step = self.minute_step.unwrap_or(defaults.minute_step);
        if !(1..=60).contains(&minute_step) {
            return Err(Error::Config(format!(
                "minute_step must be between 1 and 60, got {minute_step}"
            )));
        }

        Ok(SelectorConfig {
            week_start: self.week_start.unwrap_or(defaults.week_start),
            full_day_threshold,
            date_only: self.date_only.unwrap_or(defaults.date_only),
            expanded: self.expanded.unwrap_or(defaults.expanded),
            minute_step,
            simulated_now: self.simulated_now.or(defaults.simulated_now),
        })
    }
}

/// On-disk `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    week_start: Option<String>,
    full_day_threshold: Option<FullDayThreshold>,
    date_only: Option<bool>,
    expanded: Option<bool>,
    minute_step: Option<u32>,
    simulated_now: Option<String>,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl ConfigFile {
    /// Reads `path`, or the default location when `path` is `None`. A missing
    /// default file yields an empty config; a missing explicit one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(Error::Config(format!("{} not found", path.display())));
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let file = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(file)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_builder(&self) -> Result<SelectorConfigBuilder> {
        let mut builder = SelectorConfigBuilder::default();
        if let Some(day) = self.week_start.as_deref() {
            builder = builder.week_start(parse_weekday(day)?);
        }
        if let Some(threshold) = self.full_day_threshold {
            builder = builder.full_day_threshold(threshold.get());
        }
        if let Some(v) = self.date_only {
            builder = builder.date_only(v);
        }
        if let Some(v) = self.expanded {
            builder = builder.expanded(v);
        }
        if let Some(v) = self.minute_step {
            builder = builder.minute_step(v);
        }
        if let Some(now) = self.simulated_now.as_deref() {
            builder = builder.simulated_now(parse_instant(now)?);
        }
        Ok(builder)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}

/// Accepts full or three-letter weekday names in any case.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| Error::Config(format!("unknown weekday '{s}'")))
}

/// `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`, or a bare date (midnight).
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| Error::Config(format!("invalid date/time '{s}'")))
}
