use crate::error::{Result, ScheduleError};
use helpers::general::{parse_float_prefix, parse_int_prefix};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LAP_TIME_SECONDS: f64 = 75.0;
pub const DEFAULT_MIN_STINT_MINUTES: f64 = 10.0;
pub const DEFAULT_MAX_STINT_MINUTES: f64 = 38.0;
pub const DEFAULT_PIT_TIME_MINUTES: f64 = 2.0;

/// * `lap_time_seconds` - (s) Target lap time, used to predict the laps of a stint
/// * `min_stint_minutes` - (min) Shortest allowed stint
/// * `max_stint_minutes` - (min) Longest allowed stint
/// * `pit_time_minutes` - (min) Pit stop duration applied after every stint but the last
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct RaceConfig {
    #[serde(default = "default_lap_time_seconds")]
    pub lap_time_seconds: f64,
    #[serde(default = "default_min_stint_minutes")]
    pub min_stint_minutes: f64,
    #[serde(default = "default_max_stint_minutes")]
    pub max_stint_minutes: f64,
    #[serde(default = "default_pit_time_minutes")]
    pub pit_time_minutes: f64,
}

fn default_lap_time_seconds() -> f64 {
    DEFAULT_LAP_TIME_SECONDS
}

fn default_min_stint_minutes() -> f64 {
    DEFAULT_MIN_STINT_MINUTES
}

fn default_max_stint_minutes() -> f64 {
    DEFAULT_MAX_STINT_MINUTES
}

fn default_pit_time_minutes() -> f64 {
    DEFAULT_PIT_TIME_MINUTES
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            lap_time_seconds: DEFAULT_LAP_TIME_SECONDS,
            min_stint_minutes: DEFAULT_MIN_STINT_MINUTES,
            max_stint_minutes: DEFAULT_MAX_STINT_MINUTES,
            pit_time_minutes: DEFAULT_PIT_TIME_MINUTES,
        }
    }
}

/// Editable configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    LapTime,
    MinStint,
    MaxStint,
    PitTime,
}

impl ConfigField {
    fn name(&self) -> &'static str {
        match self {
            ConfigField::LapTime => "lap_time_seconds",
            ConfigField::MinStint => "min_stint_minutes",
            ConfigField::MaxStint => "max_stint_minutes",
            ConfigField::PitTime => "pit_time_minutes",
        }
    }

    /// The value an input field falls back to when its text holds no usable number.
    pub fn fallback(&self) -> f64 {
        match self {
            ConfigField::LapTime => DEFAULT_LAP_TIME_SECONDS,
            ConfigField::MinStint => DEFAULT_MIN_STINT_MINUTES,
            ConfigField::MaxStint => DEFAULT_MAX_STINT_MINUTES,
            ConfigField::PitTime => DEFAULT_PIT_TIME_MINUTES,
        }
    }

    /// parse_raw converts input text to a field value. Lap time and stint bounds are whole
    /// numbers (leading integer of the text), pit time is decimal. Missing numbers and zero fall
    /// back to the field default; anything else is returned as is and left to validation.
    pub fn parse_raw(&self, raw: &str) -> f64 {
        let parsed = match self {
            ConfigField::PitTime => parse_float_prefix(raw),
            _ => parse_int_prefix(raw).map(|v| v as f64),
        };

        match parsed {
            Some(v) if v != 0.0 => v,
            _ => self.fallback(),
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl RaceConfig {
    pub fn get(&self, field: ConfigField) -> f64 {
        match field {
            ConfigField::LapTime => self.lap_time_seconds,
            ConfigField::MinStint => self.min_stint_minutes,
            ConfigField::MaxStint => self.max_stint_minutes,
            ConfigField::PitTime => self.pit_time_minutes,
        }
    }

    /// with returns a copy of the configuration with one field replaced. The copy is not
    /// validated.
    pub fn with(&self, field: ConfigField, value: f64) -> RaceConfig {
        let mut cfg = *self;
        match field {
            ConfigField::LapTime => cfg.lap_time_seconds = value,
            ConfigField::MinStint => cfg.min_stint_minutes = value,
            ConfigField::MaxStint => cfg.max_stint_minutes = value,
            ConfigField::PitTime => cfg.pit_time_minutes = value,
        }
        cfg
    }

    /// validate checks that lap time and stint bounds are positive, pit time is non-negative, all
    /// values are finite and the stint window is not inverted.
    pub fn validate(&self) -> Result<()> {
        check_positive(ConfigField::LapTime, self.lap_time_seconds)?;
        check_positive(ConfigField::MinStint, self.min_stint_minutes)?;
        check_positive(ConfigField::MaxStint, self.max_stint_minutes)?;

        if !self.pit_time_minutes.is_finite() || self.pit_time_minutes < 0.0 {
            return Err(ScheduleError::invalid_config(
                ConfigField::PitTime.name(),
                format!("must be a non-negative number, got {}", self.pit_time_minutes),
            ));
        }

        if self.min_stint_minutes > self.max_stint_minutes {
            return Err(ScheduleError::invalid_config(
                ConfigField::MinStint.name(),
                format!(
                    "must not exceed max_stint_minutes ({} > {})",
                    self.min_stint_minutes, self.max_stint_minutes
                ),
            ));
        }

        Ok(())
    }
}

fn check_positive(field: ConfigField, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::invalid_config(
            field.name(),
            format!("must be a positive number, got {}", value),
        ))
    }
}
