use crate::core::race_config::RaceConfig;
use crate::error::{Result, ScheduleError};
use serde::Serialize;
use std::fmt;

/// * `number` - 1-based position in the race, defines the race order
/// * `driver_id` - Id of the driver assigned round-robin to this stint
/// * `time_minutes` - (min) Driving time
/// * `pit_time_minutes` - (min) Pit stop after this stint, always 0 for the last stint
/// * `completed` - Set once the stint has been driven, never reset
/// * `start_time` - (min) Race time at which the stint begins, derived by the recompute pass
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Stint {
    pub number: u32,
    pub driver_id: u32,
    pub time_minutes: f64,
    pub pit_time_minutes: f64,
    pub completed: bool,
    pub start_time: f64,
}

/// Length check of a stint against the configured stint window.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum StintFlag {
    Ok,
    TooShort,
    TooLong,
}

impl fmt::Display for StintFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            StintFlag::Ok => "",
            StintFlag::TooShort => "Too Short",
            StintFlag::TooLong => "Too Long",
        };
        write!(f, "{}", label)
    }
}

impl Stint {
    /// The method returns the number of full laps that fit into the stint at the given lap time.
    pub fn predicted_laps(&self, lap_time_seconds: f64) -> Result<u32> {
        if !lap_time_seconds.is_finite() || lap_time_seconds <= 0.0 {
            return Err(ScheduleError::invalid_config(
                "lap_time_seconds",
                format!("must be a positive number, got {}", lap_time_seconds),
            ));
        }
        Ok((self.time_minutes * 60.0 / lap_time_seconds).floor() as u32)
    }

    /// The method classifies the stint length against the stint window of the configuration.
    pub fn length_flag(&self, config: &RaceConfig) -> StintFlag {
        if self.time_minutes < config.min_stint_minutes {
            StintFlag::TooShort
        } else if self.time_minutes > config.max_stint_minutes {
            StintFlag::TooLong
        } else {
            StintFlag::Ok
        }
    }

    /// The method returns the race time at which the stint ends, pit stop excluded.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.time_minutes
    }
}
