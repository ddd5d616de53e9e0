use crate::core::driver::DriverPars;
use crate::core::race_config::RaceConfig;
use anyhow::Context;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::path::Path;

pub const DEFAULT_NO_DRIVERS: u32 = 3;
pub const DEFAULT_NO_STINTS: u32 = 14;
pub const DEFAULT_STINT_MINUTES: f64 = 28.5;

/// PlanPars is used to store everything required to set up a planning session.
///
/// * `race_config` - Lap time, stint window and pit time
/// * `drivers` - Drivers in rotation order
/// * `no_stints` - Number of stints of the race
/// * `default_stint_minutes` - (min) Initial driving time of every stint
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlanPars {
    #[serde(default)]
    pub race_config: RaceConfig,
    #[serde(default = "default_drivers")]
    pub drivers: Vec<DriverPars>,
    #[serde(default = "default_no_stints")]
    pub no_stints: u32,
    #[serde(default = "default_stint_minutes")]
    pub default_stint_minutes: f64,
}

fn default_drivers() -> Vec<DriverPars> {
    DriverPars::default_roster(DEFAULT_NO_DRIVERS)
}

fn default_no_stints() -> u32 {
    DEFAULT_NO_STINTS
}

fn default_stint_minutes() -> f64 {
    DEFAULT_STINT_MINUTES
}

impl Default for PlanPars {
    fn default() -> Self {
        PlanPars {
            race_config: RaceConfig::default(),
            drivers: default_drivers(),
            no_stints: DEFAULT_NO_STINTS,
            default_stint_minutes: DEFAULT_STINT_MINUTES,
        }
    }
}

impl PlanPars {
    pub fn driver_ids(&self) -> Vec<u32> {
        self.drivers.iter().map(|d| d.id).collect()
    }
}

/// parse_plan_pars decodes plan parameters from a JSON string. Missing fields take the defaults of
/// the 7-hour race, so "{}" is a complete parameter set.
pub fn parse_plan_pars(json: &str) -> anyhow::Result<PlanPars> {
    let pars = serde_json::from_str(json).context("Failed to parse plan parameters!")?;
    Ok(pars)
}

/// read_plan_pars reads the JSON file and decodes the JSON string into the plan parameters
/// struct.
pub fn read_plan_pars(filepath: &Path) -> anyhow::Result<PlanPars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .with_context(|| format!("Failed to open parameter file {}!", filepath.display()))?;
    let pars = serde_json::from_reader(&fh)
        .with_context(|| format!("Failed to parse parameter file {}!", filepath.display()))?;
    Ok(pars)
}
