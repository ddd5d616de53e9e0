use crate::core::race_config::ConfigField;
use crate::core::schedule::RaceSchedule;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Parser, Clone, Default)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "STINTPLAN",
    about = "Driver rotation and stint timing planner for kart endurance races"
)]
pub struct PlanOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging
    #[clap(short, long)]
    pub debug: bool,

    /// Print the plan as JSON instead of tables
    #[clap(short, long)]
    pub json: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the plan parameter file (OPTIONAL: if not set, plans the default 7-hour race)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set target lap time in seconds (whole number, falls back to 75)
    #[clap(long)]
    pub lap_time: Option<String>,

    /// Set shortest allowed stint in minutes (whole number, falls back to 10)
    #[clap(long)]
    pub min_stint: Option<String>,

    /// Set longest allowed stint in minutes (whole number, falls back to 38)
    #[clap(long)]
    pub max_stint: Option<String>,

    /// Set pit stop duration in minutes (falls back to 2.0)
    #[clap(long)]
    pub pit_time: Option<String>,

    /// Set the driving time of a stint, given as <STINT>=<MINUTES>, e.g. 1=35 (repeatable)
    #[clap(short, long)]
    pub set_time: Vec<String>,

    /// Mark a stint as completed (repeatable)
    #[clap(short, long)]
    pub complete: Vec<u32>,

    /// Write the plan report to this text file
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Write the stint table to this CSV file
    #[clap(long)]
    pub csv: Option<PathBuf>,
}

impl PlanOpts {
    /// The method splits the --set-time arguments into stint numbers and raw duration texts. The
    /// duration text is passed on unparsed, the schedule reads it leniently.
    pub fn stint_time_edits(&self) -> anyhow::Result<Vec<(u32, String)>> {
        self.set_time
            .iter()
            .map(|arg| parse_stint_time_edit(arg))
            .collect()
    }

    /// apply_edits applies the edits of the options to the schedule in the order configuration,
    /// stint times, completions. Returns the number of edits ignored because their stint does not
    /// exist.
    pub fn apply_edits(&self, schedule: &mut RaceSchedule) -> anyhow::Result<usize> {
        let config_edits = [
            (ConfigField::LapTime, &self.lap_time),
            (ConfigField::PitTime, &self.pit_time),
        ];
        for (field, raw) in config_edits.iter() {
            if let Some(raw) = raw {
                schedule.set_config_field_raw(*field, raw)?;
            }
        }

        // both bounds go in one step so the window can move past its old limits
        if self.min_stint.is_some() || self.max_stint.is_some() {
            let cfg = *schedule.config();
            let min_stint = self
                .min_stint
                .as_deref()
                .map_or(cfg.min_stint_minutes, |raw| ConfigField::MinStint.parse_raw(raw));
            let max_stint = self
                .max_stint
                .as_deref()
                .map_or(cfg.max_stint_minutes, |raw| ConfigField::MaxStint.parse_raw(raw));
            schedule.set_stint_window(min_stint, max_stint)?;
        }

        let mut no_ignored = 0;
        for (stint_number, raw) in self.stint_time_edits()? {
            if schedule.stint(stint_number).is_none() {
                warn!("Stint {} does not exist, ignoring time edit", stint_number);
                no_ignored += 1;
            }
            schedule.set_stint_time(stint_number, &raw);
        }

        for &stint_number in self.complete.iter() {
            if schedule.stint(stint_number).is_none() {
                warn!("Stint {} does not exist, ignoring completion", stint_number);
                no_ignored += 1;
            }
            schedule.mark_completed(stint_number);
        }

        Ok(no_ignored)
    }
}

fn parse_stint_time_edit(arg: &str) -> anyhow::Result<(u32, String)> {
    let (number, raw) = arg
        .split_once('=')
        .with_context(|| format!("Stint time edit {:?} is not of the form STINT=MINUTES!", arg))?;
    let number = number
        .trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid stint number in {:?}!", arg))?;
    Ok((number, raw.to_owned()))
}
