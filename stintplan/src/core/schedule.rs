use crate::core::driver::{Driver, DriverPars};
use crate::core::race_config::{ConfigField, RaceConfig};
use crate::core::stint::{Stint, StintFlag};
use crate::core::timing::{self, DriverTotal, RaceSummary};
use crate::error::{Result, ScheduleError};
use crate::pre::read_plan_pars::PlanPars;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// RaceSchedule owns the race configuration, the drivers and the stints of one planning session.
/// Every mutating method restores the start time invariant before it returns, so all reads see a
/// consistent schedule.
///
/// ```
/// use stintplan::{format_time, RaceSchedule};
///
/// let mut schedule = RaceSchedule::default();
/// schedule.set_stint_time(1, "35");
/// assert_eq!(schedule.stint(2).unwrap().start_time, 37.0);
/// assert_eq!(format_time(schedule.race_summary().finish_time), "07:11:30");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSchedule {
    config: RaceConfig,
    drivers: Vec<Driver>,
    stints: Vec<Stint>,
}

impl Default for RaceSchedule {
    fn default() -> Self {
        let plan_pars = PlanPars::default();
        RaceSchedule {
            config: plan_pars.race_config,
            drivers: plan_pars.drivers.iter().map(Driver::new).collect(),
            stints: timing::initialize_stints(
                &plan_pars.driver_ids(),
                plan_pars.no_stints,
                plan_pars.race_config.pit_time_minutes,
                plan_pars.default_stint_minutes,
            ),
        }
    }
}

impl RaceSchedule {
    /// new validates the configuration and the driver list and creates `no_stints` stints of
    /// `default_stint_minutes` each, rotating the drivers in list order.
    pub fn new(
        config: RaceConfig,
        drivers_pars: &[DriverPars],
        no_stints: u32,
        default_stint_minutes: f64,
    ) -> Result<RaceSchedule> {
        config.validate()?;
        check_drivers(drivers_pars)?;

        if !default_stint_minutes.is_finite() || default_stint_minutes < 0.0 {
            return Err(ScheduleError::invalid_plan(format!(
                "default stint time must be a non-negative number, got {}",
                default_stint_minutes
            )));
        }

        let drivers: Vec<Driver> = drivers_pars.iter().map(Driver::new).collect();
        let driver_ids: Vec<u32> = drivers.iter().map(|d| d.id).collect();
        let stints = timing::initialize_stints(
            &driver_ids,
            no_stints,
            config.pit_time_minutes,
            default_stint_minutes,
        );

        info!(
            "Planned {} stints of {:.1} min for {} drivers",
            stints.len(),
            default_stint_minutes,
            drivers.len()
        );

        Ok(RaceSchedule {
            config,
            drivers,
            stints,
        })
    }

    pub fn from_plan_pars(plan_pars: &PlanPars) -> Result<RaceSchedule> {
        RaceSchedule::new(
            plan_pars.race_config,
            &plan_pars.drivers,
            plan_pars.no_stints,
            plan_pars.default_stint_minutes,
        )
    }

    // ---------------------------------------------------------------------------------------------
    // READ ACCESS ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn stints(&self) -> &[Stint] {
        &self.stints
    }

    pub fn stint(&self, stint_number: u32) -> Option<&Stint> {
        self.stints.iter().find(|s| s.number == stint_number)
    }

    pub fn driver_of(&self, stint: &Stint) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == stint.driver_id)
    }

    pub fn driver_totals(&self) -> Vec<DriverTotal> {
        timing::driver_totals(&self.stints, &self.drivers)
    }

    pub fn race_summary(&self) -> RaceSummary {
        timing::race_summary(&self.stints)
    }

    /// The method returns the predicted laps of the given stint at the configured lap time, or
    /// None for an unknown stint.
    pub fn predicted_laps(&self, stint_number: u32) -> Result<Option<u32>> {
        self.stint(stint_number)
            .map(|s| s.predicted_laps(self.config.lap_time_seconds))
            .transpose()
    }

    pub fn stint_flag(&self, stint_number: u32) -> Option<StintFlag> {
        self.stint(stint_number).map(|s| s.length_flag(&self.config))
    }

    /// The method returns the number of stints outside the configured stint window.
    pub fn no_flagged_stints(&self) -> usize {
        self.stints
            .iter()
            .filter(|s| s.length_flag(&self.config) != StintFlag::Ok)
            .count()
    }

    // ---------------------------------------------------------------------------------------------
    // MUTATIONS -----------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// set_stint_time applies a duration edit given as input text. Text without a usable number
    /// sets the stint to 0 minutes; unknown stint numbers are ignored.
    pub fn set_stint_time(&mut self, stint_number: u32, raw: &str) {
        timing::set_stint_time(&mut self.stints, stint_number, raw);
    }

    pub fn mark_completed(&mut self, stint_number: u32) {
        timing::mark_completed(&mut self.stints, stint_number);
    }

    /// set_config_field replaces one configuration value. An update that would leave the
    /// configuration invalid is rejected and the previous configuration is kept. A new pit time is
    /// applied to every stint but the last.
    pub fn set_config_field(&mut self, field: ConfigField, value: f64) -> Result<()> {
        let config = self.config.with(field, value);
        if let Err(e) = config.validate() {
            warn!("Rejected update of {} to {}: {}", field, value, e);
            return Err(e);
        }

        debug!("Config {} {} -> {}", field, self.config.get(field), value);
        self.apply_config(config);
        Ok(())
    }

    /// set_config_field_raw parses input text for the field (see [`ConfigField::parse_raw`]) and
    /// applies the result like [`RaceSchedule::set_config_field`].
    pub fn set_config_field_raw(&mut self, field: ConfigField, raw: &str) -> Result<()> {
        self.set_config_field(field, field.parse_raw(raw))
    }

    /// set_stint_window replaces both stint bounds in one step, so the window can be moved past
    /// its old bounds.
    pub fn set_stint_window(&mut self, min_stint_minutes: f64, max_stint_minutes: f64) -> Result<()> {
        let config = self
            .config
            .with(ConfigField::MinStint, min_stint_minutes)
            .with(ConfigField::MaxStint, max_stint_minutes);
        config.validate()?;

        debug!(
            "Stint window [{}, {}] -> [{}, {}]",
            self.config.min_stint_minutes,
            self.config.max_stint_minutes,
            min_stint_minutes,
            max_stint_minutes
        );
        self.apply_config(config);
        Ok(())
    }

    fn apply_config(&mut self, config: RaceConfig) {
        let pit_changed = config.pit_time_minutes != self.config.pit_time_minutes;
        self.config = config;

        if pit_changed {
            timing::reset_pit_times(&mut self.stints, self.config.pit_time_minutes);
        } else {
            timing::recompute_start_times(&mut self.stints);
        }
    }
}

fn check_drivers(drivers_pars: &[DriverPars]) -> Result<()> {
    if drivers_pars.is_empty() {
        return Err(ScheduleError::invalid_plan("at least one driver is required"));
    }

    let mut seen = HashSet::with_capacity(drivers_pars.len());
    for driver_pars in drivers_pars.iter() {
        if driver_pars.id == 0 {
            return Err(ScheduleError::invalid_plan(format!(
                "driver {:?} has id 0, ids start at 1",
                driver_pars.name
            )));
        }
        if !seen.insert(driver_pars.id) {
            return Err(ScheduleError::invalid_plan(format!(
                "driver id {} is used more than once",
                driver_pars.id
            )));
        }
    }

    Ok(())
}
