use crate::core::schedule::RaceSchedule;
use crate::core::stint::StintFlag;
use crate::core::timing::format_time;
use crate::error::Result;
use serde::Serialize;

pub const DRIVER_OK_LABEL: &str = "OK";
pub const DRIVER_SHORT_LABEL: &str = "Short";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StintView {
    pub number: u32,
    pub driver_id: u32,
    pub driver_name: String,
    pub start_time: f64,
    pub start_time_hms: String,
    pub time_minutes: f64,
    pub pit_time_minutes: f64,
    pub predicted_laps: u32,
    pub flag: StintFlag,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriverView {
    pub driver_id: u32,
    pub name: String,
    pub total_minutes: f64,
    pub total_hms: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryView {
    pub completed_count: usize,
    pub no_stints: usize,
    pub total_drive_hms: String,
    pub total_pit_hms: String,
    pub finish_time: f64,
    pub finish_hms: String,
}

/// ScheduleView contains everything a presentation layer reads from a schedule, with the times
/// already formatted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleView {
    pub stints: Vec<StintView>,
    pub drivers: Vec<DriverView>,
    pub summary: SummaryView,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &RaceSchedule) -> Result<ScheduleView> {
        let cfg = schedule.config();

        let mut stints = Vec::with_capacity(schedule.stints().len());
        for stint in schedule.stints() {
            let driver_name = schedule
                .driver_of(stint)
                .map(|d| d.name.to_owned())
                .unwrap_or_default();

            stints.push(StintView {
                number: stint.number,
                driver_id: stint.driver_id,
                driver_name,
                start_time: stint.start_time,
                start_time_hms: format_time(stint.start_time),
                time_minutes: stint.time_minutes,
                pit_time_minutes: stint.pit_time_minutes,
                predicted_laps: stint.predicted_laps(cfg.lap_time_seconds)?,
                flag: stint.length_flag(cfg),
                completed: stint.completed,
            });
        }

        let drivers = schedule
            .driver_totals()
            .into_iter()
            .map(|total| DriverView {
                driver_id: total.driver_id,
                total_hms: format_time(total.total_minutes),
                status: if total.short { DRIVER_SHORT_LABEL } else { DRIVER_OK_LABEL },
                name: total.name,
                total_minutes: total.total_minutes,
            })
            .collect();

        let summary = schedule.race_summary();

        Ok(ScheduleView {
            stints,
            drivers,
            summary: SummaryView {
                completed_count: summary.completed_count,
                no_stints: schedule.stints().len(),
                total_drive_hms: format_time(summary.total_drive_minutes),
                total_pit_hms: format_time(summary.total_pit_minutes),
                finish_time: summary.finish_time,
                finish_hms: format_time(summary.finish_time),
            },
        })
    }
}
