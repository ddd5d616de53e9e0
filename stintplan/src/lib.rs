pub mod core;
pub mod error;
pub mod interfaces;
pub mod post;
pub mod pre;

pub use crate::core::driver::{Driver, DriverPars};
pub use crate::core::race_config::{ConfigField, RaceConfig};
pub use crate::core::schedule::RaceSchedule;
pub use crate::core::stint::{Stint, StintFlag};
pub use crate::core::timing::{format_time, DriverTotal, RaceSummary, MIN_DRIVER_TOTAL_MINUTES};
pub use crate::error::{Result, ScheduleError};
pub use crate::interfaces::view_interface::ScheduleView;
pub use crate::pre::read_plan_pars::PlanPars;
