pub mod driver;
pub mod race_config;
pub mod schedule;
pub mod stint;
pub mod timing;
