use serde::{Deserialize, Serialize};

/// * `id` - Driver id, small positive integer, e.g. 1
/// * `name` - Display name, e.g. Driver 1
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DriverPars {
    pub id: u32,
    pub name: String,
}

impl DriverPars {
    /// default_roster returns `no_drivers` drivers with ids 1..=no_drivers named "Driver <id>".
    pub fn default_roster(no_drivers: u32) -> Vec<DriverPars> {
        (1..=no_drivers)
            .map(|id| DriverPars {
                id,
                name: format!("Driver {}", id),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Driver {
    pub id: u32,
    pub name: String,
}

impl Driver {
    pub fn new(driver_pars: &DriverPars) -> Driver {
        Driver {
            id: driver_pars.id,
            name: driver_pars.name.to_owned(),
        }
    }
}
