use crate::core::driver::Driver;
use crate::core::stint::Stint;
use helpers::general::parse_float_prefix;
use serde::Serialize;
use tracing::{debug, warn};

pub use helpers::general::format_hms as format_time;

/// (min) Drivers with less total driving time than this are flagged as short.
pub const MIN_DRIVER_TOTAL_MINUTES: f64 = 100.0;

/// * `driver_id` - Driver id
/// * `name` - Driver name
/// * `total_minutes` - (min) Sum of the driving times of all stints of the driver
/// * `short` - True if `total_minutes` is below [`MIN_DRIVER_TOTAL_MINUTES`]
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DriverTotal {
    pub driver_id: u32,
    pub name: String,
    pub total_minutes: f64,
    pub short: bool,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct RaceSummary {
    pub completed_count: usize,
    pub total_drive_minutes: f64,
    pub total_pit_minutes: f64,
    pub finish_time: f64,
}

/// round_robin_slot returns the 0-based index into the driver list for the stint with the given
/// 1-based number.
pub fn round_robin_slot(stint_number: u32, no_drivers: usize) -> usize {
    (stint_number as usize - 1) % no_drivers
}

/// initialize_stints creates `no_stints` stints numbered from 1, assigns the drivers round-robin
/// in list order and gives every stint the same driving time. All stints but the last get the
/// given pit time. An empty driver list yields no stints.
pub fn initialize_stints(
    driver_ids: &[u32],
    no_stints: u32,
    pit_time_minutes: f64,
    default_time_minutes: f64,
) -> Vec<Stint> {
    if driver_ids.is_empty() {
        return Vec::new();
    }

    let mut stints: Vec<Stint> = (1..=no_stints)
        .map(|number| Stint {
            number,
            driver_id: driver_ids[round_robin_slot(number, driver_ids.len())],
            time_minutes: default_time_minutes,
            pit_time_minutes: if number < no_stints { pit_time_minutes } else { 0.0 },
            completed: false,
            start_time: 0.0,
        })
        .collect();

    recompute_start_times(&mut stints);
    stints
}

/// recompute_start_times sets the start time of every stint to the accumulated driving and pit
/// time of all stints before it. Every mutating function of this module ends with this pass.
pub fn recompute_start_times(stints: &mut [Stint]) {
    let mut cur_time = 0.0;
    for stint in stints.iter_mut() {
        stint.start_time = cur_time;
        cur_time += stint.time_minutes + stint.pit_time_minutes;
    }
}

/// parse_stint_time converts the text of a duration input to minutes. Text without a usable
/// number, non-finite values and negative values all become 0, so an edit is never rejected.
pub fn parse_stint_time(raw: &str) -> f64 {
    match parse_float_prefix(raw) {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        Some(v) if v.is_finite() => {
            warn!("Negative stint time {} replaced by 0", v);
            0.0
        }
        _ => {
            if !raw.trim().is_empty() {
                warn!("Could not read stint time from {:?}, using 0", raw);
            }
            0.0
        }
    }
}

/// set_stint_time updates the driving time of the stint with the given number and recomputes
/// the start times. Unknown stint numbers are ignored. Completed stints are updated as well,
/// locking them is up to the caller.
pub fn set_stint_time(stints: &mut [Stint], stint_number: u32, raw: &str) {
    let time_minutes = parse_stint_time(raw);

    match stints.iter_mut().find(|s| s.number == stint_number) {
        Some(stint) => {
            debug!(
                "Stint {} time {:.2} -> {:.2} min",
                stint_number, stint.time_minutes, time_minutes
            );
            stint.time_minutes = time_minutes;
        }
        None => debug!("Ignoring time update for unknown stint {}", stint_number),
    }

    recompute_start_times(stints);
}

/// mark_completed flags the stint with the given number as driven. Calling it again has no
/// effect, unknown stint numbers are ignored.
pub fn mark_completed(stints: &mut [Stint], stint_number: u32) {
    match stints.iter_mut().find(|s| s.number == stint_number) {
        Some(stint) => {
            if !stint.completed {
                debug!("Stint {} completed", stint_number);
            }
            stint.completed = true;
        }
        None => debug!("Ignoring completion of unknown stint {}", stint_number),
    }
}

/// reset_pit_times applies the pit time to every stint but the last one, which keeps 0, and
/// recomputes the start times.
pub fn reset_pit_times(stints: &mut [Stint], pit_time_minutes: f64) {
    let no_stints = stints.len();
    for (i, stint) in stints.iter_mut().enumerate() {
        stint.pit_time_minutes = if i + 1 < no_stints { pit_time_minutes } else { 0.0 };
    }

    recompute_start_times(stints);
}

/// driver_totals returns the total driving time of every driver, in the order of the driver list.
pub fn driver_totals(stints: &[Stint], drivers: &[Driver]) -> Vec<DriverTotal> {
    drivers
        .iter()
        .map(|driver| {
            let total_minutes: f64 = stints
                .iter()
                .filter(|s| s.driver_id == driver.id)
                .map(|s| s.time_minutes)
                .sum();

            DriverTotal {
                driver_id: driver.id,
                name: driver.name.to_owned(),
                total_minutes,
                short: total_minutes < MIN_DRIVER_TOTAL_MINUTES,
            }
        })
        .collect()
}

/// race_summary aggregates the stint sequence. The finish time is the end of the last stint, or 0
/// for an empty sequence.
pub fn race_summary(stints: &[Stint]) -> RaceSummary {
    RaceSummary {
        completed_count: stints.iter().filter(|s| s.completed).count(),
        total_drive_minutes: stints.iter().map(|s| s.time_minutes).sum(),
        total_pit_minutes: stints.iter().map(|s| s.pit_time_minutes).sum(),
        finish_time: stints.last().map(Stint::end_time).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::DriverPars;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn roster() -> Vec<Driver> {
        DriverPars::default_roster(3).iter().map(Driver::new).collect()
    }

    fn baseline() -> Vec<Stint> {
        initialize_stints(&[1, 2, 3], 14, 2.0, 28.5)
    }

    fn arb_stints() -> impl Strategy<Value = Vec<Stint>> {
        prop::collection::vec((0.0f64..60.0, 0.0f64..5.0, 0.0f64..500.0), 0..30).prop_map(|v| {
            v.into_iter()
                .enumerate()
                .map(|(i, (time_minutes, pit_time_minutes, start_time))| Stint {
                    number: i as u32 + 1,
                    driver_id: 1,
                    time_minutes,
                    pit_time_minutes,
                    completed: false,
                    start_time,
                })
                .collect::<Vec<Stint>>()
        })
    }

    #[test]
    fn drivers_rotate_round_robin() {
        let stints = baseline();
        assert_eq!(stints.len(), 14);
        for stint in stints.iter() {
            assert_eq!(stint.driver_id, (stint.number - 1) % 3 + 1);
        }
        let driver_1: Vec<u32> = stints
            .iter()
            .filter(|s| s.driver_id == 1)
            .map(|s| s.number)
            .collect();
        assert_eq!(driver_1, vec![1, 4, 7, 10, 13]);
    }

    #[test]
    fn last_stint_has_no_pit_stop() {
        let stints = baseline();
        for stint in &stints[..13] {
            assert_relative_eq!(stint.pit_time_minutes, 2.0);
        }
        assert_relative_eq!(stints[13].pit_time_minutes, 0.0);
        assert!(stints.iter().all(|s| !s.completed));
    }

    #[test]
    fn empty_driver_list_yields_no_stints() {
        assert!(initialize_stints(&[], 14, 2.0, 28.5).is_empty());
    }

    #[test]
    fn time_edit_moves_later_start_times() {
        let mut stints = baseline();
        set_stint_time(&mut stints, 1, "35");

        assert_relative_eq!(stints[0].start_time, 0.0);
        assert_relative_eq!(stints[1].start_time, 37.0);
        assert_relative_eq!(stints[2].start_time, 67.0);
    }

    #[test]
    fn unparsable_time_becomes_zero() {
        let mut stints = baseline();
        set_stint_time(&mut stints, 2, "fast");
        assert_relative_eq!(stints[1].time_minutes, 0.0);
        assert_relative_eq!(stints[2].start_time, 30.5 + 2.0);

        set_stint_time(&mut stints, 3, "");
        assert_relative_eq!(stints[2].time_minutes, 0.0);

        set_stint_time(&mut stints, 4, "1e400");
        assert_relative_eq!(stints[3].time_minutes, 0.0);

        set_stint_time(&mut stints, 5, "-12");
        assert_relative_eq!(stints[4].time_minutes, 0.0);

        set_stint_time(&mut stints, 6, "31.5 min");
        assert_relative_eq!(stints[5].time_minutes, 31.5);
    }

    #[test]
    fn unknown_stint_is_ignored() {
        let mut stints = baseline();
        let before = stints.clone();
        set_stint_time(&mut stints, 15, "40");
        mark_completed(&mut stints, 0);
        assert_eq!(stints, before);
    }

    #[test]
    fn completed_stints_still_take_time_edits() {
        let mut stints = baseline();
        mark_completed(&mut stints, 1);
        set_stint_time(&mut stints, 1, "30");
        assert!(stints[0].completed);
        assert_relative_eq!(stints[0].time_minutes, 30.0);
        assert_relative_eq!(stints[1].start_time, 32.0);
    }

    #[test]
    fn completion_is_one_way_and_idempotent() {
        let mut stints = baseline();
        mark_completed(&mut stints, 3);
        mark_completed(&mut stints, 3);
        assert!(stints[2].completed);
        assert_eq!(race_summary(&stints).completed_count, 1);
    }

    #[test]
    fn pit_reset_keeps_last_stint_at_zero() {
        let mut stints = baseline();
        reset_pit_times(&mut stints, 3.0);
        for stint in &stints[..13] {
            assert_relative_eq!(stint.pit_time_minutes, 3.0);
        }
        assert_relative_eq!(stints[13].pit_time_minutes, 0.0);
        assert_relative_eq!(stints[13].start_time, 13.0 * 31.5);
    }

    #[test]
    fn driver_totals_follow_driver_order() {
        let drivers = roster();
        let totals = driver_totals(&baseline(), &drivers);

        let ids: Vec<u32> = totals.iter().map(|t| t.driver_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_relative_eq!(totals[0].total_minutes, 142.5);
        assert_relative_eq!(totals[1].total_minutes, 142.5);
        assert_relative_eq!(totals[2].total_minutes, 114.0);
        assert!(totals.iter().all(|t| !t.short));
    }

    #[test]
    fn driver_below_threshold_is_short() {
        let drivers = roster();
        let mut stints = baseline();
        for number in [3, 6, 9].iter() {
            set_stint_time(&mut stints, *number, "10");
        }
        let totals = driver_totals(&stints, &drivers);
        assert_relative_eq!(totals[2].total_minutes, 58.5);
        assert!(totals[2].short);
        assert!(!totals[0].short);
    }

    #[test]
    fn driver_without_stints_has_zero_total() {
        let mut drivers = roster();
        drivers.push(Driver {
            id: 9,
            name: "Reserve".to_owned(),
        });
        let totals = driver_totals(&baseline(), &drivers);
        assert_relative_eq!(totals[3].total_minutes, 0.0);
        assert!(totals[3].short);
    }

    #[test]
    fn baseline_summary() {
        let summary = race_summary(&baseline());
        assert_eq!(summary.completed_count, 0);
        assert_relative_eq!(summary.total_drive_minutes, 14.0 * 28.5);
        assert_relative_eq!(summary.total_pit_minutes, 13.0 * 2.0);
        assert_relative_eq!(summary.finish_time, 425.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_summary_finishes_at_zero() {
        let summary = race_summary(&[]);
        assert_eq!(summary.completed_count, 0);
        assert_relative_eq!(summary.finish_time, 0.0);
    }

    proptest! {
        #[test]
        fn prop_start_times_are_cumulative(stints in arb_stints()) {
            let mut stints = stints;
            recompute_start_times(&mut stints);

            let mut expected = 0.0;
            for stint in stints.iter() {
                prop_assert!((stint.start_time - expected).abs() < 1e-9);
                expected += stint.time_minutes + stint.pit_time_minutes;
            }
        }

        #[test]
        fn prop_recompute_is_idempotent(stints in arb_stints()) {
            let mut stints = stints;
            recompute_start_times(&mut stints);
            let once = stints.clone();
            recompute_start_times(&mut stints);
            prop_assert_eq!(once, stints);
        }

        #[test]
        fn prop_round_robin_assignment(no_drivers in 1u32..8, no_stints in 0u32..40) {
            let ids: Vec<u32> = (1..=no_drivers).collect();
            let stints = initialize_stints(&ids, no_stints, 2.0, 28.5);

            prop_assert_eq!(stints.len(), no_stints as usize);
            for stint in stints.iter() {
                prop_assert_eq!(stint.driver_id, (stint.number - 1) % no_drivers + 1);
            }
        }

        #[test]
        fn prop_finish_time_is_total_drive_plus_pit(stints in arb_stints()) {
            let mut stints = stints;
            reset_pit_times(&mut stints, 2.0);
            let summary = race_summary(&stints);
            prop_assert!(
                (summary.finish_time - (summary.total_drive_minutes + summary.total_pit_minutes)).abs()
                    < 1e-6
            );
        }
    }
}
