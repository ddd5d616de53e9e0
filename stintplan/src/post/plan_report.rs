use crate::interfaces::view_interface::ScheduleView;
use anyhow::Context;
use std::fmt::Write;
use std::io::Write as IoWrite;
use std::path::Path;

impl ScheduleView {
    /// render_report returns the driver totals, the stint table and the race summary as text.
    pub fn render_report(&self) -> Result<String, std::fmt::Error> {
        let mut content = String::new();

        writeln!(&mut content, "RESULT: Driver totals")?;
        for driver in self.drivers.iter() {
            writeln!(
                &mut content,
                "{:>3} {:<16} {}  {}",
                driver.driver_id, driver.name, driver.total_hms, driver.status
            )?;
        }
        writeln!(&mut content)?;

        writeln!(&mut content, "RESULT: Stints")?;
        writeln!(
            &mut content,
            "  #, driver          ,    start,  time, pit, laps, flags    , done"
        )?;
        for stint in self.stints.iter() {
            writeln!(
                &mut content,
                "{:3}, {:<16}, {}, {:5.1}, {:3.1}, {:4}, {:<9}, {}",
                stint.number,
                stint.driver_name,
                stint.start_time_hms,
                stint.time_minutes,
                stint.pit_time_minutes,
                stint.predicted_laps,
                stint.flag.to_string(),
                if stint.completed { "yes" } else { "no" }
            )?;
        }
        writeln!(&mut content)?;

        writeln!(&mut content, "RESULT: Summary")?;
        writeln!(
            &mut content,
            "Done {}/{}, total drive {}, pit time {}, finish {}",
            self.summary.completed_count,
            self.summary.no_stints,
            self.summary.total_drive_hms,
            self.summary.total_pit_hms,
            self.summary.finish_hms
        )?;

        Ok(content)
    }

    /// to_json returns the view as pretty-printed JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize plan view!")?;
        Ok(json)
    }

    /// print_report prints the plan report to the console output.
    pub fn print_report(&self) -> anyhow::Result<()> {
        print!("{}", self.render_report()?);
        Ok(())
    }

    /// write_report_to_file writes the plan report to a text file. Returns the path to the
    /// written file.
    pub fn write_report_to_file(&self, path: &Path) -> anyhow::Result<String> {
        let content = self.render_report()?;
        create_parent_dir(path)?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open report file {}!", path.display()))?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// write_stints_csv writes one CSV record per stint. Returns the path to the written file.
    pub fn write_stints_csv(&self, path: &Path) -> anyhow::Result<String> {
        create_parent_dir(path)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to open CSV file {}!", path.display()))?;
        for stint in self.stints.iter() {
            wtr.serialize(stint)?;
        }
        wtr.flush()?;

        Ok(path.to_string_lossy().into_owned())
    }
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}!", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::core::schedule::RaceSchedule;
    use crate::interfaces::view_interface::ScheduleView;
    use tempfile::TempDir;

    fn edited_view() -> ScheduleView {
        let mut schedule = RaceSchedule::default();
        schedule.set_stint_time(2, "45");
        schedule.mark_completed(1);
        ScheduleView::from_schedule(&schedule).unwrap()
    }

    #[test]
    fn report_lists_stints_and_summary() {
        let mut schedule = RaceSchedule::default();
        schedule.set_stint_time(1, "35");
        schedule.set_stint_time(2, "45");
        schedule.mark_completed(1);
        let report = ScheduleView::from_schedule(&schedule)
            .unwrap()
            .render_report()
            .unwrap();

        assert!(report.contains("RESULT: Driver totals"));
        assert!(report.contains("  1, Driver 1        , 00:00:00,  35.0, 2.0,   28, "));
        assert!(report.contains("  2, Driver 2        , 00:37:00,  45.0, 2.0,   36, Too Long , no"));
        assert!(report.contains(" 14, Driver 2        , "));
        assert!(report.contains("Done 1/14"));
        assert_eq!(report.lines().filter(|l| l.ends_with(", yes")).count(), 1);
    }

    #[test]
    fn json_contains_formatted_summary() {
        let json = ScheduleView::from_schedule(&RaceSchedule::default())
            .unwrap()
            .to_json()
            .unwrap();
        assert!(json.contains("\"finish_hms\": \"07:05:00\""));
    }

    #[test]
    fn report_file_matches_rendered_report() {
        let tmp_dir = TempDir::new().unwrap();
        let view = edited_view();
        let path = tmp_dir.path().join("plan.txt");

        let written = view.write_report_to_file(&path).unwrap();
        assert_eq!(written, path.to_string_lossy());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), view.render_report().unwrap());

        // a second write replaces the file
        let view = ScheduleView::from_schedule(&RaceSchedule::default()).unwrap();
        view.write_report_to_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), view.render_report().unwrap());
    }

    #[test]
    fn csv_has_header_and_one_row_per_stint() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("stints.csv");
        edited_view().write_stints_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(
            lines[0],
            "number,driver_id,driver_name,start_time,start_time_hms,time_minutes,\
             pit_time_minutes,predicted_laps,flag,completed"
        );
        assert_eq!(lines[1], "1,1,Driver 1,0.0,00:00:00,28.5,2.0,22,Ok,true");
        assert_eq!(lines[2], "2,2,Driver 2,30.5,00:30:30,45.0,2.0,36,TooLong,false");
        assert!(lines[14].starts_with("14,2,Driver 2,"));
        assert!(lines[14].ends_with(",0.0,22,Ok,false"));
    }

    #[test]
    fn exports_create_missing_directories() {
        let tmp_dir = TempDir::new().unwrap();
        let view = edited_view();
        let report_path = tmp_dir.path().join("out/reports/plan.txt");
        let csv_path = tmp_dir.path().join("out/tables/stints.csv");

        view.write_report_to_file(&report_path).unwrap();
        view.write_stints_csv(&csv_path).unwrap();

        assert!(report_path.is_file());
        assert!(csv_path.is_file());
    }
}
