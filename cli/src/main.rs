use clap::Parser;
use stintplan::pre::plan_opts::PlanOpts;
use stintplan::pre::read_plan_pars::read_plan_pars;
use stintplan::{PlanPars, RaceSchedule, ScheduleView};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get plan options from the command line arguments
    let plan_opts: PlanOpts = PlanOpts::parse();
    init_logging(plan_opts.debug);

    // get plan parameters
    let plan_pars = if let Some(parfile_path) = &plan_opts.parfile_path {
        info!("Reading plan parameters from {:?}", parfile_path);
        read_plan_pars(parfile_path)?
    } else {
        info!("No parameter file provided, planning the default 7-hour race");
        PlanPars::default()
    };

    // EXECUTION -----------------------------------------------------------------------------------
    let mut schedule = RaceSchedule::from_plan_pars(&plan_pars)?;
    let no_ignored = plan_opts.apply_edits(&mut schedule)?;
    if no_ignored > 0 {
        warn!("{} edit(s) ignored for stints that do not exist", no_ignored);
    }

    let no_flagged = schedule.no_flagged_stints();
    if no_flagged > 0 {
        warn!("{} stint(s) outside the stint window", no_flagged);
    }

    // POST-PROCESSING -----------------------------------------------------------------------------
    let view = ScheduleView::from_schedule(&schedule)?;

    if plan_opts.json {
        println!("{}", view.to_json()?);
    } else {
        view.print_report()?;
    }

    if let Some(path) = &plan_opts.output {
        let path = view.write_report_to_file(path)?;
        info!("Plan report written to {}", path);
    }

    if let Some(path) = &plan_opts.csv {
        let path = view.write_stints_csv(path)?;
        info!("Stint table written to {}", path);
    }

    Ok(())
}
