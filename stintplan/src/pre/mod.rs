pub mod plan_opts;
pub mod read_plan_pars;
