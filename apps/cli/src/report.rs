use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches};
use ingest::ExtractSample;
use tracker_app::{AppState, ReportCounters, ReportOptions};

use crate::args::ReportArgs;
use crate::config;
use crate::dirs;
use crate::error::CliError;
use crate::logging::init_logging;

/// Entry point shared by the daily report binaries.
pub fn run_report<C>(bin_name: &'static str, about: &'static str) -> ExitCode
where
    C: ExtractSample + ReportCounters,
{
    let matches = ReportArgs::command().name(bin_name).about(about).get_matches();
    let args = match ReportArgs::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    init_logging(args.verbose);

    match execute::<C>(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.report_lines() {
                eprintln!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute<C>(args: &ReportArgs) -> Result<(), CliError>
where
    C: ExtractSample + ReportCounters,
{
    let loaded = config::load_or_create(args.config.as_deref()).map_err(CliError::Config)?;
    let home = dirs::user_home().map_err(CliError::Config)?;
    let workspace = dirs::workspace_dir(&loaded.config).map_err(CliError::Config)?;

    let options = ReportOptions {
        format: args.output_format(),
        dir: args.dir.clone(),
        candidates: dirs::log_dir_candidates(C::PROVIDER, &loaded.config, &home, &workspace),
    };
    let app_state = AppState::new(dirs::db_path(&loaded.config, &home));
    let service = &app_state.services.report;

    let report = service.build::<C>(&options)?;
    print!("{}", service.render(&report, &options)?);

    if args.save {
        let summary = service.save(&report)?;
        println!("{}", summary.message());
    }
    Ok(())
}
