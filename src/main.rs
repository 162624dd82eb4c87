//! The main entry point for the `renamer` command-line application.
//!
//! Parses arguments, resolves the paths, applies the selected operation and
//! prints the report. Any error is written to stderr and exits with status 1;
//! clap usage errors exit with status 2.

use renamer::cli::{self, Args};
use renamer::config::RunConfig;
use renamer::errors::Result;
use renamer::logging::{self, LogLevel};
use renamer::{OutputFormatter, file_renamer, resolve_paths};
use std::io;
use std::process;
use tracing::{info, warn};

fn main() {
    let args = cli::parse_args();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    logging::init_logging(LogLevel::from_flags(args.verbose, args.quiet))?;
    let config = RunConfig::from_args(args)?;

    if config.gui {
        info!("No graphical front-end is available in this build, use the command-line options instead");
        return Ok(());
    }

    // All paths are checked before deciding whether there is anything to do.
    let files = resolve_paths(&config.paths)?;

    let Some(request) = config.request.clone() else {
        info!("No renaming operation specified, nothing to do (see --help)");
        return Ok(());
    };
    if files.is_empty() {
        warn!("No files to rename");
    }

    let report = file_renamer::run_rename(request, files, config.dry_run)?;

    let formatter = OutputFormatter::new(config.format, config.list_changes());
    formatter.write_report(&report, &mut io::stdout())?;

    Ok(())
}
