use crate::cli::Args;
use crate::errors::Result;
use crate::logging::LogLevel;
use crate::output_formatter::OutputFormat;
use crate::transform::TransformRequest;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Validated settings for one run, assembled from the command line.
///
/// There is no configuration file and no environment variable; everything
/// comes from `Args`. Building a `RunConfig` checks every operation parameter,
/// so argument errors surface before any path is resolved or file renamed.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The selected operation, `None` when no operation flag was given.
    pub request: Option<TransformRequest>,
    /// Raw path arguments, resolved later by `resolver::resolve_paths`.
    pub paths: Vec<PathBuf>,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub log_level: LogLevel,
    /// The graphical front-end was requested.
    pub gui: bool,
}

impl RunConfig {
    /// Builds the run settings, validating parameters against today's date.
    pub fn from_args(args: Args) -> Result<Self> {
        Self::from_args_on(args, Local::now().date_naive())
    }

    /// Same as `from_args`, with an explicit date for date-format checks.
    pub fn from_args_on(args: Args, today: NaiveDate) -> Result<Self> {
        let request = args.request()?;
        if let Some(request) = &request {
            request.validate(today)?;
        }

        Ok(Self {
            request,
            log_level: LogLevel::from_flags(args.verbose, args.quiet),
            paths: args.paths,
            dry_run: args.dry_run,
            format: args.format,
            gui: args.gui,
        })
    }

    /// The text report lists individual files when asked for more detail or
    /// when nothing is actually renamed.
    pub fn list_changes(&self) -> bool {
        self.dry_run || matches!(self.log_level, LogLevel::Verbose | LogLevel::Trace)
    }
}
