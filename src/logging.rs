//! Tracing initialization.
//!
//! Logs go to stderr so that stdout only carries the batch report. The level
//! comes from the command line; `RUST_LOG` is not consulted.

use crate::errors::Result;
use std::io::IsTerminal;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Log verbosity selected with `-q` / `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    /// Warnings and run-level notices.
    #[default]
    Normal,
    /// Every rename as it happens.
    Verbose,
    Trace,
}

impl LogLevel {
    /// Maps the CLI flags to a level. `quiet` wins over any `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return LogLevel::Quiet;
        }
        match verbose {
            0 => LogLevel::Normal,
            1 => LogLevel::Verbose,
            _ => LogLevel::Trace,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Quiet => LevelFilter::ERROR,
            LogLevel::Normal => LevelFilter::INFO,
            LogLevel::Verbose => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let env_filter = EnvFilter::new(level.to_level_filter().to_string());
    let stderr_layer = tsfmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact();

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("failed to initialise logging: {e}").into())
}
