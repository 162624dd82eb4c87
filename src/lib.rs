//! `renamer` is a library for renaming many files at once.
//!
//! It provides the core logic for the `renamer` command-line tool but can also
//! be used as a standalone library. The main components are:
//!
//! - `resolver`: Turns file and directory arguments into a flat list of
//!   absolute file paths.
//! - `transform`: The `TransformRequest` operations and the pure file-name
//!   mutations behind them.
//! - `file_renamer`: Applies one request to a file list on disk and returns a
//!   per-file `BatchReport`.
//! - `output_formatter`: Renders a report as text or JSON.
//!
//! Renaming is sequential: every rename finishes before the next one starts.

pub mod cli;
pub mod config;
pub mod errors;
pub mod file_renamer;
pub mod logging;
pub mod output_formatter;
pub mod resolver;
pub mod transform;

// Re-export main types for easier access by library users.
pub use errors::{Error, Result};
pub use file_renamer::{BatchReport, FileRenamer, RenameOutcome};
pub use output_formatter::{OutputFormat, OutputFormatter};
pub use resolver::resolve_paths;
pub use transform::{FailurePolicy, TransformRequest};
