use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `renamer`.
///
/// Argument and path errors are raised before any file is touched. The
/// rename-time variants (`TargetExists`, `InvalidFileName`, `Rename`) abort a
/// batch or are recorded as skipped files, depending on the operation's
/// failure policy.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the `walkdir` crate while listing a directory.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// An error related to JSON serialization of the batch report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path argument that is neither an existing file nor a directory.
    #[error("Not a path and not a file: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A transformation parameter that cannot be used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file name that cannot be read or would be invalid after renaming.
    #[error("Invalid file name for {}: {reason}", path.display())]
    InvalidFileName { path: PathBuf, reason: String },

    /// The rename target is already taken by another file.
    #[error("Target already exists: {} -> {}", from.display(), to.display())]
    TargetExists { from: PathBuf, to: PathBuf },

    /// The underlying rename call failed.
    #[error("Rename failed for {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),
}

/// A convenient type alias for `Result<T, renamer::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
