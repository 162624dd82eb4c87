use crate::errors::{Error, Result};
use crate::transform::{FailurePolicy, NameMapper, TransformRequest, validate_file_name};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Executes one renaming operation over an already resolved file list.
///
/// This is the entry point used by the command-line tool. It applies the
/// request with today's date and returns the batch report.
///
/// # Arguments
///
/// * `request` - The operation to apply to every file.
/// * `files` - Absolute paths, usually produced by `resolver::resolve_paths`.
/// * `dry_run` - If `true`, every outcome is computed and checked but no file is renamed.
pub fn run_rename(request: TransformRequest, files: Vec<PathBuf>, dry_run: bool) -> Result<BatchReport> {
    FileRenamer::new(request).dry_run(dry_run).run(files)
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// The file was (or, in a dry run, would be) renamed.
    Renamed { from: PathBuf, to: PathBuf },
    /// The new name equals the current one, so no rename was attempted.
    Unchanged { path: PathBuf },
    /// The file could not be renamed and the operation tolerates that.
    Skipped { path: PathBuf, reason: String },
}

/// The per-file results of one run, in iteration order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub operation: String,
    pub policy: FailurePolicy,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<RenameOutcome>,
}

impl BatchReport {
    fn new(request: &TransformRequest, dry_run: bool) -> Self {
        Self {
            operation: request.label().to_string(),
            policy: request.failure_policy(),
            dry_run,
            started_at: Utc::now(),
            outcomes: Vec::new(),
        }
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Renamed { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Unchanged { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&RenameOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Applies a `TransformRequest` to files on disk.
///
/// Files are renamed one at a time, each rename being an independent
/// filesystem call. There is no rollback: when a fail-fast operation hits an
/// error, files renamed earlier in the batch keep their new names.
pub struct FileRenamer {
    request: TransformRequest,
    today: NaiveDate,
    dry_run: bool,
}

impl FileRenamer {
    /// Creates a renamer that formats dates against the local current date.
    pub fn new(request: TransformRequest) -> Self {
        Self {
            request,
            today: Local::now().date_naive(),
            dry_run: false,
        }
    }

    /// Overrides the date used by the date-prefix operation.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Renames every file in `files`.
    ///
    /// Numbering sorts the list by full path first; every other operation
    /// keeps the given order. Under `FailurePolicy::FailFast` the first error
    /// is returned and the rest of the batch is abandoned. Under
    /// `FailurePolicy::SkipAndContinue` the file is recorded as skipped.
    pub fn run(&self, mut files: Vec<PathBuf>) -> Result<BatchReport> {
        if self.request.sorts_input() {
            files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        }
        if let TransformRequest::DatePrefix(_) = self.request {
            info!("Using today's date; to use another date, pass it as a literal string instead of a format");
        }

        let mut mapper = NameMapper::compile(&self.request, self.today)?;
        let policy = self.request.failure_policy();
        let mut report = BatchReport::new(&self.request, self.dry_run);
        let total = files.len();

        for path in files {
            match self.rename_file(&path, &mut mapper) {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) => match policy {
                    FailurePolicy::FailFast => {
                        info!(
                            "Stopped after {} of {} file(s); {} renamed before the error",
                            report.outcomes.len(),
                            total,
                            report.renamed()
                        );
                        return Err(e);
                    }
                    FailurePolicy::SkipAndContinue => {
                        warn!("Skipping {}: {}", path.display(), e);
                        report.outcomes.push(RenameOutcome::Skipped {
                            path,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(report)
    }

    /// Computes the new name for `path` and renames it.
    fn rename_file(&self, path: &Path, mapper: &mut NameMapper) -> Result<RenameOutcome> {
        let name = file_name_str(path)?;
        let new_name = mapper.map(name)?;
        if new_name == name {
            return Ok(RenameOutcome::Unchanged {
                path: path.to_path_buf(),
            });
        }

        validate_file_name(&new_name).map_err(|reason| Error::InvalidFileName {
            path: path.to_path_buf(),
            reason,
        })?;

        let new_path = path.with_file_name(&new_name);
        if target_taken(path, &new_path)? {
            return Err(Error::TargetExists {
                from: path.to_path_buf(),
                to: new_path,
            });
        }

        if !self.dry_run {
            fs::rename(path, &new_path).map_err(|source| Error::Rename {
                from: path.to_path_buf(),
                to: new_path.clone(),
                source,
            })?;
        }
        debug!("Renamed: {} -> {}", path.display(), new_path.display());

        Ok(RenameOutcome::Renamed {
            from: path.to_path_buf(),
            to: new_path,
        })
    }
}

fn file_name_str(path: &Path) -> Result<&str> {
    let name = path.file_name().ok_or_else(|| Error::InvalidFileName {
        path: path.to_path_buf(),
        reason: "path has no file name".to_string(),
    })?;
    name.to_str().ok_or_else(|| Error::InvalidFileName {
        path: path.to_path_buf(),
        reason: "file name is not valid UTF-8".to_string(),
    })
}

/// `true` when `to` exists and is not `from` itself.
///
/// A plain rename would silently replace an existing file on most platforms.
/// The same-file case covers case-only renames on case-insensitive filesystems.
fn target_taken(from: &Path, to: &Path) -> Result<bool> {
    match fs::symlink_metadata(to) {
        Ok(_) => Ok(!same_file(from, to)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    let (ma, mb) = (fs::symlink_metadata(a)?, fs::symlink_metadata(b)?);
    Ok(ma.dev() == mb.dev() && ma.ino() == mb.ino())
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}
