use crate::errors::{Error, Result};
use crate::output_formatter::OutputFormat;
use crate::transform::TransformRequest;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Batch rename files in place.
///
/// Exactly one renaming operation is applied to every file given on the
/// command line and to every regular file directly inside each directory
/// given on the command line.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Batch rename files: spaces, prefixes, suffixes, removal, extensions, translation, numbering, dates",
    long_about = "renamer - rename many files at once with a single operation.

Paths can be files or directories. Directories contribute the regular files
they contain directly; subdirectories are not visited. Only one operation can
be selected per run.

QUICK EXAMPLES:
  renamer -s ~/Music                      # 'My Song.mp3' -> 'My_Song.mp3'
  renamer -p old_ notes.txt todo.txt      # 'notes.txt' -> 'old_notes.txt'
  renamer -r '_v[0-9]+' .                 # 'plan_v12.md' -> 'plan.md'
  renamer -m ~/Pictures                   # 'IMG.JPG' -> 'IMG.jpg'
  renamer -t ab AB .                      # 'cab.txt' -> 'cAB.txt'
  renamer -n holiday 1 ~/Pictures/trip    # -> 'holiday001.jpg', 'holiday002.jpg', ...
  renamer -d '%Y-%m-%d' report.csv        # -> '2024-05-01-report.csv'"
)]
pub struct Args {
    /// Substitute every space in file names with an underscore.
    #[arg(short = 's', long = "no-spaces", group = "operation")]
    pub no_spaces: bool,

    /// Append a string after each file name.
    #[arg(short, long, value_name = "STR", allow_hyphen_values = true, group = "operation")]
    pub append: Option<String>,

    /// Put a string in front of each file name.
    #[arg(short, long, value_name = "STR", allow_hyphen_values = true, group = "operation")]
    pub prefix: Option<String>,

    /// Remove a string from file names.
    ///
    /// The string is used as a regex when it is valid and matches the name;
    /// otherwise every literal occurrence is removed. Files whose new name
    /// would be empty or already taken are skipped.
    #[arg(short, long, value_name = "STR", allow_hyphen_values = true, group = "operation")]
    pub remove: Option<String>,

    /// Lower-case the extension of each file, leaving the rest of the name alone.
    #[arg(short, long, group = "operation")]
    pub minimize: bool,

    /// Replace each character of FROM with the character at the same position in TO.
    #[arg(short, long, num_args = 2, value_names = ["FROM", "TO"], group = "operation")]
    pub translate: Option<Vec<String>>,

    /// Rename files to NAME followed by a 3-digit index starting at START.
    ///
    /// Files are numbered in path order. The extension is kept. A START that is
    /// not a non-negative whole number, such as 'x' or '-3', counts from 1.
    #[arg(short, long, num_args = 2, value_names = ["NAME", "START"], group = "operation")]
    pub numbering: Option<Vec<String>>,

    /// Prepend today's date, rendered with a strftime FMT such as '%Y-%m-%d'.
    ///
    /// To use another date, pass it literally, e.g. -d 2019-12-24.
    #[arg(short, long, value_name = "FMT", group = "operation")]
    pub date: Option<String>,

    /// Start the graphical front-end (not available in this build).
    #[arg(short, long, group = "operation")]
    pub gui: bool,

    /// Show what would be renamed without renaming anything.
    #[arg(long)]
    pub dry_run: bool,

    /// The output format for the report printed at the end of the run.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print every rename (-v) or everything (-vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Files or directories to rename.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

impl Args {
    /// The selected operation, or `None` when no operation flag was given.
    ///
    /// Clap already guarantees that at most one flag of the group is present
    /// and that two-value options received two values.
    pub fn request(&self) -> Result<Option<TransformRequest>> {
        if self.no_spaces {
            return Ok(Some(TransformRequest::SubstituteSpaces));
        }
        if let Some(s) = &self.append {
            return Ok(Some(TransformRequest::Append(s.clone())));
        }
        if let Some(s) = &self.prefix {
            return Ok(Some(TransformRequest::Prefix(s.clone())));
        }
        if let Some(s) = &self.remove {
            return Ok(Some(TransformRequest::Remove(s.clone())));
        }
        if self.minimize {
            return Ok(Some(TransformRequest::MinimizeExtension));
        }
        if let Some(values) = &self.translate {
            let [from, to] = two_values("--translate", values)?;
            return Ok(Some(TransformRequest::translate(from, to)?));
        }
        if let Some(values) = &self.numbering {
            let [name, start] = two_values("--numbering", values)?;
            return Ok(Some(TransformRequest::numbering(name, start)));
        }
        if let Some(fmt) = &self.date {
            return Ok(Some(TransformRequest::DatePrefix(fmt.clone())));
        }
        Ok(None)
    }
}

fn two_values<'a>(flag: &str, values: &'a [String]) -> Result<[&'a str; 2]> {
    match values {
        [a, b] => Ok([a.as_str(), b.as_str()]),
        _ => Err(Error::InvalidArgument(format!(
            "{flag} needs exactly 2 arguments, got {}",
            values.len()
        ))),
    }
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
