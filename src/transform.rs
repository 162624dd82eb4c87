//! Renaming transformations.
//!
//! A `TransformRequest` is the single operation selected for a run. Before the
//! batch starts it is compiled into a `NameMapper`, which maps one file name
//! to its new name. Everything in this module works on bare file names and
//! never touches the filesystem.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, warn};

/// Minimum number of digits for sequential numbering indexes.
pub const NUMBER_WIDTH: usize = 3;

/// The renaming operation selected for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformRequest {
    /// Replace every space with an underscore.
    SubstituteSpaces,
    /// Add a string after the whole file name.
    Append(String),
    /// Add a string before the file name.
    Prefix(String),
    /// Remove a regex match or, failing that, a literal substring.
    Remove(String),
    /// Lower-case the extension only.
    MinimizeExtension,
    /// Map each character of `from` to the one at the same position in `to`.
    Translate { from: String, to: String },
    /// Replace the stem with `name` followed by a zero-padded index.
    Number { name: String, start: u64 },
    /// Prepend the current date rendered with a strftime format.
    DatePrefix(String),
}

/// How a batch reacts to a file that cannot be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the batch at the first error. Files already renamed stay renamed.
    FailFast,
    /// Record the file as skipped and carry on with the next one.
    SkipAndContinue,
}

impl TransformRequest {
    /// Builds a `Translate` request, rejecting tables of unequal length.
    pub fn translate(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        let (from_len, to_len) = (from.chars().count(), to.chars().count());
        if from_len != to_len {
            return Err(Error::InvalidArgument(format!(
                "translate needs the same number of characters on both sides ('{from}' has {from_len}, '{to}' has {to_len})"
            )));
        }
        Ok(TransformRequest::Translate { from, to })
    }

    /// Builds a `Number` request. A start value that is not a non-negative
    /// integer falls back to 1.
    pub fn numbering(name: impl Into<String>, start: &str) -> Self {
        TransformRequest::Number {
            name: name.into(),
            start: parse_start_index(start),
        }
    }

    /// Short, stable name of the operation used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            TransformRequest::SubstituteSpaces => "no-spaces",
            TransformRequest::Append(_) => "append",
            TransformRequest::Prefix(_) => "prefix",
            TransformRequest::Remove(_) => "remove",
            TransformRequest::MinimizeExtension => "minimize",
            TransformRequest::Translate { .. } => "translate",
            TransformRequest::Number { .. } => "numbering",
            TransformRequest::DatePrefix(_) => "date",
        }
    }

    /// Only string removal tolerates per-file failures.
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            TransformRequest::Remove(_) => FailurePolicy::SkipAndContinue,
            _ => FailurePolicy::FailFast,
        }
    }

    /// Numbering walks the file list in lexicographic path order.
    pub fn sorts_input(&self) -> bool {
        matches!(self, TransformRequest::Number { .. })
    }

    /// Checks the parameters against `today` without touching any file.
    ///
    /// Strings that would be copied into every new name must not contain a
    /// path separator, and a date format must render.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        match self {
            TransformRequest::Append(s) | TransformRequest::Prefix(s) => {
                reject_separators(self.label(), s)
            }
            TransformRequest::Translate { to, .. } => reject_separators(self.label(), to),
            TransformRequest::Number { name, .. } => reject_separators(self.label(), name),
            TransformRequest::DatePrefix(fmt) => {
                let rendered = format_date(fmt, today)?;
                reject_separators(self.label(), &rendered)
            }
            TransformRequest::SubstituteSpaces
            | TransformRequest::Remove(_)
            | TransformRequest::MinimizeExtension => Ok(()),
        }
    }
}

fn reject_separators(label: &str, value: &str) -> Result<()> {
    if value.chars().any(|c| std::path::is_separator(c) || c == '\0') {
        return Err(Error::InvalidArgument(format!(
            "{label}: '{value}' contains a path separator"
        )));
    }
    Ok(())
}

/// Parses the first numbering index, defaulting to 1.
pub fn parse_start_index(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            warn!("Start index '{}' is not a valid number, starting at 1", raw);
            1
        }
    }
}

/// Renders `date` with a strftime-style format.
///
/// Time fields render as midnight. Unknown specifiers and fields the date
/// cannot provide (such as a time zone) are reported instead of panicking.
pub fn format_date(fmt: &str, date: NaiveDate) -> Result<String> {
    let Some(datetime) = date.and_hms_opt(0, 0, 0) else {
        return Err(Error::InvalidArgument(format!("cannot build a time for {date}")));
    };
    let mut rendered = String::new();
    write!(rendered, "{}", datetime.format(fmt))
        .map_err(|_| Error::InvalidArgument(format!("invalid date format '{fmt}'")))?;
    Ok(rendered)
}

/// Literal-or-pattern matcher used by string removal.
///
/// The string is first tried as a regex. If it compiles and matches a name,
/// every match is removed from that name. Otherwise every literal occurrence
/// is removed.
#[derive(Debug, Clone)]
pub struct RemoveMatcher {
    pattern: Option<Regex>,
    literal: String,
}

impl RemoveMatcher {
    pub fn new(s: &str) -> Self {
        let pattern = match Regex::new(s) {
            Ok(re) => Some(re),
            Err(e) => {
                debug!("'{}' is not a valid pattern, removing it literally: {}", s, e);
                None
            }
        };
        Self {
            pattern,
            literal: s.to_string(),
        }
    }

    /// `true` when `name` would be handled by the regex rather than the literal.
    pub fn uses_pattern(&self, name: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(name))
    }

    pub fn remove(&self, name: &str) -> String {
        match &self.pattern {
            Some(re) if re.is_match(name) => re.replace_all(name, "").into_owned(),
            _ => name.replace(&self.literal, ""),
        }
    }
}

pub fn substitute_spaces(name: &str) -> String {
    name.replace(' ', "_")
}

pub fn append(name: &str, suffix: &str) -> String {
    format!("{name}{suffix}")
}

pub fn prefix(name: &str, prefix: &str) -> String {
    format!("{prefix}{name}")
}

/// Lower-cases the text after the last dot. Names without an extension,
/// including dot-files such as `.bashrc`, are returned unchanged.
pub fn minimize_extension(name: &str) -> String {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let stem = &name[..name.len() - ext.len()];
            format!("{stem}{}", ext.to_lowercase())
        }
        None => name.to_string(),
    }
}

/// Builds the character table for `Translate`. Callers check the lengths.
fn translation_table(from: &str, to: &str) -> HashMap<char, char> {
    let mut table = HashMap::new();
    for (f, t) in from.chars().zip(to.chars()) {
        table.entry(f).or_insert(t);
    }
    table
}

pub fn translate_chars(name: &str, table: &HashMap<char, char>) -> String {
    name.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// `<base><index padded to NUMBER_WIDTH>` plus the original extension.
pub fn numbered_name(name: &str, base: &str, index: u64) -> String {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{base}{index:0width$}.{ext}", width = NUMBER_WIDTH),
        None => format!("{base}{index:0width$}", width = NUMBER_WIDTH),
    }
}

/// Checks that `name` can stand on its own as a file name.
pub fn validate_file_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("resulting name is empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("'{name}' is not a file name"));
    }
    if name.chars().any(|c| std::path::is_separator(c) || c == '\0') {
        return Err(format!("'{name}' contains a path separator"));
    }
    Ok(())
}

/// A request compiled for one batch.
///
/// `map` is called once per file in iteration order; numbering keeps its
/// running index here. `next` is `None` once the index has run past `u64::MAX`.
#[derive(Debug, Clone)]
pub enum NameMapper {
    SubstituteSpaces,
    Append(String),
    Prefix(String),
    Remove(RemoveMatcher),
    MinimizeExtension,
    Translate(HashMap<char, char>),
    Number { base: String, next: Option<u64> },
    DatePrefix(String),
}

impl NameMapper {
    /// Compiles `request`, rendering any date against `today`.
    pub fn compile(request: &TransformRequest, today: NaiveDate) -> Result<Self> {
        Ok(match request {
            TransformRequest::SubstituteSpaces => NameMapper::SubstituteSpaces,
            TransformRequest::Append(s) => NameMapper::Append(s.clone()),
            TransformRequest::Prefix(s) => NameMapper::Prefix(s.clone()),
            TransformRequest::Remove(s) => NameMapper::Remove(RemoveMatcher::new(s)),
            TransformRequest::MinimizeExtension => NameMapper::MinimizeExtension,
            TransformRequest::Translate { from, to } => {
                NameMapper::Translate(translation_table(from, to))
            }
            TransformRequest::Number { name, start } => NameMapper::Number {
                base: name.clone(),
                next: Some(*start),
            },
            TransformRequest::DatePrefix(fmt) => {
                NameMapper::DatePrefix(format!("{}-", format_date(fmt, today)?))
            }
        })
    }

    pub fn map(&mut self, name: &str) -> Result<String> {
        Ok(match self {
            NameMapper::SubstituteSpaces => substitute_spaces(name),
            NameMapper::Append(s) => append(name, s),
            NameMapper::Prefix(s) => prefix(name, s),
            NameMapper::Remove(matcher) => matcher.remove(name),
            NameMapper::MinimizeExtension => minimize_extension(name),
            NameMapper::Translate(table) => translate_chars(name, table),
            NameMapper::Number { base, next } => {
                let Some(index) = *next else {
                    return Err(Error::InvalidArgument(format!(
                        "numbering index for '{name}' is past {}",
                        u64::MAX
                    )));
                };
                *next = index.checked_add(1);
                numbered_name(name, base, index)
            }
            NameMapper::DatePrefix(rendered) => prefix(name, rendered),
        })
    }
}
