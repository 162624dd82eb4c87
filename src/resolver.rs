use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Turns user-supplied path arguments into a flat list of absolute file paths.
///
/// Each input is handled in order:
/// - an existing regular file is added as-is (made absolute);
/// - an existing directory contributes every regular file directly inside it,
///   in directory-listing order. Subdirectories are skipped and nothing is
///   visited recursively;
/// - anything else fails the whole resolution with `Error::InvalidPath`.
///
/// Resolution is all-or-nothing: no partial list is returned on error, so a
/// caller never renames anything when one argument is bad.
pub fn resolve_paths<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let absolute = std::path::absolute(input)?;

        if absolute.is_file() {
            files.push(absolute);
        } else if absolute.is_dir() {
            let before = files.len();
            list_directory(&absolute, &mut files)?;
            debug!(
                "Collected {} file(s) from {}",
                files.len() - before,
                absolute.display()
            );
        } else {
            return Err(Error::InvalidPath(input.to_path_buf()));
        }
    }

    Ok(files)
}

/// Appends the regular files found directly inside `dir`.
fn list_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        // `is_file` follows symlinks, so a link to a file counts as a file.
        if path.is_file() {
            files.push(path.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_lists_only_immediate_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("c.txt"), "c").unwrap();

        let mut files = resolve_paths(&[temp_dir.path()]).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![temp_dir.path().join("a.txt"), temp_dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_files_and_directories_are_combined_in_argument_order() {
        let temp_dir = TempDir::new().unwrap();
        let single = temp_dir.path().join("single.txt");
        fs::write(&single, "x").unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.txt"), "y").unwrap();

        let files = resolve_paths(&[sub.clone(), single.clone()]).unwrap();

        assert_eq!(files, vec![sub.join("inner.txt"), single]);
    }

    #[test]
    fn test_results_are_absolute() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let files = resolve_paths(&[temp_dir.path()]).unwrap();

        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_missing_path_fails_whole_resolution() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let err = resolve_paths(&[temp_dir.path().to_path_buf(), missing.clone()]).unwrap_err();

        match err {
            Error::InvalidPath(p) => assert_eq!(p, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_list() {
        let inputs: Vec<PathBuf> = Vec::new();
        assert!(resolve_paths(&inputs).unwrap().is_empty());
    }
}
