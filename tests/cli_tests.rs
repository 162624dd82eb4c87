use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn renamer() -> Command {
    Command::cargo_bin("renamer").unwrap()
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), name).unwrap();
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_help_command() {
    renamer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-spaces"))
        .stdout(predicate::str::contains("--numbering"))
        .stdout(predicate::str::contains("'-3', counts from 1"));
}

#[test]
fn test_no_spaces_on_directory() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "my song.mp3");
    touch(temp_dir.path(), "plain.txt");
    fs::create_dir(temp_dir.path().join("sub dir")).unwrap();

    renamer()
        .arg("-s")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files renamed: 1"));

    assert_eq!(names_in(temp_dir.path()), vec!["my_song.mp3", "plain.txt", "sub dir"]);
}

#[test]
fn test_invalid_path_aborts_before_any_rename() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a b.txt");

    renamer()
        .arg("-s")
        .arg(temp_dir.path())
        .arg(temp_dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a path and not a file"));

    assert_eq!(names_in(temp_dir.path()), vec!["a b.txt"]);
}

#[test]
fn test_no_operation_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a b.txt");

    renamer()
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No renaming operation specified"));

    assert_eq!(names_in(temp_dir.path()), vec!["a b.txt"]);
}

#[test]
fn test_translate_mismatch_is_rejected_before_renaming() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "abc.txt");

    renamer()
        .args(["-t", "ab", "c"])
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid argument"));

    assert_eq!(names_in(temp_dir.path()), vec!["abc.txt"]);
}

#[test]
fn test_numbering_needs_two_arguments() {
    renamer().args(["-n", "img"]).assert().failure();
}

#[test]
fn test_only_one_operation_per_run() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "A B.TXT");

    renamer()
        .args(["-s", "-m"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    assert_eq!(names_in(temp_dir.path()), vec!["A B.TXT"]);
}

#[test]
fn test_numbering_sorts_then_numbers() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["b.txt", "a.txt", "c.txt"] {
        touch(temp_dir.path(), name);
    }

    renamer()
        .args(["-n", "img", "1"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(names_in(temp_dir.path()), vec!["img001.txt", "img002.txt", "img003.txt"]);
    assert_eq!(fs::read_to_string(temp_dir.path().join("img001.txt")).unwrap(), "a.txt");
    assert_eq!(fs::read_to_string(temp_dir.path().join("img003.txt")).unwrap(), "c.txt");
}

#[test]
fn test_literal_date_string() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "report.csv");

    renamer()
        .args(["-d", "2019-12-24"])
        .arg(temp_dir.path().join("report.csv"))
        .assert()
        .success();

    assert_eq!(names_in(temp_dir.path()), vec!["2019-12-24-report.csv"]);
}

#[test]
fn test_remove_skips_and_continues() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "tmp");
    touch(temp_dir.path(), "tmp_notes.txt");

    renamer()
        .args(["-r", "tmp", "-v"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files skipped: 1"));

    assert_eq!(names_in(temp_dir.path()), vec!["_notes.txt", "tmp"]);
}

// Needs a case-sensitive filesystem to hold both names.
#[cfg(target_os = "linux")]
#[test]
fn test_collision_stops_the_batch() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "photo.jpg");
    touch(temp_dir.path(), "photo.JPG");

    renamer()
        .arg("-m")
        .arg(temp_dir.path().join("photo.JPG"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Target already exists"));

    assert_eq!(fs::read_to_string(temp_dir.path().join("photo.jpg")).unwrap(), "photo.jpg");
}

#[test]
fn test_dry_run_json_report() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "notes.txt");

    let output = renamer()
        .args(["-p", "old_", "--dry-run", "--format", "json"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["operation"], "prefix");
    assert_eq!(parsed["dry_run"], true);
    assert_eq!(parsed["renamed"], 1);
    assert_eq!(names_in(temp_dir.path()), vec!["notes.txt"]);
}

#[test]
fn test_gui_flag_is_informational() {
    renamer()
        .arg("-g")
        .assert()
        .success()
        .stderr(predicate::str::contains("No graphical front-end"));
}

#[test]
fn test_relative_arguments_resolve_to_absolute_paths() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "x y.txt");
    fs::create_dir(temp_dir.path().join("sub")).unwrap();
    touch(&temp_dir.path().join("sub"), "p q.txt");

    let output = renamer()
        .current_dir(temp_dir.path())
        .args(["-s", "--format", "json", "x y.txt", "sub"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["renamed"], 2);
    for outcome in parsed["outcomes"].as_array().unwrap() {
        assert!(Path::new(outcome["from"].as_str().unwrap()).is_absolute());
        assert!(Path::new(outcome["to"].as_str().unwrap()).is_absolute());
    }
    assert_eq!(
        Path::new(parsed["outcomes"][0]["to"].as_str().unwrap()),
        fs::canonicalize(temp_dir.path()).unwrap().join("x_y.txt")
    );
    assert!(temp_dir.path().join("x_y.txt").exists());
    assert!(temp_dir.path().join("sub").join("p_q.txt").exists());
}

#[test]
fn test_fail_fast_reports_renames_done_before_the_error() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "c d.txt");
    touch(temp_dir.path(), "a b.txt");
    touch(temp_dir.path(), "a_b.txt");

    renamer()
        .arg("-s")
        .arg(temp_dir.path().join("c d.txt"))
        .arg(temp_dir.path().join("a b.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 renamed before the error"))
        .stderr(predicate::str::contains("Target already exists"));

    assert_eq!(names_in(temp_dir.path()), vec!["a b.txt", "a_b.txt", "c_d.txt"]);
}
