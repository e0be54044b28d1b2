use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let file_path = dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(file_path, content)?;
    }
    Ok(())
}

fn keyscout(root: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("keyscout")?;
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(root)
        .args(["--no-color", "-d"])
        .arg(root);
    Ok(cmd)
}

#[test]
fn test_basic_search() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("a.txt", "the quick brown fox jumps\n")])?;

    keyscout(dir.path())?
        .arg("brown")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a.txt, line 1: the quick brown fox jumps",
        ))
        .stdout(predicate::str::contains("Found 1 instances in"));
    Ok(())
}

#[test]
fn test_case_sensitive_flag() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("a.txt", "the quick brown fox jumps\n")])?;

    keyscout(dir.path())?
        .args(["Fox", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 instances in"));
    Ok(())
}

#[test]
fn test_pattern_and_smart_search() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("src/lib.rs", "// TODO: write docs\n"),
            ("notes.txt", "TODO: buy milk\n"),
            ("node_modules/dep/index.rs", "// TODO: vendored\n"),
        ],
    )?;

    keyscout(dir.path())?
        .args(["TODO", "-p", "*.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1: // TODO: write docs"))
        .stdout(predicate::str::contains("vendored").not())
        .stdout(predicate::str::contains("buy milk").not());

    keyscout(dir.path())?
        .args(["TODO", "-p", "*.rs", "-s", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vendored"))
        .stdout(predicate::str::contains("Found 2 instances in"));
    Ok(())
}

#[test]
fn test_confirmation_declined() -> Result<()> {
    let dir = tempdir()?;
    let content: String = (0..5).map(|i| format!("needle {}\n", i)).collect();
    create_test_files(&dir, &[("many.txt", &content)])?;

    keyscout(dir.path())?
        .args(["needle", "--confirm-threshold", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found 5 instances. Do you want to print all results? (y/n): ",
        ))
        .stdout(predicate::str::contains("5 instances found."))
        .stdout(predicate::str::contains("line 1:").not());
    Ok(())
}

#[test]
fn test_yes_skips_confirmation() -> Result<()> {
    let dir = tempdir()?;
    let content: String = (0..5).map(|i| format!("needle {}\n", i)).collect();
    create_test_files(&dir, &[("many.txt", &content)])?;

    keyscout(dir.path())?
        .args(["needle", "--confirm-threshold", "3", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you want").not())
        .stdout(predicate::str::contains("many.txt, line 5: needle 4"));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("a.txt", "alpha\nbeta keyword gamma\n")])?;

    let output = keyscout(dir.path())?
        .args(["keyword", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["files_searched"], 1);
    assert_eq!(json["matches"][0]["line_number"], 2);
    assert_eq!(json["matches"][0]["snippet"], "beta keyword gamma");
    Ok(())
}

#[test]
fn test_unreadable_file_warns_but_succeeds() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("good.txt", "keyword\n")])?;
    fs::write(dir.path().join("bad.txt"), b"keyword \xff\n")?;

    keyscout(dir.path())?
        .arg("keyword")
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading file"))
        .stdout(predicate::str::contains("Found 1 instances in"));
    Ok(())
}

#[test]
fn test_each_failed_file_warned_once() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("good.txt", "keyword\n")])?;
    fs::write(dir.path().join("bad.txt"), b"keyword \xff\n")?;

    let output = keyscout(dir.path())?.arg("keyword").output()?;
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Error reading file").count(), 1);
    assert_eq!(stderr.matches("bad.txt").count(), 1);
    Ok(())
}

#[test]
fn test_star_dot_star_includes_extensionless_files() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("README", "keyword in readme\n"), ("a.txt", "keyword in text\n")],
    )?;

    keyscout(dir.path())?
        .args(["keyword", "-p", "*.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("README, line 1: keyword in readme"))
        .stdout(predicate::str::contains("a.txt, line 1: keyword in text"));
    Ok(())
}

#[test]
fn test_command_line_turns_off_config_case_sensitivity() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("a.txt", "the quick brown fox jumps\n"),
            ("settings.yaml", "case_sensitive: true\n"),
        ],
    )?;

    keyscout(dir.path())?
        .args(["Fox", "--config"])
        .arg(dir.path().join("settings.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 instances in"));

    keyscout(dir.path())?
        .args(["Fox", "--no-case-sensitive", "--config"])
        .arg(dir.path().join("settings.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "a.txt, line 1: the quick brown fox jumps",
        ));
    Ok(())
}

#[test]
fn test_missing_directory_fails() -> Result<()> {
    let dir = tempdir()?;

    Command::cargo_bin("keyscout")?
        .current_dir(dir.path())
        .args(["keyword", "-d"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
    Ok(())
}

#[test]
fn test_config_file_defaults() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("keep.md", "keyword in markdown\n"),
            ("skip.txt", "keyword in text\n"),
            ("settings.yaml", "file_pattern: \"*.md\"\n"),
        ],
    )?;

    keyscout(dir.path())?
        .arg("keyword")
        .arg("--config")
        .arg(dir.path().join("settings.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.md, line 1:"))
        .stdout(predicate::str::contains("skip.txt").not());
    Ok(())
}
