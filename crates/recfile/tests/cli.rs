use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn recfile(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("recfile")?;
    cmd.env("RECFILE_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG")
        .current_dir(dir);
    Ok(cmd)
}

const ITEM: &str = r#"{"id":"1","email":"a@x.com","age":30}"#;

#[test]
fn add_find_remove_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("items.json");

    recfile(dir.path())?
        .args(["-operation", "add", "-fileName", "items.json", "-item", ITEM])
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(&file)?, format!("[{}]", ITEM));

    recfile(dir.path())?
        .args(["-operation", "findById", "-fileName", "items.json", "-id", "1"])
        .assert()
        .success()
        .stdout(ITEM);

    recfile(dir.path())?
        .args(["-operation=remove", "-fileName=items.json", "-id=1"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(&file)?, "[]");

    recfile(dir.path())?
        .args(["--operation", "findById", "--fileName", "items.json", "--id", "1"])
        .assert()
        .success()
        .stdout("");
    Ok(())
}

#[test]
fn list_on_missing_file_prints_empty_array() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json"])
        .assert()
        .success()
        .stdout("[]");
    assert!(dir.path().join("items.json").exists());
    Ok(())
}

#[test]
fn duplicate_add_and_missing_remove_print_messages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("items.json"), format!("[{}]", ITEM))?;

    recfile(dir.path())?
        .args(["-operation", "add", "-fileName", "items.json", "-item", ITEM])
        .assert()
        .success()
        .stdout("Item with id 1 already exists");

    recfile(dir.path())?
        .args(["-operation", "remove", "-fileName", "items.json", "-id", "2"])
        .assert()
        .success()
        .stdout("Item with id 2 not found");

    assert_eq!(
        fs::read_to_string(dir.path().join("items.json"))?,
        format!("[{}]", ITEM)
    );
    Ok(())
}

#[test]
fn validation_errors_fail() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    recfile(dir.path())?
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("-operation flag has to be specified"));

    recfile(dir.path())?
        .args(["-operation", "update"])
        .assert()
        .failure()
        .stderr(contains("Operation update not allowed!"));

    recfile(dir.path())?
        .args(["-operation", "list"])
        .assert()
        .failure()
        .stderr(contains("-fileName flag has to be specified"));

    recfile(dir.path())?
        .args(["-operation", "add", "-fileName", "items.json"])
        .assert()
        .failure()
        .stderr(contains("-item flag has to be specified"));

    recfile(dir.path())?
        .args(["-operation", "add", "-fileName", "items.json", "-item", "{oops"])
        .assert()
        .failure()
        .stderr(contains("Malformed -item value"));

    recfile(dir.path())?
        .args(["-operation", "remove", "-fileName", "items.json", "-id", ""])
        .assert()
        .failure()
        .stderr(contains("-id flag has to be specified"));
    Ok(())
}

#[test]
fn malformed_store_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("items.json"), "not json")?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json"])
        .assert()
        .failure()
        .stderr(contains("Malformed store"));
    Ok(())
}

#[test]
fn unknown_flag_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json", "--age", "30"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn config_controls_stdout_formatting() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("items.json"), format!("[{}]", ITEM))?;
    fs::write(
        dir.path().join("config.toml"),
        "[output]\npretty = true\ntrailing_newline = true\n",
    )?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[\n  {\n").and(predicate::str::ends_with("]\n")));

    let custom = dir.path().join("compact.toml");
    fs::write(&custom, "[output]\ntrailing_newline = true\n")?;
    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json", "--config"])
        .arg(&custom)
        .assert()
        .success()
        .stdout(format!("[{}]\n", ITEM));
    Ok(())
}

#[test]
fn malformed_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("config.toml"), "[output\n")?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json"])
        .assert()
        .failure()
        .stderr(contains("TOML parse error"));
    Ok(())
}

#[test]
fn profile_flag_reports_timings_on_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "items.json", "--profile"])
        .assert()
        .success()
        .stdout("[]")
        .stderr(contains("[profile]").and(contains("load")).and(contains("dispatch")));
    Ok(())
}

#[test]
fn arguments_after_first_non_flag_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    recfile(dir.path())?
        .args(["-operation", "list", "-fileName", "a.json", "-fileName", "items.json"])
        .args(["extra", "-operation", "add"])
        .assert()
        .success()
        .stdout("[]");
    assert!(dir.path().join("items.json").exists());
    assert!(!dir.path().join("a.json").exists());
    Ok(())
}

fn contains(s: &'static str) -> predicates::str::ContainsPredicate {
    predicate::str::contains(s)
}
