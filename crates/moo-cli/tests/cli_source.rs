use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn moo_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("moo").unwrap();
    cmd.env("MOO_HOME", home.path())
        .env_remove("MOO_DIR")
        .env_remove("MOO_API_KEY");
    cmd
}

#[test]
fn test_source_list_shows_default_feed() {
    let home = TempDir::new().unwrap();
    moo_cmd(&home)
        .args(["source", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nuget https://www.nuget.org/api/v2"));
}

#[test]
fn test_source_add_and_remove() {
    let home = TempDir::new().unwrap();

    moo_cmd(&home)
        .args(["source", "add", "team", "/srv/team-packages"])
        .assert()
        .success();

    let config = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(config.contains("[[source]]"));
    assert!(config.contains("name = \"team\""));

    moo_cmd(&home)
        .args(["source", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nuget"))
        .stdout(predicate::str::contains("team /srv/team-packages"));

    moo_cmd(&home)
        .args(["source", "add", "team", "/elsewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    moo_cmd(&home)
        .args(["source", "remove", "nuget"])
        .assert()
        .success();

    moo_cmd(&home)
        .args(["source", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nuget").not());
}

#[test]
fn test_unknown_source_flag() {
    let home = TempDir::new().unwrap();
    moo_cmd(&home)
        .args(["search", "anything", "--source", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source named 'missing'"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "source = 5\n").unwrap();
    moo_cmd(&home)
        .args(["source", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
