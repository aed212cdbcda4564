use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn gjp_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gjp"));
    cmd.current_dir(dir);
    cmd
}

fn new_project(tmp: &TempDir) -> PathBuf {
    gjp_cmd(tmp.path())
        .args(["new", "demo"])
        .assert()
        .success()
        .stdout(contains("Created gjp project 'demo'"));
    tmp.path().join("demo")
}

fn git_tags(root: &Path) -> Vec<String> {
    let output = Command::new("git")
        .args(["tag", "--list"])
        .current_dir(root)
        .output()
        .expect("git tag");
    String::from_utf8(output.stdout)
        .expect("utf8")
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn new_scaffolds_a_project() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    assert!(root.join("src").is_dir());
    assert!(root.join("kit").is_dir());
    assert!(root.join("file_lists").is_dir());
    assert!(root.join("build.xml").exists());
    assert!(root.join(".git").exists());
}

#[test]
fn new_refuses_an_existing_project() {
    let tmp = TempDir::new().expect("tempdir");
    new_project(&tmp);

    gjp_cmd(tmp.path())
        .args(["new", "demo"])
        .assert()
        .failure()
        .stderr(contains("already contains a gjp project"));
}

#[test]
fn gathering_flow_records_inputs_and_tags() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    gjp_cmd(&root)
        .arg("gather")
        .assert()
        .success()
        .stdout(contains("gathering started"));

    fs::create_dir_all(root.join("src/foo")).expect("mkdir");
    fs::write(root.join("src/foo/A.java"), "class A {}").expect("write");

    gjp_cmd(&root)
        .arg("finish")
        .assert()
        .success()
        .stdout(contains("gathering finished"));

    let list = fs::read_to_string(root.join("file_lists/foo_input")).expect("read list");
    assert_eq!(list, "A.java\n");
    assert!(git_tags(&root).contains(&"gjp_gathering_finished_1".to_string()));
}

#[test]
fn dry_run_flow_restores_sources() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    // Seed a source file through a gathering cycle.
    gjp_cmd(&root).arg("gather").assert().success();
    fs::create_dir_all(root.join("src/foo")).expect("mkdir");
    fs::write(root.join("src/foo/A.java"), "original").expect("write");
    gjp_cmd(&root).arg("finish").assert().success();

    gjp_cmd(&root)
        .arg("dry-run")
        .assert()
        .success()
        .stdout(contains("dry run started"));

    fs::write(root.join("src/foo/A.java"), "mutated by build").expect("write");
    fs::write(root.join("kit/lib.jar"), "new jar").expect("write");

    gjp_cmd(&root)
        .arg("finish")
        .assert()
        .success()
        .stdout(contains("dry-running finished"));

    let a = fs::read_to_string(root.join("src/foo/A.java")).expect("read A");
    assert_eq!(a, "original");
    let jar = fs::read_to_string(root.join("kit/lib.jar")).expect("read jar");
    assert_eq!(jar, "new jar");

    let output = fs::read_to_string(root.join("file_lists/foo_output")).expect("read list");
    assert_eq!(output, "A.java\n");
    assert!(git_tags(&root).contains(&"gjp_dry_run_finished_1".to_string()));
}

#[test]
fn second_gather_reports_already_active() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    gjp_cmd(&root).arg("gather").assert().success();
    gjp_cmd(&root)
        .arg("gather")
        .assert()
        .success()
        .stdout(contains("already active"));
}

#[test]
fn finish_without_phase_reports_nothing_to_do() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    gjp_cmd(&root)
        .arg("finish")
        .assert()
        .success()
        .stdout(contains("nothing to finish"));
}

#[test]
fn commands_work_from_a_nested_directory() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);
    let nested = root.join("src").join("deep").join("er");
    fs::create_dir_all(&nested).expect("mkdir");

    gjp_cmd(&nested)
        .arg("gather")
        .assert()
        .success()
        .stdout(contains("gathering started"));
    assert!(root.join("gathering").exists(), "marker lands at the root");
}

#[test]
fn status_json_reports_phase_and_counters() {
    let tmp = TempDir::new().expect("tempdir");
    let root = new_project(&tmp);

    gjp_cmd(&root).arg("gather").assert().success();

    let assert = gjp_cmd(&root).args(["status", "--json"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(json["phase"], "gathering");
    let started = json["tags"]
        .as_array()
        .expect("tags array")
        .iter()
        .find(|tag| tag["tag_type"] == "gathering_started")
        .expect("gathering_started row");
    assert_eq!(started["count"], 1);
    assert_eq!(started["latest"], "gjp_gathering_started_1");
}

#[test]
fn outside_a_project_is_an_invalid_project_error() {
    let tmp = TempDir::new().expect("tempdir");

    gjp_cmd(tmp.path())
        .arg("gather")
        .assert()
        .failure()
        .stderr(contains("not inside a gjp project"));
}
