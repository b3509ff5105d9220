//! Error reporting tests

mod common;

use common::gemstage_cmd;
use predicates::prelude::*;

#[test]
fn test_missing_manifest() {
    let workspace = common::TestWorkspace::new();

    gemstage_cmd()
        .current_dir(&workspace.path)
        .arg("stage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("gemstage.yaml"));
}

#[test]
fn test_unknown_manifest_field() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("gems: []\n");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .arg("stage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_undefined_version_property() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("packages:\n  - {name: krypt, version: '${krypt.version}'}\n");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .args(["stage", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("krypt.version"));

    assert!(!workspace.file_exists("target"));
}

#[test]
fn test_define_supplies_missing_property() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        "properties:\n  krypt.version: 0.0.2\npackages:\n  - {name: krypt, version: '${krypt.version}'}\n",
    );

    gemstage_cmd()
        .current_dir(&workspace.path)
        .args(["-D", "krypt.version=0.0.3", "stage", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("krypt-0.0.3"));
}

#[test]
fn test_deploy_without_section() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("packages: []\n");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("deploy"));
}

#[test]
fn test_deploy_missing_archive_fails_before_server() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        "deploy:\n  archive: target/app.war\n  exploded: target/app\n  \
         server: {install_dir: wlp, name: testing}\n",
    );

    gemstage_cmd()
        .current_dir(&workspace.path)
        .args(["deploy", "--skip-package"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("app.war"));

    assert!(!workspace.file_exists("wlp/usr/servers/testing/dropins/packed.war"));
}

#[test]
fn test_unquoted_decimal_version() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("packages:\n  - {name: bouncy-castle-java, version: 1.50}\n");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .args(["stage", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("bouncy-castle-java"));
}
