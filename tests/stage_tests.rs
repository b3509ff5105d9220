//! End-to-end staging tests

mod common;

use common::gemstage_cmd;
use predicates::prelude::*;

const LOADER_STUB: &str = "ruby/shared/bouncy-castle-java.rb";

#[test]
fn test_all_staged_writes_only_placeholder_and_stub() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest(
        "packages:\n  - {name: rake, version: 10.1.0}\n  - {name: rdoc, version: 4.0.1}\n",
    );
    workspace.pre_stage("rake-10.1.0");
    workspace.pre_stage("rdoc-4.0.1");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .arg("stage")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged 0 gems, 2 already staged"));

    assert_eq!(workspace.read_file("target/lib/openssl.rb"), "");
    assert!(workspace.file_exists("ruby/gems/shared/specifications/default"));
    assert_eq!(
        workspace.read_file(LOADER_STUB),
        "require File.expand_path('bcpkix-jdk15on-147.jar', File.dirname(__FILE__))\n\
         require File.expand_path('bcprov-jdk15on-147.jar', File.dirname(__FILE__))\n"
    );
    assert_eq!(workspace.files_under("ruby/shared").len(), 1);
}

#[test]
fn test_existing_placeholder_is_kept() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("packages: []\n");
    workspace.write_file("target/lib/openssl.rb", "# real openssl shim\n");

    gemstage_cmd()
        .current_dir(&workspace.path)
        .arg("stage")
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("target/lib/openssl.rb"),
        "# real openssl shim\n"
    );
}

#[test]
fn test_json_report() {
    let workspace = common::TestWorkspace::new();
    workspace.write_manifest("packages:\n  - {name: rake, version: 10.1.0}\n");
    workspace.pre_stage("rake-10.1.0");

    let output = gemstage_cmd()
        .current_dir(&workspace.path)
        .args(["stage", "--json"])
        .output()
        .expect("run gemstage");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report is valid JSON");
    assert_eq!(report["outcomes"][0]["outcome"], "skipped");
    assert_eq!(report["outcomes"][0]["package"], "rake-10.1.0");
    assert_eq!(report["loader_stubs"].as_array().map(Vec::len), Some(1));
}

#[cfg(unix)]
mod with_installer {
    use super::*;

    fn manifest(installer: &std::path::Path) -> String {
        format!(
            "local_repository: m2\n\
             repository: null\n\
             installer:\n  program: {}\n\
             packages:\n  \
               - {{name: rake, version: 10.1.0}}\n  \
               - {{name: json, version: 1.8.0}}\n\
             spec_only: [json]\n",
            installer.display()
        )
    }

    #[test]
    fn test_stage_from_local_repository() {
        let workspace = common::TestWorkspace::new();
        let installer = common::fake_gem_installer(&workspace);
        workspace.write_manifest(&manifest(&installer));
        workspace.publish_local("m2", "rake", "10.1.0");
        workspace.publish_local("m2", "json", "1.8.0");

        gemstage_cmd()
            .current_dir(&workspace.path)
            .arg("stage")
            .assert()
            .success()
            .stdout(predicate::str::contains("Staged 2 gems, 0 already staged"));

        assert!(workspace.file_exists("target/rake-10.1.0.gem"));
        assert!(workspace.file_exists("ruby/shared/rake-10.1.0.rb"));
        assert!(!workspace.file_exists("ruby/shared/json-1.8.0.rb"));
        assert!(workspace.file_exists("ruby/gems/shared/gems/rake-10.1.0/bin/rake-10.1.0"));
        assert_eq!(
            workspace.files_under("ruby/gems/shared/specifications/default"),
            vec![
                "json-1.8.0.gemspec".to_string(),
                "rake-10.1.0.gemspec".to_string()
            ]
        );
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let workspace = common::TestWorkspace::new();
        let installer = common::fake_gem_installer(&workspace);
        workspace.write_manifest(&manifest(&installer));
        workspace.publish_local("m2", "rake", "10.1.0");
        workspace.publish_local("m2", "json", "1.8.0");

        gemstage_cmd()
            .current_dir(&workspace.path)
            .arg("stage")
            .assert()
            .success();

        workspace.write_file("ruby/shared/rake-10.1.0.rb", "# patched\n");
        std::fs::remove_file(workspace.path.join("target/rake-10.1.0.gem")).unwrap();

        gemstage_cmd()
            .current_dir(&workspace.path)
            .arg("stage")
            .assert()
            .success()
            .stdout(predicate::str::contains("Staged 0 gems, 2 already staged"));

        assert_eq!(workspace.read_file("ruby/shared/rake-10.1.0.rb"), "# patched\n");
        assert!(!workspace.file_exists("target/rake-10.1.0.gem"));
    }

    #[test]
    fn test_missing_archive_aborts() {
        let workspace = common::TestWorkspace::new();
        let installer = common::fake_gem_installer(&workspace);
        workspace.write_manifest(&manifest(&installer));
        workspace.publish_local("m2", "rake", "10.1.0");

        gemstage_cmd()
            .current_dir(&workspace.path)
            .arg("stage")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("json"));

        assert!(workspace.file_exists("ruby/gems/shared/specifications/default/rake-10.1.0.gemspec"));
        assert!(!workspace.file_exists(LOADER_STUB));
    }
}
