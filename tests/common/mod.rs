//! Common test utilities for gemstage integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A build directory with a manifest in it
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the build root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write `gemstage.yaml` at the workspace root
    pub fn write_manifest(&self, content: &str) {
        self.write_file("gemstage.yaml", content);
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Mark a gem as already installed in the default gem home
    pub fn pre_stage(&self, full_name: &str) {
        self.write_file(
            &format!("target/rubygems/specifications/{full_name}.gemspec"),
            &format!("# spec for {full_name}\n"),
        );
    }

    /// Put an archive into a Maven-style local repository under the workspace
    pub fn publish_local(&self, repo: &str, name: &str, version: &str) -> PathBuf {
        let relative = format!("{repo}/rubygems/{name}/{version}/{name}-{version}.gem");
        self.write_file(&relative, &format!("{name}-{version}"));
        self.path.join(relative)
    }

    /// Relative listing of every file under `dir`, sorted
    pub fn files_under(&self, dir: &str) -> Vec<String> {
        let root = self.path.join(dir);
        let mut files = Vec::new();
        collect_files(&root, &root, &mut files);
        files.sort();
        files
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

/// gemstage binary with developer overrides removed
#[allow(deprecated, dead_code)]
pub fn gemstage_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gemstage").expect("gemstage binary");
    cmd.env_remove("GEMSTAGE_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Shell script standing in for `gem install`
///
/// Writes `gems/{stem}/lib/{stem}.rb`, `gems/{stem}/bin/{stem}` and
/// `specifications/{stem}.gemspec` under the `--install-dir` it is given.
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_gem_installer(workspace: &TestWorkspace) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = workspace.path.join("fake-gem");
    std::fs::write(
        &script,
        r##"#!/bin/sh
home=""
archive=""
while [ $# -gt 0 ]; do
  case "$1" in
    --install-dir) home="$2"; shift 2 ;;
    --*) shift ;;
    *) archive="$1"; shift ;;
  esac
done
stem=$(basename "$archive" .gem)
mkdir -p "$home/gems/$stem/lib" "$home/gems/$stem/bin" "$home/specifications"
echo "# $stem" > "$home/gems/$stem/lib/$stem.rb"
echo "#!/usr/bin/env ruby" > "$home/gems/$stem/bin/$stem"
echo "# spec" > "$home/specifications/$stem.gemspec"
"##,
    )
    .expect("Failed to write installer script");
    let mut perms = std::fs::metadata(&script).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script, perms).expect("Failed to chmod installer script");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_pre_stage_writes_specification() {
        let workspace = TestWorkspace::new();
        workspace.pre_stage("rake-10.1.0");
        assert_eq!(
            workspace.files_under("target/rubygems/specifications"),
            vec!["rake-10.1.0.gemspec".to_string()]
        );
    }
}
