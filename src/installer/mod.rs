//! Package installation
//!
//! Unpacking a gem archive into a gem home is delegated to the package
//! manager. Dependencies are never resolved: the manifest is a flat,
//! fully-enumerated list.

use std::path::Path;

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::process;

/// Installs a single archive into a gem home
pub trait PackageInstaller {
    /// Install `archive` under `gem_home`, ignoring transitive dependencies
    fn install(&self, archive: &Path, gem_home: &Path) -> Result<()>;
}

/// Runs `gem install` in local mode
pub struct GemCommandInstaller {
    program: String,
    extra_args: Vec<String>,
}

impl GemCommandInstaller {
    pub fn new(config: &InstallerConfig) -> Self {
        Self {
            program: config.program.clone(),
            extra_args: config.args.clone(),
        }
    }

    fn arguments(&self, archive: &Path, gem_home: &Path) -> Vec<String> {
        let mut args = vec![
            "install".to_string(),
            "--local".to_string(),
            "--ignore-dependencies".to_string(),
            "--no-document".to_string(),
            "--install-dir".to_string(),
            gem_home.display().to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args.push(archive.display().to_string());
        args
    }
}

impl PackageInstaller for GemCommandInstaller {
    fn install(&self, archive: &Path, gem_home: &Path) -> Result<()> {
        let args = self.arguments(archive, gem_home);
        process::run(&self.program, &args, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_arguments() {
        let installer = GemCommandInstaller::new(&InstallerConfig {
            program: "jgem".to_string(),
            args: vec!["--no-user-install".to_string()],
        });
        let args = installer.arguments(
            Path::new("/b/target/rake-10.1.0.gem"),
            Path::new("/b/target/rubygems"),
        );
        assert_eq!(
            args,
            vec![
                "install",
                "--local",
                "--ignore-dependencies",
                "--no-document",
                "--install-dir",
                "/b/target/rubygems",
                "--no-user-install",
                "/b/target/rake-10.1.0.gem",
            ]
        );
    }

    #[test]
    fn test_missing_program_propagates() {
        let installer = GemCommandInstaller::new(&InstallerConfig {
            program: "gemstage-no-such-gem".to_string(),
            args: Vec::new(),
        });
        assert!(
            installer
                .install(Path::new("a.gem"), Path::new("home"))
                .is_err()
        );
    }
}
