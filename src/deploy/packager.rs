//! Archive packaging
//!
//! Building the web archive is the build tool's job; this only invokes it.

use std::path::{Path, PathBuf};

use crate::error::{Result, config};
use crate::process;

pub trait Packager {
    fn package(&self) -> Result<()>;
}

/// Runs a configured command line in the base dir
pub struct CommandPackager {
    argv: Vec<String>,
    cwd: PathBuf,
}

impl CommandPackager {
    /// `None` when no command is configured
    pub fn from_argv(argv: &[String], cwd: &Path) -> Option<Self> {
        if argv.is_empty() {
            return None;
        }
        Some(Self {
            argv: argv.to_vec(),
            cwd: cwd.to_path_buf(),
        })
    }
}

impl Packager for CommandPackager {
    fn package(&self) -> Result<()> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| config::invalid("package_command is empty"))?;
        tracing::info!("package: {}", process::command_line(program, args));
        process::run(program, args, Some(&self.cwd))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_means_no_packager() {
        assert!(CommandPackager::from_argv(&[], Path::new(".")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_base_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            "touch packaged".to_string(),
        ];
        let packager = CommandPackager::from_argv(&argv, temp.path()).unwrap();
        packager.package().unwrap();
        assert!(temp.path().join("packaged").exists());
    }
}
