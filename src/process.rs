//! External process execution
//!
//! All external tools (package manager, build command, server script) run
//! through [`run`]: blocking, captured output, non-zero exit is an error.

use std::path::Path;
use std::process::Command;

use crate::error::{GemstageError, Result};

/// Render a program and its arguments for messages
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args`, returning its stdout
pub fn run(program: &str, args: &[String], cwd: Option<&Path>) -> Result<String> {
    let rendered = command_line(program, args);
    tracing::debug!(command = %rendered, "running");

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command
        .output()
        .map_err(|e| GemstageError::ProcessSpawnFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GemstageError::ProcessFailed {
            command: rendered,
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let args = vec!["install".to_string(), "--local".to_string()];
        assert_eq!(command_line("gem", &args), "gem install --local");
    }

    #[test]
    fn test_spawn_failure() {
        let err = run("gemstage-definitely-not-a-program", &[], None).unwrap_err();
        assert!(matches!(err, GemstageError::ProcessSpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let args = vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()];
        let err = run("sh", &args, None).unwrap_err();
        match err {
            GemstageError::ProcessFailed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_captured_in_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = run("pwd", &[], Some(temp.path())).unwrap();
        assert!(!out.trim().is_empty());
    }
}
