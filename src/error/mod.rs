//! Error types and handling for gemstage
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Convenience constructors are grouped by error domain:
//! - [`config`]: Manifest and property errors
//! - [`fs`]: File system errors
//! - [`deploy`]: Deployment and verification errors

pub mod config;
pub mod deploy;
pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gemstage operations
#[derive(Error, Diagnostic, Debug)]
pub enum GemstageError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(gemstage::config::not_found),
        help("Pass --config <path> or create gemstage.yaml in the current directory")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(gemstage::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(gemstage::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(gemstage::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Undefined property '{name}'")]
    #[diagnostic(
        code(gemstage::config::undefined_property),
        help("Declare it under `properties:` or pass -D {name}=<value>")
    )]
    UndefinedProperty { name: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(gemstage::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(gemstage::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(gemstage::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(gemstage::fs::io_error))]
    IoError { message: String },

    // Staging errors
    #[error("Gem archive not found for {name}-{version}: {path}")]
    #[diagnostic(
        code(gemstage::staging::archive_missing),
        help("Check the repository setting and that the version property is correct")
    )]
    ArchiveMissing {
        name: String,
        version: String,
        path: String,
    },

    #[error("Failed to install gem {name}-{version}: {reason}")]
    #[diagnostic(code(gemstage::staging::install_failed))]
    InstallFailed {
        name: String,
        version: String,
        reason: String,
    },

    #[error("No specification for {name}-{version} in {dir} after install")]
    #[diagnostic(code(gemstage::staging::descriptor_missing))]
    DescriptorMissing {
        name: String,
        version: String,
        dir: String,
    },

    // Process errors
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(
        code(gemstage::process::spawn_failed),
        help("Check that the program is installed and on PATH")
    )]
    ProcessSpawnFailed { program: String, reason: String },

    #[error("'{command}' exited with {status}: {stderr}")]
    #[diagnostic(code(gemstage::process::exit_status))]
    ProcessFailed {
        command: String,
        status: String,
        stderr: String,
    },

    // HTTP errors
    #[error("HTTP request to {url} failed: {reason}")]
    #[diagnostic(code(gemstage::http::request_failed))]
    HttpRequestFailed { url: String, reason: String },

    // Deploy errors
    #[error("missed expected string in download: {expected}")]
    #[diagnostic(
        code(gemstage::deploy::missing_substring),
        help("The response saved for {url} did not contain the expected text")
    )]
    MissingExpectedString { expected: String, url: String },

    #[error("Server '{server}' failed to {action}: {reason}")]
    #[diagnostic(code(gemstage::deploy::server_control))]
    ServerControlFailed {
        server: String,
        action: String,
        reason: String,
    },
}

impl From<std::io::Error> for GemstageError {
    fn from(err: std::io::Error) -> Self {
        GemstageError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for GemstageError {
    fn from(err: serde_yaml::Error) -> Self {
        GemstageError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GemstageError {
    fn from(err: serde_json::Error) -> Self {
        GemstageError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for GemstageError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        GemstageError::FileReadFailed {
            path,
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GemstageError>;
