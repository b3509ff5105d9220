//! Gem archive fetching
//!
//! Archives are looked up in repositories using the Maven `rubygems` group
//! layout: `{repo}/rubygems/{name}/{version}/{name}-{version}.gem`. An archive
//! already present in the build directory is never overwritten.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::fs as common_fs;
use crate::domain::PackageDescriptor;
use crate::error::{GemstageError, Result, fs as fs_error};
use crate::http::HttpClient;

/// Maven group id the rubygems proxy publishes under
pub const RUBYGEMS_GROUP: &str = "rubygems";

/// Makes a package's archive available in the build directory
pub trait ArtifactFetcher {
    /// Ensure `dest_dir/{name}-{version}.gem` exists and return its path
    fn fetch(&self, package: &PackageDescriptor, dest_dir: &Path) -> Result<PathBuf>;
}

/// Relative path of an archive inside a repository
pub fn repository_path(package: &PackageDescriptor) -> String {
    format!(
        "{RUBYGEMS_GROUP}/{}/{}/{}",
        package.name,
        package.version,
        package.archive_file_name()
    )
}

/// Fetches from a local repository directory, then from a remote one
pub struct RepositoryFetcher<'a> {
    local: Option<PathBuf>,
    remote: Option<String>,
    http: &'a dyn HttpClient,
}

impl<'a> RepositoryFetcher<'a> {
    pub fn new(local: Option<PathBuf>, remote: Option<String>, http: &'a dyn HttpClient) -> Self {
        Self {
            local,
            remote: remote.map(|r| r.trim_end_matches('/').to_string()),
            http,
        }
    }

    fn download(&self, url: &str, target: &Path) -> Result<()> {
        let bytes = self.http.get_bytes(url)?;
        let dir = target.parent().unwrap_or_else(|| Path::new("."));

        // Staged beside the target, moved into place only when complete
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| fs_error::write_failed(dir, &e))?;
        tmp.write_all(&bytes)
            .map_err(|e| fs_error::write_failed(tmp.path(), &e))?;
        tmp.persist_noclobber(target)
            .map_err(|e| fs_error::write_failed(target, &e.error))?;
        Ok(())
    }
}

impl ArtifactFetcher for RepositoryFetcher<'_> {
    fn fetch(&self, package: &PackageDescriptor, dest_dir: &Path) -> Result<PathBuf> {
        let target = dest_dir.join(package.archive_file_name());
        if target.is_file() {
            tracing::debug!(archive = %target.display(), "archive already present");
            return Ok(target);
        }

        common_fs::ensure_dir(dest_dir)?;
        let relative = repository_path(package);

        if let Some(local) = &self.local {
            let candidate = local.join(&relative);
            if candidate.is_file() {
                tracing::info!("copy {} from {}", package.archive_file_name(), local.display());
                common_fs::copy_file(&candidate, &target)?;
                return Ok(target);
            }
        }

        if let Some(remote) = &self.remote {
            let url = format!("{remote}/{relative}");
            tracing::info!("download {url}");
            self.download(&url, &target)?;
            return Ok(target);
        }

        Err(GemstageError::ArchiveMissing {
            name: package.name.clone(),
            version: package.version.clone(),
            path: target.display().to_string(),
        })
    }
}
