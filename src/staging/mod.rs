//! Gem staging
//!
//! Staging runs in two phases:
//! 1. [`Stager::reserve`] creates the descriptor target directory and every
//!    placeholder file. A package that requires one of its own files while
//!    being installed finds the empty stand-in instead of failing.
//! 2. [`Stager::apply`] executes one [`StagingAction`] against the file system.
//!    It only accepts a [`Reservation`], so it cannot run before phase 1.
//!
//! Errors are not caught. The first failing fetch, install, or copy aborts the run.

pub mod plan;
pub mod stubs;


use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::common::fs as common_fs;
use crate::config::StagingLayout;
use crate::domain::PackageDescriptor;
use crate::error::{GemstageError, Result, fs as fs_error};
use crate::fetch::ArtifactFetcher;
use crate::installer::PackageInstaller;

pub use plan::{StagingAction, installed_descriptors, plan};

/// Proof that the reserve phase ran
#[derive(Debug)]
pub struct Reservation {
    created: Vec<PathBuf>,
}

impl Reservation {
    /// Placeholders this run created (pre-existing ones are not listed)
    pub fn created(&self) -> &[PathBuf] {
        &self.created
    }
}

/// Outcome of a single action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Skipped { package: String },
    Staged(StagedPackage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedPackage {
    pub package: String,
    /// Top-level `lib/` entries merged into the shared tree
    pub lib_entries: usize,
    pub bin_files: usize,
    pub descriptor: String,
}

/// Summary of a whole staging run
#[derive(Debug, Default, Serialize)]
pub struct StagingReport {
    pub placeholders: Vec<PathBuf>,
    pub outcomes: Vec<ActionOutcome>,
    pub loader_stubs: Vec<PathBuf>,
}

impl StagingReport {
    pub fn staged_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ActionOutcome::Staged(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.staged_count()
    }
}

/// Executes staging actions with injected fetch and install capabilities
pub struct Stager<'a> {
    layout: &'a StagingLayout,
    fetcher: &'a dyn ArtifactFetcher,
    installer: &'a dyn PackageInstaller,
}

impl<'a> Stager<'a> {
    pub fn new(
        layout: &'a StagingLayout,
        fetcher: &'a dyn ArtifactFetcher,
        installer: &'a dyn PackageInstaller,
    ) -> Self {
        Self {
            layout,
            fetcher,
            installer,
        }
    }

    /// Phase 1: create target directories and empty placeholder files
    pub fn reserve(&self, placeholders: &[PathBuf]) -> Result<Reservation> {
        common_fs::ensure_dir(&self.layout.default_specs)?;

        let mut created = Vec::new();
        for placeholder in placeholders {
            if placeholder.exists() {
                tracing::debug!(path = %placeholder.display(), "placeholder already present");
                continue;
            }
            common_fs::ensure_parent_dir(placeholder)?;
            std::fs::File::create(placeholder)
                .map_err(|e| fs_error::write_failed(placeholder, &e))?;
            tracing::debug!(path = %placeholder.display(), "reserved placeholder");
            created.push(placeholder.clone());
        }

        Ok(Reservation { created })
    }

    /// Phase 2: execute one action
    pub fn apply(&self, _reservation: &Reservation, action: &StagingAction) -> Result<ActionOutcome> {
        match action {
            StagingAction::Skip {
                package,
                descriptor,
            } => {
                tracing::debug!("{package} already staged ({descriptor})");
                Ok(ActionOutcome::Skipped {
                    package: package.full_name(),
                })
            }
            StagingAction::Stage { package } => self.stage(package).map(ActionOutcome::Staged),
        }
    }

    /// Rewrite every loader stub
    pub fn write_loader_stubs(&self, loader_stubs: &[(PathBuf, Vec<String>)]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (path, archives) in loader_stubs {
            stubs::write(path, archives)?;
            tracing::debug!(path = %path.display(), "wrote loader stub");
            written.push(path.clone());
        }
        Ok(written)
    }

    fn stage(&self, package: &PackageDescriptor) -> Result<StagedPackage> {
        let archive = self.fetcher.fetch(package, &self.layout.build_dir)?;

        self.installer
            .install(&archive, &self.layout.gem_home)
            .map_err(|e| GemstageError::InstallFailed {
                name: package.name.clone(),
                version: package.version.clone(),
                reason: e.to_string(),
            })?;

        let lib_entries = if package.spec_only {
            0
        } else {
            tracing::info!("setup gem {package}");
            self.copy_lib(package)?
        };
        let bin_files = self.copy_bin(package)?;
        let descriptor = self.copy_descriptor(package)?;

        Ok(StagedPackage {
            package: package.full_name(),
            lib_entries,
            bin_files,
            descriptor,
        })
    }

    /// Copy `gems/{name}-{version}*/lib/*` into the shared-library root
    fn copy_lib(&self, package: &PackageDescriptor) -> Result<usize> {
        let mut copied = 0;
        for unpacked in common_fs::list_dir(&self.layout.gems_dir)? {
            let matches = unpacked
                .file_name()
                .is_some_and(|n| package.matches_unpacked_dir(&n.to_string_lossy()));
            if !matches {
                continue;
            }

            for entry in common_fs::list_dir(&unpacked.join("lib"))? {
                common_fs::copy_entry_into(&entry, &self.layout.shared_lib)?;
                copied += 1;
            }
        }
        Ok(copied)
    }

    /// Copy `gems/{name}-{version}/bin/*` to the stub root under the same subpath
    fn copy_bin(&self, package: &PackageDescriptor) -> Result<usize> {
        let bin = self.layout.gems_dir.join(package.full_name()).join("bin");
        if !bin.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in common_fs::list_dir(&bin)? {
            let target = self.bin_stub_target(&entry)?;
            if let Some(name) = entry.file_name() {
                tracing::info!("copy bin file {}", name.to_string_lossy());
            }
            copied += common_fs::copy_entry_to(&entry, &target)?;
        }
        Ok(copied)
    }

    fn bin_stub_target(&self, entry: &Path) -> Result<PathBuf> {
        let relative =
            entry
                .strip_prefix(&self.layout.gems_dir)
                .map_err(|e| GemstageError::IoError {
                    message: format!("{}: {e}", entry.display()),
                })?;
        Ok(self.layout.bin_stubs.join(relative))
    }

    /// Copy the first matching descriptor into the default-descriptor root
    fn copy_descriptor(&self, package: &PackageDescriptor) -> Result<String> {
        let descriptor = installed_descriptors(&self.layout.specs_dir)?
            .into_iter()
            .find(|name| package.matches_descriptor(name))
            .ok_or_else(|| GemstageError::DescriptorMissing {
                name: package.name.clone(),
                version: package.version.clone(),
                dir: self.layout.specs_dir.display().to_string(),
            })?;

        tracing::info!("copy specification {descriptor}");
        common_fs::copy_file(
            &self.layout.specs_dir.join(&descriptor),
            &self.layout.default_specs.join(&descriptor),
        )?;
        Ok(descriptor)
    }
}
