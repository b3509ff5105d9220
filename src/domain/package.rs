//! Package descriptor
//!
//! A declared `(name, version)` pair plus the spec-only flag. Naming rules for
//! the files a gem produces (archive, unpacked directory, gemspec) live here so
//! the staging plan and the executor agree on them.

use serde::Serialize;

/// Extension of metadata descriptor files in a `specifications/` directory
pub const DESCRIPTOR_EXTENSION: &str = ".gemspec";

/// Extension of packaged gem archives
pub const ARCHIVE_EXTENSION: &str = ".gem";

/// A package to stage, fully resolved from the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    /// Only the descriptor is staged; library files stay out of the shared tree
    pub spec_only: bool,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            spec_only: false,
        }
    }

    pub fn spec_only(mut self, spec_only: bool) -> Self {
        self.spec_only = spec_only;
        self
    }

    /// `{name}-{version}`, the stem shared by every file the package owns
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// File name of the packaged archive in the build directory
    pub fn archive_file_name(&self) -> String {
        format!("{}{}", self.full_name(), ARCHIVE_EXTENSION)
    }

    /// Whether `file_name` is a descriptor for this package (`{name}-{version}*.gemspec`)
    ///
    /// Platform-suffixed descriptors such as `jruby-openssl-0.9.4-java.gemspec`
    /// match as well.
    pub fn matches_descriptor(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.full_name()) && file_name.ends_with(DESCRIPTOR_EXTENSION)
    }

    /// Whether `dir_name` is an unpacked directory of this package (`{name}-{version}*`)
    pub fn matches_unpacked_dir(&self, dir_name: &str) -> bool {
        dir_name.starts_with(&self.full_name())
    }
}

impl std::fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}
