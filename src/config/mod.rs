//! Manifest (`gemstage.yaml`) loading
//!
//! The manifest declares build properties, the packages to stage, the staging
//! layout, and the optional deploy cycle. Paths inside it resolve relative to
//! the directory containing the manifest.

pub mod deploy;
pub mod layout;
pub mod properties;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use normpath::PathExt;
use serde::Deserialize;

use crate::domain::PackageDescriptor;
use crate::error::{Result, config};

pub use deploy::{DeployConfig, DeploymentForm};
pub use layout::{LayoutConfig, StagingLayout, resolve_path};
pub use properties::{Properties, ScalarValue};

/// Default manifest file name looked up in the current directory
pub const MANIFEST_FILE: &str = "gemstage.yaml";

/// Default remote repository serving `rubygems/{name}/{version}/{name}-{version}.gem`
pub const DEFAULT_REPOSITORY: &str = "http://rubygems-proxy.torquebox.org/releases";

/// A package entry as written in the manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageEntry {
    pub name: String,
    /// Literal version or `${property}` reference
    pub version: ScalarValue,
}

/// A generated file that requires archives sitting next to it
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderStubConfig {
    pub path: PathBuf,
    pub archives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InstallerConfig {
    /// Package manager executable
    pub program: String,
    /// Extra arguments appended to the install command
    pub args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "gem".to_string(),
            args: Vec::new(),
        }
    }
}

/// Raw manifest contents
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub properties: BTreeMap<String, ScalarValue>,

    /// Remote repository base URL
    #[serde(default = "default_repository")]
    pub repository: Option<String>,

    /// Maven-style local repository; defaults to `~/.m2/repository`
    #[serde(default)]
    pub local_repository: Option<PathBuf>,

    #[serde(default)]
    pub packages: Vec<PackageEntry>,

    /// Packages whose library files are not merged into the shared tree
    #[serde(default)]
    pub spec_only: Vec<String>,

    #[serde(default)]
    pub layout: LayoutConfig,

    /// Empty stand-in files created before any package is populated
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<PathBuf>,

    #[serde(default = "default_loader_stubs")]
    pub loader_stubs: Vec<LoaderStubConfig>,

    #[serde(default)]
    pub installer: InstallerConfig,

    #[serde(default)]
    pub deploy: Option<DeployConfig>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_repository() -> Option<String> {
    Some(DEFAULT_REPOSITORY.to_string())
}

fn default_placeholders() -> Vec<PathBuf> {
    vec![PathBuf::from("target/lib/openssl.rb")]
}

fn default_loader_stubs() -> Vec<LoaderStubConfig> {
    vec![LoaderStubConfig {
        path: PathBuf::from("ruby/shared/bouncy-castle-java.rb"),
        archives: vec![
            "bcpkix-jdk15on-147.jar".to_string(),
            "bcprov-jdk15on-147.jar".to_string(),
        ],
    }]
}

impl Manifest {
    /// Parse manifest from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate structural rules that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.packages {
            if entry.name.trim().is_empty() {
                return Err(config::invalid("package name must not be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(config::invalid(format!(
                    "package '{}' is declared more than once",
                    entry.name
                )));
            }
        }

        for name in &self.spec_only {
            if !seen.contains(name.as_str()) {
                return Err(config::invalid(format!(
                    "spec_only lists '{name}', which is not a declared package"
                )));
            }
        }

        for stub in &self.loader_stubs {
            if stub.archives.is_empty() {
                return Err(config::invalid(format!(
                    "loader stub {} lists no archives",
                    stub.path.display()
                )));
            }
        }

        Ok(())
    }
}

/// A loaded manifest together with its base dir and resolved properties
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub base_dir: PathBuf,
    pub manifest: Manifest,
    pub properties: Properties,
}

impl Config {
    /// Load the manifest at `path`, or `./gemstage.yaml` when `None`
    pub fn load(path: Option<&Path>, overrides: &[(String, String)]) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::current_dir()?.join(MANIFEST_FILE),
        };

        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }

        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        let manifest: Manifest = serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        manifest.validate()?;

        let base_dir = base_dir_of(&path)?;
        let properties = Properties::new(&manifest.properties, overrides)?;

        tracing::debug!(
            manifest = %path.display(),
            base_dir = %base_dir.display(),
            "loaded manifest"
        );

        Ok(Self {
            path,
            base_dir,
            manifest,
            properties,
        })
    }

    /// Packages in manifest order with versions resolved and spec-only flags applied
    pub fn packages(&self) -> Result<Vec<PackageDescriptor>> {
        let spec_only: HashSet<&str> = self
            .manifest
            .spec_only
            .iter()
            .map(String::as_str)
            .collect();

        self.manifest
            .packages
            .iter()
            .map(|entry| {
                let raw = entry
                    .version
                    .to_text(&format!("version of {}", entry.name))?;
                let version = self.properties.interpolate(&raw)?;
                if version.trim().is_empty() {
                    return Err(config::invalid(format!(
                        "package '{}' resolves to an empty version",
                        entry.name
                    )));
                }
                Ok(PackageDescriptor::new(&entry.name, version)
                    .spec_only(spec_only.contains(entry.name.as_str())))
            })
            .collect()
    }

    pub fn layout(&self) -> StagingLayout {
        StagingLayout::resolve(&self.base_dir, &self.manifest.layout)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.base_dir, path)
    }

    /// Local repository directory, falling back to `~/.m2/repository`
    pub fn local_repository(&self) -> Option<PathBuf> {
        match &self.manifest.local_repository {
            Some(p) => Some(self.resolve(p)),
            None => dirs::home_dir().map(|home| home.join(".m2").join("repository")),
        }
    }

    pub fn deploy(&self) -> Result<&DeployConfig> {
        self.manifest.deploy.as_ref().ok_or_else(|| {
            config::invalid(format!(
                "{} has no `deploy:` section",
                self.path.display()
            ))
        })
    }
}

fn base_dir_of(manifest_path: &Path) -> Result<PathBuf> {
    let parent = match manifest_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    Ok(parent
        .normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or(parent))
}
