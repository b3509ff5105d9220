//! Staging directory layout
//!
//! Every path in the manifest is relative to the base dir (the directory that
//! holds `gemstage.yaml`) unless it is absolute.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Gem home directory name inside the build directory
pub const GEM_HOME_DIR: &str = "rubygems";

/// Unpacked packages inside the gem home
pub const GEMS_DIR: &str = "gems";

/// Descriptor root inside the gem home
pub const SPECIFICATIONS_DIR: &str = "specifications";

/// `layout:` section of the manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LayoutConfig {
    /// Package cache holding `{name}-{version}.gem` archives
    pub build_dir: PathBuf,
    /// Shared-library root receiving each package's `lib/*`
    pub shared_lib: PathBuf,
    /// Executable-stub root mirroring `gems/{name}-{version}/bin`
    pub bin_stubs: PathBuf,
    /// Where staged descriptors are copied
    pub default_specs: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("target"),
            shared_lib: PathBuf::from("ruby/shared"),
            bin_stubs: PathBuf::from("ruby/gems/shared/gems"),
            default_specs: PathBuf::from("ruby/gems/shared/specifications/default"),
        }
    }
}

/// Absolute staging directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    pub build_dir: PathBuf,
    pub gem_home: PathBuf,
    pub gems_dir: PathBuf,
    pub specs_dir: PathBuf,
    pub shared_lib: PathBuf,
    pub bin_stubs: PathBuf,
    pub default_specs: PathBuf,
}

impl StagingLayout {
    pub fn resolve(base_dir: &Path, config: &LayoutConfig) -> Self {
        let build_dir = resolve_path(base_dir, &config.build_dir);
        let gem_home = build_dir.join(GEM_HOME_DIR);
        Self {
            gems_dir: gem_home.join(GEMS_DIR),
            specs_dir: gem_home.join(SPECIFICATIONS_DIR),
            gem_home,
            build_dir,
            shared_lib: resolve_path(base_dir, &config.shared_lib),
            bin_stubs: resolve_path(base_dir, &config.bin_stubs),
            default_specs: resolve_path(base_dir, &config.default_specs),
        }
    }
}

/// Join `path` onto `base_dir` unless it is already absolute
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
