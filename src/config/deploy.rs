//! `deploy:` section of the manifest

use std::path::PathBuf;

use serde::Deserialize;

/// How an artifact is placed into the dropins directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentForm {
    /// The single-file archive
    Packed,
    /// The exploded directory tree
    Unpacked,
}

/// One deployment under test
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Context root; deployed as `{name}.war`
    pub name: String,
    pub form: DeploymentForm,
    /// File the downloaded body is saved to
    pub result: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Server runtime installation directory (contains `bin/server`)
    pub install_dir: PathBuf,
    /// Server instance name
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Command that builds the archive, e.g. `[mvn, package]`
    #[serde(default)]
    pub package_command: Vec<String>,

    /// Packed archive produced by the package step
    pub archive: PathBuf,

    /// Exploded archive directory produced by the package step
    pub exploded: PathBuf,

    pub server: ServerConfig,

    /// Hot-deploy directory; defaults to `{install_dir}/usr/servers/{name}/dropins`
    #[serde(default)]
    pub dropins: Option<PathBuf>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page requested under each deployment's context root
    #[serde(default = "default_index")]
    pub index: String,

    /// Literal substrings every downloaded body must contain
    #[serde(default = "default_expected")]
    pub expected: Vec<String>,

    /// Directory to write `.jrubydir` indexes into before packaging
    #[serde(default)]
    pub dir_info: Option<PathBuf>,

    #[serde(default = "default_deployments")]
    pub deployments: Vec<DeploymentConfig>,
}

fn default_base_url() -> String {
    "http://localhost:9080".to_string()
}

fn default_index() -> String {
    "index.jsp".to_string()
}

fn default_expected() -> Vec<String> {
    vec![
        "hello world:".to_string(),
        "uri:classloader:/gems/backports-".to_string(),
    ]
}

fn default_deployments() -> Vec<DeploymentConfig> {
    vec![
        DeploymentConfig {
            name: "packed".to_string(),
            form: DeploymentForm::Packed,
            result: PathBuf::from("result1"),
        },
        DeploymentConfig {
            name: "unpacked".to_string(),
            form: DeploymentForm::Unpacked,
            result: PathBuf::from("result2"),
        },
    ]
}
