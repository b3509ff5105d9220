//! WAR deploy-and-verify cycle
//!
//! Phases run strictly in order:
//! `package → copy → start → request → verify → stop`.
//! Once the server has started, stop is always attempted. If an earlier phase
//! failed, that error is the one reported.

pub mod packager;
pub mod server;
pub mod verify;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::common::fs as common_fs;
use crate::config::{DeployConfig, DeploymentForm, resolve_path};
use crate::error::{Result, fs as fs_error};
use crate::http::HttpClient;

use packager::Packager;
use server::ServerControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Package,
    Copy,
    Start,
    Request,
    Verify,
    Stop,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Package => "package",
            Phase::Copy => "copy-to-server",
            Phase::Start => "start-server",
            Phase::Request => "request",
            Phase::Verify => "verify",
            Phase::Stop => "stop-server",
        };
        f.write_str(name)
    }
}

/// One deployment with every path and URL resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub form: DeploymentForm,
    /// `{dropins}/{name}.war`
    pub target: PathBuf,
    pub url: String,
    pub result: PathBuf,
}

/// Resolved deploy cycle inputs
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub archive: PathBuf,
    pub exploded: PathBuf,
    pub dropins: PathBuf,
    pub deployments: Vec<Deployment>,
    pub expected: Vec<String>,
}

impl DeployPlan {
    pub fn resolve(base_dir: &Path, config: &DeployConfig) -> Self {
        let install_dir = resolve_path(base_dir, &config.server.install_dir);
        let dropins = config.dropins.as_ref().map_or_else(
            || {
                install_dir
                    .join("usr")
                    .join("servers")
                    .join(&config.server.name)
                    .join("dropins")
            },
            |d| resolve_path(base_dir, d),
        );
        let base_url = config.base_url.trim_end_matches('/');

        let deployments = config
            .deployments
            .iter()
            .map(|d| Deployment {
                name: d.name.clone(),
                form: d.form,
                target: dropins.join(format!("{}.war", d.name)),
                url: format!("{base_url}/{}/{}", d.name, config.index),
                result: resolve_path(base_dir, &d.result),
            })
            .collect();

        Self {
            archive: resolve_path(base_dir, &config.archive),
            exploded: resolve_path(base_dir, &config.exploded),
            dropins,
            deployments,
            expected: config.expected.clone(),
        }
    }
}

/// Per-deployment outcome
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub name: String,
    pub url: String,
    pub result: PathBuf,
    pub checks: Vec<verify::Check>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployReport {
    pub completed: Vec<Phase>,
    pub deployments: Vec<DeploymentReport>,
}

/// Runs the cycle against injected collaborators
pub struct DeployCycle<'a> {
    plan: &'a DeployPlan,
    packager: Option<&'a dyn Packager>,
    server: &'a dyn ServerControl,
    http: &'a dyn HttpClient,
}

impl<'a> DeployCycle<'a> {
    pub fn new(
        plan: &'a DeployPlan,
        packager: Option<&'a dyn Packager>,
        server: &'a dyn ServerControl,
        http: &'a dyn HttpClient,
    ) -> Self {
        Self {
            plan,
            packager,
            server,
            http,
        }
    }

    pub fn run(&self) -> Result<DeployReport> {
        let mut report = DeployReport::default();

        self.package()?;
        report.completed.push(Phase::Package);

        self.copy_to_server()?;
        report.completed.push(Phase::Copy);

        tracing::info!("{}: {}", Phase::Start, self.server.name());
        self.server.start()?;
        report.completed.push(Phase::Start);

        let outcome = self.request_and_verify(&mut report);

        tracing::info!("{}: {}", Phase::Stop, self.server.name());
        let stopped = self.server.stop();

        match (outcome, stopped) {
            (Err(e), stopped) => {
                if let Err(stop_err) = stopped {
                    tracing::warn!("stop after failure also failed: {stop_err}");
                }
                Err(e)
            }
            (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => {
                report.completed.push(Phase::Stop);
                Ok(report)
            }
        }
    }

    fn package(&self) -> Result<()> {
        if let Some(packager) = self.packager {
            packager.package()?;
        }
        if !self.plan.archive.is_file() {
            return Err(fs_error::not_found(&self.plan.archive));
        }
        if self.needs_exploded() && !self.plan.exploded.is_dir() {
            return Err(fs_error::not_found(&self.plan.exploded));
        }
        Ok(())
    }

    fn needs_exploded(&self) -> bool {
        self.plan
            .deployments
            .iter()
            .any(|d| d.form == DeploymentForm::Unpacked)
    }

    fn copy_to_server(&self) -> Result<()> {
        common_fs::ensure_dir(&self.plan.dropins)?;
        for deployment in &self.plan.deployments {
            tracing::info!(
                "{}: {} -> {}",
                Phase::Copy,
                deployment.name,
                deployment.target.display()
            );
            match deployment.form {
                DeploymentForm::Packed => {
                    common_fs::copy_file(&self.plan.archive, &deployment.target)?;
                }
                DeploymentForm::Unpacked => {
                    common_fs::copy_dir_recursive(&self.plan.exploded, &deployment.target)?;
                }
            }
        }
        Ok(())
    }

    fn request_and_verify(&self, report: &mut DeployReport) -> Result<()> {
        let mut bodies = Vec::with_capacity(self.plan.deployments.len());
        for deployment in &self.plan.deployments {
            tracing::info!("{}: {}", Phase::Request, deployment.url);
            let body = self.http.get_text(&deployment.url)?;
            save_result(&deployment.result, &body)?;
            bodies.push(body);
        }
        report.completed.push(Phase::Request);

        for (deployment, body) in self.plan.deployments.iter().zip(&bodies) {
            report.deployments.push(DeploymentReport {
                name: deployment.name.clone(),
                url: deployment.url.clone(),
                result: deployment.result.clone(),
                checks: verify::check(body, &self.plan.expected),
            });
            verify::verify_body(body, &self.plan.expected, &deployment.url)?;
        }
        report.completed.push(Phase::Verify);
        Ok(())
    }
}

/// Save a downloaded body, newline-terminated
fn save_result(path: &Path, body: &str) -> Result<()> {
    if body.ends_with('\n') {
        common_fs::write_file(path, body)
    } else {
        common_fs::write_file(path, &format!("{body}\n"))
    }
}
