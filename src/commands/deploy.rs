//! Deploy command implementation

use std::path::Path;

use console::Style;

use crate::cli::DeployArgs;
use crate::config::Config;
use crate::deploy::packager::{CommandPackager, Packager};
use crate::deploy::server::ServerScript;
use crate::deploy::{DeployCycle, DeployPlan, DeployReport};
use crate::dirinfo;
use crate::error::Result;
use crate::http::BlockingHttpClient;

/// Run deploy command
pub fn run(config_path: Option<&Path>, properties: &[(String, String)], args: DeployArgs) -> Result<()> {
    let config = Config::load(config_path, properties)?;
    let deploy = config.deploy()?;

    if let Some(dir) = &deploy.dir_info {
        let dir = config.resolve(dir);
        let written = dirinfo::generate(&dir)?;
        tracing::info!("wrote {written} directory indexes under {}", dir.display());
    }

    let plan = DeployPlan::resolve(&config.base_dir, deploy);
    let packager = if args.skip_package {
        None
    } else {
        CommandPackager::from_argv(&deploy.package_command, &config.base_dir)
    };
    let server = ServerScript::new(
        &config.resolve(&deploy.server.install_dir),
        deploy.server.name.clone(),
    );
    let http = BlockingHttpClient::new()?;

    let cycle = DeployCycle::new(
        &plan,
        packager.as_ref().map(|p| p as &dyn Packager),
        &server,
        &http,
    );
    let report = cycle.run()?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &DeployReport) {
    let green = Style::new().green().bold();
    for deployment in &report.deployments {
        println!(
            "  {} {} ({})",
            green.apply_to("✓"),
            deployment.name,
            deployment.url
        );
    }
    println!("Verified {} deployments", report.deployments.len());
}
