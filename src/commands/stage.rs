//! Stage command implementation
//!
//! 1. Load the manifest and resolve package versions
//! 2. Plan against the gem home's specifications
//! 3. Reserve placeholders
//! 4. Fetch, install and copy each pending gem
//! 5. Rewrite loader stubs

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::StageArgs;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::RepositoryFetcher;
use crate::http::BlockingHttpClient;
use crate::installer::GemCommandInstaller;
use crate::progress::ProgressDisplay;
use crate::staging::{self, ActionOutcome, Stager, StagingAction, StagingReport};

/// Run stage command
pub fn run(config_path: Option<&Path>, properties: &[(String, String)], args: StageArgs) -> Result<()> {
    let config = Config::load(config_path, properties)?;
    let packages = config.packages()?;
    let layout = config.layout();

    let installed = staging::installed_descriptors(&layout.specs_dir)?;
    let actions = staging::plan(&packages, &installed);

    if args.dry_run {
        return print_plan(&actions, args.json);
    }

    let http = BlockingHttpClient::new()?;
    let fetcher = RepositoryFetcher::new(
        config.local_repository(),
        config.manifest.repository.clone(),
        &http,
    );
    let installer = GemCommandInstaller::new(&config.manifest.installer);
    let stager = Stager::new(&layout, &fetcher, &installer);

    let placeholders: Vec<PathBuf> = config
        .manifest
        .placeholders
        .iter()
        .map(|p| config.resolve(p))
        .collect();
    let reservation = stager.reserve(&placeholders)?;

    let progress = ProgressDisplay::new(actions.len() as u64);
    let mut report = StagingReport {
        placeholders: reservation.created().to_vec(),
        ..StagingReport::default()
    };

    for (i, action) in actions.iter().enumerate() {
        progress.update_package(&action.package().full_name(), i + 1, actions.len());
        match stager.apply(&reservation, action) {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }
        progress.inc_package();
    }
    progress.finish();

    let loader_stubs: Vec<(PathBuf, Vec<String>)> = config
        .manifest
        .loader_stubs
        .iter()
        .map(|s| (config.resolve(&s.path), s.archives.clone()))
        .collect();
    report.loader_stubs = stager.write_loader_stubs(&loader_stubs)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_plan(actions: &[StagingAction], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(actions)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    for action in actions {
        match action {
            StagingAction::Stage { package } => {
                let kind = if package.spec_only {
                    " (specification only)"
                } else {
                    ""
                };
                println!("[DRY RUN] Would stage {package}{kind}");
            }
            StagingAction::Skip {
                package,
                descriptor,
            } => {
                println!(
                    "[DRY RUN] {} {}",
                    dim.apply_to(format!("Already staged {package}")),
                    dim.apply_to(format!("({descriptor})"))
                );
            }
        }
    }

    let pending = actions.iter().filter(|a| !a.is_skip()).count();
    println!("[DRY RUN] {pending} of {} gems would be staged", actions.len());
    Ok(())
}

fn print_report(report: &StagingReport) {
    let bold = Style::new().bold();
    let green = Style::new().green().bold();

    for outcome in &report.outcomes {
        if let ActionOutcome::Staged(staged) = outcome {
            println!(
                "  {} {} ({} lib entries, {} bin files)",
                green.apply_to("✓"),
                bold.apply_to(&staged.package),
                staged.lib_entries,
                staged.bin_files
            );
        }
    }

    println!(
        "Staged {} gems, {} already staged",
        report.staged_count(),
        report.skipped_count()
    );
}
