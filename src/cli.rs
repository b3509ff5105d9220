//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::properties::parse_property_arg;

/// gemstage - default gem staging and WAR deployment checks
#[derive(Parser, Debug)]
#[command(
    name = "gemstage",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Stage default gems into a stdlib tree and verify WAR deployments",
    long_about = "gemstage installs a fixed list of gems into a gem home and merges their \
                  library files, executable stubs, and specifications into a runtime's shared \
                  stdlib tree. Re-running is a no-op for gems already staged. It can also \
                  deploy a web archive to a local server and verify the served pages.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  gemstage stage\n    \
                  gemstage stage --dry-run\n    \
                  gemstage -c lib/gemstage.yaml -D rake.version=10.3.2 stage\n    \
                  gemstage deploy\n    \
                  gemstage dir-info target/rubygems"
)]
pub struct Cli {
    /// Manifest file (defaults to ./gemstage.yaml)
    #[arg(long, short = 'c', global = true, env = "GEMSTAGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub defines: PropertyArgs,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Every `-D` given, before the subcommand first; later values win
    pub fn properties(&self) -> Vec<(String, String)> {
        let after: &[(String, String)] = match &self.command {
            Commands::Stage(args) => &args.defines.properties,
            Commands::Deploy(args) => &args.defines.properties,
            _ => &[],
        };
        self.defines
            .properties
            .iter()
            .chain(after)
            .cloned()
            .collect()
    }
}

/// `-D KEY=VALUE`, accepted both before and after the subcommand
#[derive(Args, Debug, Default)]
pub struct PropertyArgs {
    /// Set or override a build property
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        value_parser = parse_property_arg
    )]
    pub properties: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage the manifest's gems into the shared tree
    Stage(StageArgs),

    /// Deploy the web archive, request its pages, and verify them
    Deploy(DeployArgs),

    /// Write .jrubydir index files into a directory tree
    DirInfo(DirInfoArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the stage command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Stage using ./gemstage.yaml:\n    gemstage stage\n\n\
                   Show what would be staged:\n    gemstage stage --dry-run\n\n\
                   Print the plan as JSON:\n    gemstage stage --dry-run --json")]
pub struct StageArgs {
    /// Show the staging plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan or report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub defines: PropertyArgs,
}

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Package, deploy and verify:\n    gemstage deploy\n\n\
                  Use an archive that is already built:\n    gemstage deploy --skip-package")]
pub struct DeployArgs {
    /// Do not run the package command; the archive must already exist
    #[arg(long)]
    pub skip_package: bool,

    #[command(flatten)]
    pub defines: PropertyArgs,
}

/// Arguments for the dir-info command
#[derive(Parser, Debug)]
pub struct DirInfoArgs {
    /// Root of the tree to index
    pub dir: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gemstage completions --shell bash > ~/.bash_completion.d/gemstage\n\n\
                  Generate zsh completions:\n    gemstage completions --shell zsh > ~/.zfunc/_gemstage")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
