//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::graph;
use super::output::{Output, OutputFormat};
use crate::storage::{AppConfig, ConfigOverrides};

#[derive(Parser)]
#[command(name = "depviz")]
#[command(author, version, about = "Resolve a package's dependency tree and render it with Graphviz")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./depviz.toml, then the user config dir)
    #[arg(long, short = 'c', global = true, env = "DEPVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root package, overriding `packageName`
    #[arg(long, short = 'p', global = true)]
    pub package: Option<String>,

    /// Maximum resolution depth, overriding `maxDepth`
    #[arg(long, short = 'd', global = true)]
    pub max_depth: Option<u32>,

    /// Graph-source output path, overriding `outputFilePath`
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve, write the graph source and render SVG and PNG images (default)
    Run,

    /// Resolve and print the dependency tree
    Tree,

    /// Resolve and print the graph source without writing files
    Dot,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            package_name: self.package.clone(),
            max_depth: self.max_depth,
            output_file_path: self.output.clone(),
        }
    }
}

/// Routes `tracing` events to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        EnvFilter::new(format!("warn,depviz_cli={level}"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = Output::new(cli.format, cli.verbose > 0);

    output.verbose("depviz starting");

    let (mut config, path) = AppConfig::load(cli.config.as_deref())?;
    output.verbose_ctx("config", &format!("Loaded {}", path.display()));

    config.apply_overrides(cli.overrides());
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let command = cli.command.unwrap_or(Commands::Run);
    runtime.block_on(async {
        match command {
            Commands::Run => graph::run(&config, &output).await,
            Commands::Tree => graph::tree(&config, &output).await,
            Commands::Dot => graph::dot(&config, &output).await,
        }
    })
}
