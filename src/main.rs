//! Chainbench — workspace catalog for local blockchain simulations.
//!
//! Scans the application data directory for persisted workspaces, repairs
//! their directory names, and reports the resulting catalog.
//!
//! Usage:
//!   chainbench list                              # Named workspaces as JSON
//!   chainbench show                              # Full catalog, defaults included
//!   chainbench find "My Chain" --flavor corda    # Look up one workspace
//!   chainbench bootstrap                         # Scan and bootstrap everything
//!   chainbench --data-dir /tmp/chainbench list   # Custom data directory

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use chainbench_catalog::{ScanWarning, WorkspaceManager};
use chainbench_protocol::Flavor;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chainbench", about = "Chainbench — workspace catalog for blockchain simulations")]
struct Cli {
    /// Application data directory (defaults to the platform data dir)
    #[arg(long, env = "CHAINBENCH_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Write logs to a file (defaults to <data-dir>/logs/chainbench.log if no path given)
    #[arg(long, default_missing_value = "DEFAULT", num_args = 0..=1, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List user-created workspaces
    List,
    /// Print the whole catalog, defaults included
    Show,
    /// Look up a workspace by name and flavor
    Find {
        /// Workspace name; omit to select the default workspace
        name: Option<String>,
        #[arg(long, default_value = "ethereum")]
        flavor: String,
    },
    /// Scan and bootstrap every workspace
    Bootstrap,
}

fn resolve_data_dir(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    dirs::data_dir()
        .map(|d| d.join("chainbench"))
        .ok_or_else(|| anyhow!("Could not determine the platform data directory; pass --data-dir"))
}

fn init_tracing(cli: &Cli, data_dir: &std::path::Path) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if let Some(ref log_file_arg) = cli.log_file {
        let log_path = if log_file_arg == "DEFAULT" {
            data_dir.join("logs/chainbench.log")
        } else {
            PathBuf::from(log_file_arg)
        };

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();

        eprintln!("Logging to {}", log_path.display());
    } else {
        // stdout carries the JSON output
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn report_warnings(warnings: &[ScanWarning]) {
    for warning in warnings {
        warn!("{warning}");
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir(&cli)?;
    init_tracing(&cli, &data_dir)?;

    let manager = WorkspaceManager::new(&data_dir);

    let output = match cli.command {
        Command::List => {
            report_warnings(&manager.enumerate()?);
            serde_json::to_value(manager.non_default_names())?
        }
        Command::Show => {
            report_warnings(&manager.enumerate()?);
            serde_json::to_value(manager.catalog())?
        }
        Command::Find { name, flavor } => {
            let flavor: Flavor = flavor.parse()?;
            report_warnings(&manager.enumerate()?);
            match manager.get(name.as_deref(), flavor) {
                Some(descriptor) => serde_json::to_value(descriptor)?,
                None => {
                    return Err(anyhow!(
                        "No {flavor} workspace named {}",
                        name.as_deref().unwrap_or("(default)")
                    ));
                }
            }
        }
        Command::Bootstrap => {
            let startup = manager
                .bootstrap()
                .with_context(|| format!("Failed to bootstrap workspaces in {}", data_dir.display()))?;
            report_warnings(&startup.warnings);
            let ready: Vec<_> = startup
                .workspaces
                .iter()
                .map(|w| {
                    json!({
                        "name": w.name(),
                        "flavor": w.flavor(),
                        "directory": w.directory(),
                    })
                })
                .collect();
            json!({ "workspaces": ready })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("chainbench: {e:#}");
            ExitCode::FAILURE
        }
    }
}
