//! Main entry point for the scanner binary

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

use scanner::services::{RealAdoClient, RealFileSystem};
use scanner::{Scanner, ScannerConfig, ScannerResult};
use shared::{logging, ProcessId};

/// Collects organization member activity for seat reclamation
#[derive(Parser)]
#[command(name = "scanner")]
#[command(about = "Scans organization entitlements and writes the activity snapshot")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Root of the per-organization output folders (overrides OUTPUT_DIR)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch all entitlements and write users_latest.json (default)
    Users,
    /// List the organization's work item fields and projects
    Inventory,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ScannerResult<()> {
    let args = Args::parse();

    ProcessId::init_scanner();
    logging::init_tracing_with_level(Some(&args.log_level));

    let result = run(args).await;
    if let Err(e) = &result {
        logging::log_error(ProcessId::current(), "Scanner run", e);
    }
    result
}

async fn run(args: Args) -> ScannerResult<()> {
    let mut config = ScannerConfig::from_env()?;
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    let command = args.command.unwrap_or(Command::Users);

    let directory = RealAdoClient::new(&config.connection)?;
    let file_system = RealFileSystem::new(config.layout());
    let scanner = Scanner::new(directory, file_system);

    match command {
        Command::Users => {
            logging::log_startup(
                ProcessId::current(),
                &format!("user scan for {}", config.connection.org),
            );
            scanner.scan_users(Utc::now()).await?;
        }
        Command::Inventory => {
            logging::log_startup(
                ProcessId::current(),
                &format!("inventory of {}", config.connection.org),
            );
            scanner.inventory().await?;
        }
    }
    Ok(())
}
