//! Main entry point for the demoter binary
//!
//! Wires the real output folder and licensing client into the pipeline and
//! performs exactly one run.

use std::path::PathBuf;

use clap::Parser;

use demoter::services::{RealFileSystem, RealLicensingApi};
use demoter::{Demoter, DemoterConfig, DemoterError, DemoterResult, RunOutcome};
use shared::{logging, process_debug, process_info, ExecutionMode, ProcessId};

/// Demotes inactive members to the free license tier, one per run
#[derive(Parser)]
#[command(name = "demoter")]
#[command(about = "Evaluates the activity snapshot and reclaims seats from inactive members")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Root of the per-organization output folders (overrides OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Execution mode: DRY_RUN, DEMOTE_ONE or DEMOTE_ALL (overrides EXECUTION_MODE)
    #[arg(long)]
    pub mode: Option<String>,

    /// Only regenerate the audit view from the audit log
    #[arg(long)]
    pub rebuild_audit_view: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> DemoterResult<()> {
    let args = Args::parse();

    ProcessId::init_demoter();
    logging::init_tracing_with_level(Some(&args.log_level));

    let result = run(args).await;
    if let Err(e) = &result {
        logging::log_error(ProcessId::current(), "Demoter run", e);
    }
    result
}

async fn run(args: Args) -> DemoterResult<()> {
    let mut config = DemoterConfig::from_env()?;
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(mode) = args.mode {
        config.mode = mode
            .parse::<ExecutionMode>()
            .map_err(|e| DemoterError::config("--mode", e))?;
    }

    logging::log_startup(
        ProcessId::current(),
        &format!("demoter for {} in {} mode", config.org(), config.mode),
    );
    process_debug!(ProcessId::current(), "⚙️ {:?}", config);

    let file_system = RealFileSystem::new(config.layout());
    let licensing = RealLicensingApi::new(&config.connection)?;
    let demoter = Demoter::new(config, file_system, licensing);

    if args.rebuild_audit_view {
        let rows = demoter.rebuild_audit_view().await?;
        logging::log_success(ProcessId::current(), &format!("Audit view rebuilt ({rows} rows)"));
        return Ok(());
    }

    let report = demoter.run().await?;
    if !report.recovered.is_empty() {
        process_info!(
            ProcessId::current(),
            "🩹 Recovered {} interrupted demotions",
            report.recovered.len()
        );
    }

    match report.outcome {
        RunOutcome::BatchRefused { candidates } => Err(DemoterError::BatchModeLocked { candidates }),
        RunOutcome::Demoted { event } => {
            process_info!(
                ProcessId::current(),
                "📜 Audit event recorded for {} at {}",
                event.entitlement_id,
                event.timestamp_utc
            );
            Ok(())
        }
        RunOutcome::NoCandidates | RunOutcome::Previewed { .. } => Ok(()),
    }
}
