//! Demoter run configuration
//!
//! Read once at startup from the environment (after loading `.env`) and then
//! passed around as an immutable value.
//!
//! ## Variables
//! - `ADO_ORG`, `ADO_PAT`: organization and personal access token (required)
//! - `EXECUTION_MODE`: `DRY_RUN` (default), `DEMOTE_ONE` or `DEMOTE_ALL`
//! - `DEMOTE_THRESHOLD_DAYS`: non-negative integer, default 90
//! - `GITHUB_RUN_ID`, `GITHUB_SHA`: provenance stamped on audit events
//! - `OUTPUT_DIR`: root of the per-organization folders, default `outputs`
//! - `ADO_LICENSING_URL`, `ADO_HTTP_TIMEOUT_SECS`: remote endpoint overrides

use std::path::PathBuf;

use shared::config::{self, AdoConnection};
use shared::{ExecutionMode, OrgLayout, Provenance, DEFAULT_THRESHOLD_DAYS};

use crate::error::{DemoterError, DemoterResult};

pub const ENV_EXECUTION_MODE: &str = "EXECUTION_MODE";
pub const ENV_THRESHOLD_DAYS: &str = "DEMOTE_THRESHOLD_DAYS";
pub const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
pub const ENV_REVISION: &str = "GITHUB_SHA";

#[derive(Debug, Clone)]
pub struct DemoterConfig {
    pub connection: AdoConnection,
    pub mode: ExecutionMode,
    pub threshold_days: u32,
    pub provenance: Provenance,
    pub output_dir: PathBuf,
}

impl DemoterConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> DemoterResult<Self> {
        // Silently ignore a missing .env file
        let _ = dotenv::dotenv();
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> DemoterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection = AdoConnection::from_lookup(lookup)?;

        let mode_raw = config::optional_or(lookup, ENV_EXECUTION_MODE, ExecutionMode::Preview.as_str());
        let mode = mode_raw
            .parse::<ExecutionMode>()
            .map_err(|e| DemoterError::config(ENV_EXECUTION_MODE, e))?;

        let threshold_days = config::parse_or(lookup, ENV_THRESHOLD_DAYS, DEFAULT_THRESHOLD_DAYS)?;

        let defaults = Provenance::default();
        let provenance = Provenance {
            run_id: config::optional_or(lookup, ENV_RUN_ID, &defaults.run_id),
            revision: config::optional_or(lookup, ENV_REVISION, &defaults.revision),
        };

        let output_dir = PathBuf::from(config::optional_or(
            lookup,
            config::ENV_OUTPUT_DIR,
            config::DEFAULT_OUTPUT_DIR,
        ));

        Ok(Self {
            connection,
            mode,
            threshold_days,
            provenance,
            output_dir,
        })
    }

    pub fn org(&self) -> &str {
        &self.connection.org
    }

    pub fn layout(&self) -> OrgLayout {
        OrgLayout::new(self.output_dir.clone(), self.connection.org.clone())
    }
}
