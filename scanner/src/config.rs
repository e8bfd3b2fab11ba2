//! Scanner configuration
//!
//! `ADO_ORG` and `ADO_PAT` are required; endpoints, timeout and `OUTPUT_DIR`
//! fall back to the shared defaults.

use std::path::PathBuf;

use shared::config::{self, AdoConnection};
use shared::OrgLayout;

use crate::error::ScannerResult;

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub connection: AdoConnection,
    pub output_dir: PathBuf,
}

impl ScannerConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> ScannerResult<Self> {
        let _ = dotenv::dotenv();
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> ScannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            connection: AdoConnection::from_lookup(lookup)?,
            output_dir: PathBuf::from(config::optional_or(
                lookup,
                config::ENV_OUTPUT_DIR,
                config::DEFAULT_OUTPUT_DIR,
            )),
        })
    }

    pub fn layout(&self) -> OrgLayout {
        OrgLayout::new(self.output_dir.clone(), self.connection.org.clone())
    }
}
