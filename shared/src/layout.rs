//! Per-organization output folder layout
//!
//! The scanner and the demoter never talk to each other directly; they meet
//! in `<base>/<org>/`:
//!
//! - `users_latest.json` - raw activity snapshot written by the scanner
//! - `users_with_status.json` - decision store owned by the demoter
//! - `demotions.jsonl` - append-only audit log
//! - `demotions_view.json` - sorted projection of the audit log

use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "users_latest.json";
pub const DECISIONS_FILE: &str = "users_with_status.json";
pub const AUDIT_LOG_FILE: &str = "demotions.jsonl";
pub const AUDIT_VIEW_FILE: &str = "demotions_view.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgLayout {
    base_dir: PathBuf,
    org: String,
}

impl OrgLayout {
    pub fn new(base_dir: impl Into<PathBuf>, org: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            org: org.into(),
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn org_dir(&self) -> PathBuf {
        self.base_dir.join(&self.org)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.org_dir().join(SNAPSHOT_FILE)
    }

    pub fn decisions_path(&self) -> PathBuf {
        self.org_dir().join(DECISIONS_FILE)
    }

    pub fn audit_log_path(&self) -> PathBuf {
        self.org_dir().join(AUDIT_LOG_FILE)
    }

    pub fn audit_view_path(&self) -> PathBuf {
        self.org_dir().join(AUDIT_VIEW_FILE)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
