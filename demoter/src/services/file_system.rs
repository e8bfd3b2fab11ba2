//! Real file system service implementation
//!
//! Reads and writes the organization's output folder. Whole-file state goes
//! through the shared atomic writer; the audit log through the shared journal
//! appender.

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{fs as shared_fs, process_debug, AuditViewRow, DecisionRow, DemotionEvent, MemberRecord, OrgLayout, ProcessId, SharedError};
use tokio::fs;

use crate::error::{DemoterError, DemoterResult};
use crate::traits::FileSystem;

pub struct RealFileSystem {
    layout: OrgLayout,
}

impl RealFileSystem {
    pub fn new(layout: OrgLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OrgLayout {
        &self.layout
    }
}

/// File contents, `None` if the file does not exist
async fn read_optional(path: &Path) -> DemoterResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SharedError::file("read", path, e).into()),
    }
}

fn parse_json<T: DeserializeOwned>(path: &Path, content: &str) -> DemoterResult<T> {
    serde_json::from_str(content).map_err(|e| DemoterError::CorruptStore {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn snapshot_modified(&self) -> DemoterResult<Option<SystemTime>> {
        Ok(shared_fs::modified(&self.layout.snapshot_path()).await?)
    }

    async fn read_snapshot(&self) -> DemoterResult<Vec<MemberRecord>> {
        let path = self.layout.snapshot_path();
        let content = read_optional(&path).await?.ok_or_else(|| DemoterError::MissingInput {
            path: path.display().to_string(),
        })?;
        let members: Vec<MemberRecord> = parse_json(&path, &content)?;
        process_debug!(ProcessId::current(), "📥 Read {} members from {}", members.len(), path.display());
        Ok(members)
    }

    async fn decisions_modified(&self) -> DemoterResult<Option<SystemTime>> {
        Ok(shared_fs::modified(&self.layout.decisions_path()).await?)
    }

    async fn read_decisions(&self) -> DemoterResult<Option<Vec<DecisionRow>>> {
        let path = self.layout.decisions_path();
        match read_optional(&path).await? {
            Some(content) => Ok(Some(parse_json(&path, &content)?)),
            None => Ok(None),
        }
    }

    async fn write_decisions(&self, rows: &[DecisionRow]) -> DemoterResult<()> {
        let path = self.layout.decisions_path();
        shared_fs::write_json_atomic(&path, rows).await?;
        process_debug!(ProcessId::current(), "💾 Wrote {} decisions to {}", rows.len(), path.display());
        Ok(())
    }

    async fn append_event(&self, event: &DemotionEvent) -> DemoterResult<()> {
        let line = serde_json::to_string(event)?;
        shared_fs::append_line(&self.layout.audit_log_path(), &line).await?;
        Ok(())
    }

    async fn read_audit_log(&self) -> DemoterResult<String> {
        Ok(read_optional(&self.layout.audit_log_path()).await?.unwrap_or_default())
    }

    async fn write_audit_view(&self, rows: &[AuditViewRow]) -> DemoterResult<()> {
        Ok(shared_fs::write_json_atomic(&self.layout.audit_view_path(), rows).await?)
    }
}
